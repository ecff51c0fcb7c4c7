//! Link lifecycle: create through the Safe, claim through any account.

use alloy::primitives::{Address, TxHash, U256};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::transaction::TransactionSender;
use crate::config::schema::{LinkConfig, ProviderConfig};
use crate::link::amount::{is_native, to_base_units, NATIVE_DECIMALS};
use crate::link::contract;
use crate::link::keys::{claim_digest, derive_key_pair, generate_seed, sign_address_for_claim};
use crate::link::types::{CreatedLink, LinkError, LinkRecord, LinkResult, SafeTransaction};
use crate::networks::{NetworkDescriptor, NetworkRegistry};
use crate::safe::SafeApp;

/// Creates, claims and inspects links.
pub struct LinkService<S> {
    safe: S,
    registry: NetworkRegistry,
    providers: ProviderConfig,
    seed_length: usize,
}

impl<S: SafeApp> LinkService<S> {
    pub fn new(safe: S, registry: NetworkRegistry, config: &LinkConfig) -> Self {
        Self {
            safe,
            registry,
            providers: config.providers.clone(),
            seed_length: config.module.seed_length,
        }
    }

    pub fn safe(&self) -> &S {
        &self.safe
    }

    pub fn registry(&self) -> &NetworkRegistry {
        &self.registry
    }

    /// Fund a new link from the connected Safe.
    ///
    /// `amount` is human-readable (`"1.5"`) and scaled by the token's
    /// decimals. The returned seed is the only copy of the claim capability.
    /// Returns `None` when there is nothing to submit.
    pub async fn create_link(&self, token: Address, amount: &str) -> LinkResult<Option<CreatedLink>> {
        // A Safe that cannot report its info is not connected.
        let info = self.safe.safe_info().await.map_err(|e| {
            if !matches!(e, LinkError::NotConnected) {
                tracing::debug!(error = %e, "Safe info unavailable");
            }
            LinkError::NotConnected
        })?;
        let network = self.network(info.chain_id)?;
        let client = self.client(network).await?;

        let seed = generate_seed(self.seed_length);
        let authority = derive_key_pair(&seed)?.address;

        let decimals = self.token_decimals(&client, token).await?;
        let value = to_base_units(amount, decimals)?;

        let txs = vec![SafeTransaction {
            to: network.module_address,
            value: "0".to_string(),
            data: contract::encode_create_link(token, value, authority),
        }];

        // The module appends, so the current count is the new link's index.
        let index = self.link_count_with(&client, network).await?;
        let index = u64::try_from(index)
            .map_err(|_| LinkError::Abi(format!("link count {} out of range", index)))?;

        if txs.is_empty() {
            return Ok(None);
        }

        let reference = self.safe.submit_txs(&txs).await?;

        tracing::info!(
            index = index,
            chain_id = network.chain_id,
            token = %token,
            amount = %value,
            claim_authority = %authority,
            batch = %reference,
            "Link submitted to Safe"
        );

        Ok(Some(CreatedLink {
            i: index,
            p: seed,
            c: network.chain_id,
        }))
    }

    /// Claim link `index` on `chain_id`, paying `claimant`.
    ///
    /// `sender` only signs and pays for the transaction; the claim signature
    /// binds the funds to `claimant`.
    pub async fn claim_link(
        &self,
        chain_id: u64,
        index: u64,
        seed: &str,
        claimant: Address,
        sender: &dyn TransactionSender,
    ) -> LinkResult<TxHash> {
        let pair = derive_key_pair(seed)?;

        let digest = claim_digest(claimant);
        let signature = sign_address_for_claim(claimant, &pair.private_key)?;

        let network = self.network(chain_id)?;
        let manager = network
            .manager_address
            .ok_or(LinkError::MissingManager(chain_id))?;

        let data = contract::encode_claim_link(U256::from(index), claimant, digest, &signature, manager);

        tracing::info!(
            index = index,
            chain_id = chain_id,
            claimant = %claimant,
            sender = %sender.address(),
            claim_authority = %pair.address,
            "Claiming link"
        );

        let tx_hash = sender
            .send_transaction(network, network.module_address, data)
            .await?;

        tracing::info!(index = index, tx_hash = %tx_hash, "Link claimed");
        Ok(tx_hash)
    }

    /// Number of links on the connected Safe's chain.
    pub async fn get_link_count(&self) -> LinkResult<U256> {
        let info = self.safe.safe_info().await?;
        self.get_link_count_on(info.chain_id).await
    }

    /// Number of links on `chain_id`.
    pub async fn get_link_count_on(&self, chain_id: u64) -> LinkResult<U256> {
        let network = self.network(chain_id)?;
        let client = self.client(network).await?;
        self.link_count_with(&client, network).await
    }

    pub async fn get_link_details(&self, chain_id: u64, index: U256) -> LinkResult<LinkRecord> {
        let network = self.network(chain_id)?;
        let client = self.client(network).await?;
        let data = client
            .call(network.module_address, contract::encode_get_link(index))
            .await?;
        contract::decode_link(index, &data)
    }

    async fn link_count_with(
        &self,
        client: &BlockchainClient,
        network: &NetworkDescriptor,
    ) -> LinkResult<U256> {
        let data = client
            .call(network.module_address, contract::encode_get_link_count())
            .await?;
        contract::decode_link_count(&data)
    }

    async fn token_decimals(&self, client: &BlockchainClient, token: Address) -> LinkResult<u8> {
        if is_native(token) {
            return Ok(NATIVE_DECIMALS);
        }
        let data = client.call(token, contract::encode_decimals()).await?;
        contract::decode_decimals(&data)
    }

    fn network(&self, chain_id: u64) -> LinkResult<&NetworkDescriptor> {
        self.registry
            .get_network_by_id(chain_id)
            .ok_or(LinkError::UnknownNetwork(chain_id))
    }

    async fn client(&self, network: &NetworkDescriptor) -> LinkResult<BlockchainClient> {
        Ok(BlockchainClient::for_network(network, &self.providers).await?)
    }
}
