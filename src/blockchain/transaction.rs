//! Direct transaction submission for claim calls.
//!
//! # Responsibilities
//! - Build legacy transactions with a fixed gas limit and capped gas price
//! - Sign locally and broadcast through the network's RPC
//! - Monitor confirmations
//!
//! There is no retry logic: resubmitting a claim risks a double submission,
//! so a failure is reported and left to the caller.

use alloy::eips::eip2718::Encodable2718;
use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::time::Duration;
use tokio::time::{interval, timeout};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult, ConfirmationStatus};
use crate::blockchain::wallet::Wallet;
use crate::config::schema::{ProviderConfig, RelayerConfig};
use crate::networks::NetworkDescriptor;

/// An account that can put a call on chain.
///
/// The sender pays gas. It need not be the claimant the call pays out to.
#[async_trait]
pub trait TransactionSender: Send + Sync {
    /// Address the transaction is sent from.
    fn address(&self) -> Address;

    /// Send `data` to `to` on `network` and return the transaction hash once
    /// the transaction is confirmed.
    async fn send_transaction(
        &self,
        network: &NetworkDescriptor,
        to: Address,
        data: Bytes,
    ) -> BlockchainResult<TxHash>;
}

/// Locally-keyed account that signs and broadcasts its own transactions.
#[derive(Debug, Clone)]
pub struct RelayerAccount {
    wallet: Wallet,
    providers: ProviderConfig,
    config: RelayerConfig,
}

impl RelayerAccount {
    pub fn new(wallet: Wallet, providers: ProviderConfig, config: RelayerConfig) -> Self {
        Self {
            wallet,
            providers,
            config,
        }
    }

    /// Relayer keyed by `SAFE2LINK_RELAYER_PRIVATE_KEY`, read through `lookup`.
    ///
    /// There is no fallback key: an unfunded throwaway account can never
    /// pay for a claim.
    pub fn from_env_with(
        lookup: impl Fn(&str) -> Option<String>,
        providers: ProviderConfig,
        config: RelayerConfig,
    ) -> BlockchainResult<Self> {
        Ok(Self::new(Wallet::from_env_with(lookup)?, providers, config))
    }

    /// Build a transaction request with the chain nonce and a capped gas price.
    pub async fn build(
        &self,
        client: &BlockchainClient,
        to: Address,
        data: Bytes,
    ) -> BlockchainResult<TransactionRequest> {
        let nonce = client.get_transaction_count(self.wallet.address()).await?;

        let gas_price = capped_gas_price(
            client.get_gas_price().await?,
            self.config.gas_price_multiplier,
            self.config.max_gas_price_gwei,
        )?;

        let tx = TransactionRequest::default()
            .with_from(self.wallet.address())
            .with_to(to)
            .with_value(U256::ZERO)
            .with_input(data)
            .with_nonce(nonce)
            .with_gas_price(gas_price)
            .with_chain_id(client.chain_id())
            .with_gas_limit(self.config.gas_limit);

        Ok(tx)
    }

    /// Wait for a transaction to be confirmed.
    pub async fn wait_for_confirmation(
        &self,
        client: &BlockchainClient,
        tx_hash: TxHash,
    ) -> BlockchainResult<ConfirmationStatus> {
        let required_confirmations = self.config.confirmation_blocks;
        let timeout_secs = self.config.confirmation_timeout_secs;
        let poll_interval = Duration::from_secs(2);

        let result = timeout(Duration::from_secs(timeout_secs), async {
            let mut ticker = interval(poll_interval);

            loop {
                ticker.tick().await;

                let receipt = match client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                if !receipt.status() {
                    return Ok(ConfirmationStatus::Failed(
                        "Transaction reverted".to_string(),
                    ));
                }

                let current_block = client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required_confirmations {
                    return Ok(ConfirmationStatus::Confirmed {
                        block_number: tx_block,
                    });
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(status) => status,
            Err(_) => Err(BlockchainError::ConfirmationTimeout(timeout_secs)),
        }
    }
}

/// Node price times `multiplier`, never above `max_gwei`. A node price
/// already above the cap is an error rather than a clamped bid.
pub fn capped_gas_price(node_price: u128, multiplier: f64, max_gwei: u64) -> BlockchainResult<u128> {
    let cap = max_gwei as u128 * 1_000_000_000;
    if node_price > cap {
        return Err(BlockchainError::GasPriceTooHigh {
            current_gwei: (node_price / 1_000_000_000) as u64,
            max_gwei,
        });
    }

    let adjusted = (node_price as f64 * multiplier) as u128;
    Ok(adjusted.min(cap))
}

#[async_trait]
impl TransactionSender for RelayerAccount {
    fn address(&self) -> Address {
        self.wallet.address()
    }

    async fn send_transaction(
        &self,
        network: &NetworkDescriptor,
        to: Address,
        data: Bytes,
    ) -> BlockchainResult<TxHash> {
        let client = BlockchainClient::for_network(network, &self.providers).await?;
        let request = self.build(&client, to, data).await?;

        let envelope = request
            .build(&self.wallet.network_wallet())
            .await
            .map_err(|e| BlockchainError::Wallet(format!("Transaction signing failed: {}", e)))?;

        let tx_hash = client.send_raw_transaction(&envelope.encoded_2718()).await?;
        tracing::info!(
            tx_hash = %tx_hash,
            chain_id = network.chain_id,
            explorer = network.tx_url(tx_hash).as_deref().unwrap_or("-"),
            "Transaction broadcast"
        );

        match self.wait_for_confirmation(&client, tx_hash).await? {
            ConfirmationStatus::Confirmed { block_number } => {
                tracing::info!(tx_hash = %tx_hash, block_number, "Transaction confirmed");
                Ok(tx_hash)
            }
            ConfirmationStatus::Failed(reason) => Err(BlockchainError::Reverted(reason)),
        }
    }
}
