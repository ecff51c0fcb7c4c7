//! Relayed claim submission against the mock node.

use alloy::consensus::{Transaction, TxEnvelope};
use alloy::eips::eip2718::Decodable2718;
use alloy::primitives::{hex, keccak256, Address, Bytes, U256};
use alloy::sol_types::SolCall;
use std::sync::Arc;

use safe2link::blockchain::{BlockchainClient, BlockchainError, RelayerAccount, TransactionSender, Wallet};
use safe2link::link::contract::ISafe2LinkModule;
use safe2link::link::keys::{derive_key_pair, recover_claim_signer};
use safe2link::link::LinkService;
use safe2link::networks::NetworkRegistry;
use safe2link::safe::SafeServiceApp;

mod common;
use common::{local_config, start_mock_node, MockChain, LOCAL_CHAIN_ID};

const ANVIL_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

#[tokio::test]
async fn test_claim_is_signed_broadcast_and_awaited() {
    let chain = Arc::new(MockChain::default());
    let url = start_mock_node(chain.clone()).await;

    let mut config = local_config(&url, None);
    config.relayer.confirmation_timeout_secs = 1;
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let network = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap();

    let wallet = Wallet::from_private_key(ANVIL_KEY).unwrap();
    let account = RelayerAccount::new(wallet, config.providers.clone(), config.relayer.clone());

    // Without a receipt status the mock node leaves the claim pending.
    let err = account
        .send_transaction(network, network.module_address, Bytes::from(vec![0xf2, 0xf0, 0x9a, 0x8e]))
        .await
        .unwrap_err();
    assert!(matches!(err, BlockchainError::ConfirmationTimeout(1)));

    let raw_txs = chain.raw_txs.lock().unwrap();
    assert_eq!(raw_txs.len(), 1);
    let raw = hex::decode(&raw_txs[0]).unwrap();
    let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
    assert!(envelope.is_legacy());
    assert_eq!(envelope.to(), Some(network.module_address));
    assert_eq!(envelope.input().to_vec(), vec![0xf2, 0xf0, 0x9a, 0x8e]);
    assert_eq!(envelope.chain_id(), Some(LOCAL_CHAIN_ID));
    assert_eq!(envelope.nonce(), 0);
    assert_eq!(envelope.gas_limit(), config.relayer.gas_limit);
}

#[tokio::test]
async fn test_mined_claim_returns_hash() {
    let chain = Arc::new(MockChain {
        receipt_status: Some(true),
        ..MockChain::default()
    });
    let url = start_mock_node(chain.clone()).await;
    let config = local_config(&url, None);
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let network = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap();

    let wallet = Wallet::from_private_key(ANVIL_KEY).unwrap();
    let account = RelayerAccount::new(wallet, config.providers.clone(), config.relayer.clone());

    let tx_hash = account
        .send_transaction(network, network.module_address, Bytes::from(vec![0x01]))
        .await
        .unwrap();

    let raw_txs = chain.raw_txs.lock().unwrap();
    assert_eq!(tx_hash, keccak256(hex::decode(&raw_txs[0]).unwrap()));
}

#[tokio::test]
async fn test_reverted_claim_is_reported() {
    let chain = Arc::new(MockChain {
        receipt_status: Some(false),
        ..MockChain::default()
    });
    let url = start_mock_node(chain).await;
    let config = local_config(&url, None);
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let network = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap();

    let wallet = Wallet::from_private_key(ANVIL_KEY).unwrap();
    let account = RelayerAccount::new(wallet, config.providers.clone(), config.relayer.clone());

    let err = account
        .send_transaction(network, network.module_address, Bytes::from(vec![0x01]))
        .await
        .unwrap_err();
    assert!(matches!(err, BlockchainError::Reverted(_)));
}

#[tokio::test]
async fn test_relayed_claim_pays_recipient() {
    let chain = Arc::new(MockChain {
        receipt_status: Some(true),
        ..MockChain::default()
    });
    let url = start_mock_node(chain.clone()).await;
    let manager = Address::repeat_byte(0x77);
    let config = local_config(&url, Some(manager));
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let module = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap().module_address;

    let safe = SafeServiceApp::new(&config.safe, &registry).unwrap();
    let service = LinkService::new(safe, registry, &config);
    let account = RelayerAccount::new(
        Wallet::from_private_key(ANVIL_KEY).unwrap(),
        config.providers.clone(),
        config.relayer.clone(),
    );
    let recipient = Address::repeat_byte(0x99);

    let tx_hash = service
        .claim_link(LOCAL_CHAIN_ID, 2, "abc123", recipient, &account)
        .await
        .unwrap();

    let raw_txs = chain.raw_txs.lock().unwrap();
    let raw = hex::decode(&raw_txs[0]).unwrap();
    assert_eq!(tx_hash, keccak256(&raw));

    let envelope = TxEnvelope::decode_2718(&mut raw.as_slice()).unwrap();
    assert_eq!(envelope.to(), Some(module));
    let call = ISafe2LinkModule::claimLinkCall::abi_decode(envelope.input()).unwrap();
    assert_eq!(call.index, U256::from(2u64));
    assert_eq!(call.claimant, recipient);
    assert_eq!(call.manager, manager);

    let signature = alloy::primitives::Signature::try_from(&call.signature[..]).unwrap();
    assert_eq!(
        recover_claim_signer(recipient, &signature).unwrap(),
        derive_key_pair("abc123").unwrap().address
    );
}

#[tokio::test]
async fn test_gas_price_is_clamped_to_cap() {
    let chain = Arc::new(MockChain::default());
    let url = start_mock_node(chain).await;
    let mut config = local_config(&url, None);
    // node quotes 1 gwei; the 20% buffer must not push past a 1 gwei cap
    config.relayer.max_gas_price_gwei = 1;
    config.relayer.gas_price_multiplier = 1.2;
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let network = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap();

    let account = RelayerAccount::new(
        Wallet::from_private_key(ANVIL_KEY).unwrap(),
        config.providers.clone(),
        config.relayer.clone(),
    );
    let client = BlockchainClient::for_network(network, &config.providers).await.unwrap();
    let request = account
        .build(&client, network.module_address, Bytes::new())
        .await
        .unwrap();
    assert_eq!(request.gas_price, Some(1_000_000_000));
}

#[tokio::test]
async fn test_client_reads_through_mock_node() {
    let chain = Arc::new(MockChain::default());
    let url = start_mock_node(chain).await;
    let config = local_config(&url, None);
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let network = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap();

    let client = BlockchainClient::for_network(network, &config.providers).await.unwrap();
    client.verify_chain_id().await.unwrap();
    assert_eq!(client.get_block_number().await.unwrap(), 16);
    assert_eq!(client.get_gas_price().await.unwrap(), 1_000_000_000);
    assert_eq!(
        client.get_transaction_count(Address::repeat_byte(0x01)).await.unwrap(),
        0
    );
    assert!(client.is_healthy().await);
}

#[tokio::test]
async fn test_chain_mismatch_is_detected() {
    let chain = Arc::new(MockChain {
        chain_id: 1,
        ..MockChain::default()
    });
    let url = start_mock_node(chain).await;
    let config = local_config(&url, None);
    let registry = NetworkRegistry::from_config(&config).unwrap();
    let network = registry.get_network_by_id(LOCAL_CHAIN_ID).unwrap();

    let client = BlockchainClient::for_network(network, &config.providers).await.unwrap();
    assert!(matches!(
        client.verify_chain_id().await,
        Err(BlockchainError::ChainMismatch { expected: 31337, actual: 1 })
    ));
}
