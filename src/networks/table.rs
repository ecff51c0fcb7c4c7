//! Built-in network table.
//!
//! URLs carry `{infura_key}`, `{alchemy_key}`, `{etherscan_key}` and
//! `{polygonscan_key}` placeholders that the registry fills from
//! configuration. Empty strings mean "not available on this network".

use alloy::primitives::{address, Address};

use crate::networks::{Network, NetworkType};

/// Link module contract, same address on every deployment.
pub const DEFAULT_MODULE: Address = address!("664e3acE00b41ab503936010c7EBa9c7Fe24A4B9");

/// Manager contract shared by most deployments.
pub const DEFAULT_MANAGER: Address = address!("6CB0CcE62E70BF2e88EEeb125197A133873525A7");

/// Manager contract on Base mainnet.
pub const BASE_MANAGER: Address = address!("4D868f75E3230Eb6bD227e595915f3d0A1E9d252");

/// One row of the static table.
#[derive(Debug, Clone, Copy)]
pub struct NetworkTemplate {
    pub network: Network,
    pub name: &'static str,
    pub chain_id: u64,
    pub network_type: NetworkType,
    pub rpc_url: &'static str,
    pub safe_service: &'static str,
    pub block_explorer: &'static str,
    pub api_url: &'static str,
    pub eas_explorer: &'static str,
    pub manager_address: Option<Address>,
}

pub const BUILTIN_NETWORKS: &[NetworkTemplate] = &[
    NetworkTemplate {
        network: Network::Localhost,
        name: "Local Chain",
        chain_id: 31337,
        network_type: NetworkType::Testnet,
        rpc_url: "http://localhost:8545",
        safe_service: "",
        block_explorer: "",
        api_url: "",
        eas_explorer: "",
        manager_address: None,
    },
    NetworkTemplate {
        network: Network::Mainnet,
        name: "Ethereum",
        chain_id: 1,
        network_type: NetworkType::Mainnet,
        rpc_url: "https://mainnet.infura.io/v3/{infura_key}",
        safe_service: "https://safe-transaction-mainnet.safe.global",
        block_explorer: "https://etherscan.io",
        api_url: "https://api.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::Goerli,
        name: "Goerli",
        chain_id: 5,
        network_type: NetworkType::Testnet,
        rpc_url: "https://goerli.infura.io/v3/{infura_key}",
        safe_service: "https://safe-transaction-goerli.safe.global",
        block_explorer: "https://goerli.etherscan.io",
        api_url: "https://api-goerli.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::Sepolia,
        name: "Sepolia",
        chain_id: 11155111,
        network_type: NetworkType::Testnet,
        rpc_url: "https://eth-sepolia.g.alchemy.com/v2/{alchemy_key}",
        safe_service: "https://safe-transaction-sepolia.safe.global",
        block_explorer: "https://sepolia.etherscan.io",
        api_url: "https://api-sepolia.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::BaseGoerli,
        name: "Base Goerli",
        chain_id: 84531,
        network_type: NetworkType::Testnet,
        rpc_url: "https://base-goerli.g.alchemy.com/v2/{alchemy_key}",
        safe_service: "https://safe-transaction-base-testnet.safe.global",
        block_explorer: "https://goerli.basescan.org",
        api_url: "https://api-goerli.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "https://base-goerli.easscan.org/attestation/view/",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::Base,
        name: "Base",
        chain_id: 8453,
        network_type: NetworkType::Mainnet,
        rpc_url: "https://base-mainnet.g.alchemy.com/v2/{alchemy_key}",
        safe_service: "https://safe-transaction-base.safe.global",
        block_explorer: "https://basescan.org",
        api_url: "https://api-goerli.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "",
        manager_address: Some(BASE_MANAGER),
    },
    NetworkTemplate {
        network: Network::Optimism,
        name: "Optimism",
        chain_id: 10,
        network_type: NetworkType::Mainnet,
        rpc_url: "https://optimism-mainnet.infura.io/v3/{infura_key}",
        safe_service: "https://safe-transaction-optimism.safe.global",
        block_explorer: "https://optimistic.etherscan.io",
        api_url: "https://api-optimistic.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "https://optimism.easscan.org/attestation/view/",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::Gnosis,
        name: "Gnosis",
        chain_id: 100,
        network_type: NetworkType::Mainnet,
        rpc_url: "https://rpc.ankr.com/gnosis",
        safe_service: "https://safe-transaction-gnosis-chain.safe.global",
        block_explorer: "https://gnosisscan.io",
        api_url: "https://api-goerli.etherscan.io/api?apikey={etherscan_key}",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::PolygonTestnet,
        name: "Polygon",
        chain_id: 80001,
        network_type: NetworkType::Testnet,
        rpc_url: "https://matic-mumbai.chainstacklabs.com",
        safe_service: "",
        block_explorer: "https://mumbai.polygonscan.com",
        api_url: "https://api-testnet.polygonscan.com/api?module=account&action=balance&apikey={polygonscan_key}",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::Polygon,
        name: "Polygon",
        chain_id: 137,
        network_type: NetworkType::Mainnet,
        rpc_url: "https://rpc.ankr.com/polygon",
        safe_service: "https://safe-transaction-polygon.safe.global",
        block_explorer: "https://polygonscan.com",
        api_url: "",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
    NetworkTemplate {
        network: Network::Celo,
        name: "Celo",
        chain_id: 42220,
        network_type: NetworkType::Mainnet,
        rpc_url: "https://1rpc.io/celo",
        safe_service: "https://safe-transaction-polygon.safe.global",
        block_explorer: "https://celoscan.com",
        api_url: "",
        eas_explorer: "",
        manager_address: Some(DEFAULT_MANAGER),
    },
];
