//! Local signing wallet for relayed claim transactions.
//!
//! # Security
//! - Private keys come from the environment or are generated in memory
//! - Keys are never logged or serialized

use alloy::network::EthereumWallet;
use alloy::primitives::Address;
use alloy::signers::local::PrivateKeySigner;

use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Environment variable name for the relayer private key.
pub const PRIVATE_KEY_ENV_VAR: &str = "SAFE2LINK_RELAYER_PRIVATE_KEY";

/// Wallet holding a single secp256k1 key.
#[derive(Debug, Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    /// Create a wallet from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> BlockchainResult<Self> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| BlockchainError::Wallet(format!("Invalid private key format: {}", e)))?;

        tracing::info!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    /// Load the wallet from `SAFE2LINK_RELAYER_PRIVATE_KEY`, read through
    /// `lookup` (normally `std::env::var`).
    pub fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> BlockchainResult<Self> {
        let private_key = lookup(PRIVATE_KEY_ENV_VAR)
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                BlockchainError::Wallet(format!(
                    "Environment variable {} not set",
                    PRIVATE_KEY_ENV_VAR
                ))
            })?;

        Self::from_private_key(&private_key)
    }

    /// Fresh random key that lives only as long as this process.
    pub fn ephemeral() -> Self {
        let signer = PrivateKeySigner::random();
        tracing::info!(address = %signer.address(), "Ephemeral wallet created");
        Self { signer }
    }

    /// Get the wallet's address.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Network wallet used to sign transaction envelopes.
    pub fn network_wallet(&self) -> EthereumWallet {
        EthereumWallet::from(self.signer.clone())
    }
}
