//! Link data types and error definitions.

use alloy::primitives::{Address, Bytes, B256, U256};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::blockchain::types::BlockchainError;

/// Key pair derived from a link seed.
///
/// The private key is the claim capability; it never appears in `Debug`
/// output.
#[derive(Clone, PartialEq, Eq)]
pub struct LinkKeyPair {
    pub address: Address,
    pub private_key: B256,
}

impl std::fmt::Debug for LinkKeyPair {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinkKeyPair")
            .field("address", &self.address)
            .field("private_key", &"<redacted>")
            .finish()
    }
}

/// A link as stored by the module contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRecord {
    pub index: U256,
    pub token: Address,
    pub amount: U256,
    pub claim_authority: Address,
    pub claimed: bool,
}

/// Result of `create_link`. Field names match the share URL parameters.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedLink {
    /// Link index in the module.
    pub i: u64,
    /// Seed; whoever holds it can claim the link.
    pub p: String,
    /// Chain id.
    pub c: u64,
}

impl std::fmt::Debug for CreatedLink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreatedLink")
            .field("i", &self.i)
            .field("p", &"<redacted>")
            .field("c", &self.c)
            .finish()
    }
}

/// One call in a Safe multisig batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeTransaction {
    pub to: Address,
    /// Wei, as a decimal string.
    pub value: String,
    pub data: Bytes,
}

/// Errors that can occur in link operations.
#[derive(Debug, Error)]
pub enum LinkError {
    /// No Safe connection is available.
    #[error("Not connected to a Safe")]
    NotConnected,

    /// Key derivation, signing, or recovery failed.
    #[error("Crypto error: {0}")]
    Crypto(String),

    /// Amount could not be converted to token units.
    #[error("Invalid amount '{amount}': {reason}")]
    InvalidAmount { amount: String, reason: String },

    /// Chain id is not in the network registry.
    #[error("Unknown network with chain id {0}")]
    UnknownNetwork(u64),

    /// The network has no manager contract configured.
    #[error("No manager address configured for chain id {0}")]
    MissingManager(u64),

    /// Contract return data could not be decoded.
    #[error("ABI error: {0}")]
    Abi(String),

    /// Safe collaborator failure.
    #[error("Safe error: {0}")]
    Safe(String),

    /// A share URL is missing or has malformed parameters.
    #[error("Invalid share URL: {0}")]
    InvalidShareUrl(String),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),
}

/// Result type for link operations.
pub type LinkResult<T> = Result<T, LinkError>;
