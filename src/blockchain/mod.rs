//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! NetworkDescriptor (RPC URL) + ProviderConfig (timeouts, failovers)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (build, sign, broadcast, confirm)
//!
//! Environment variable (relayer private key) or fresh random key
//!     → wallet.rs (key loading, signing)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables or generated in memory
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Writes are never retried

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::{RelayerAccount, TransactionSender};
pub use types::{BlockchainError, BlockchainResult, ChainId};
pub use wallet::Wallet;
