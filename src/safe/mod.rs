//! Safe connectivity and multisig batch submission.
//!
//! # Data Flow
//! ```text
//! SafeConfig (address, chain) + NetworkRegistry (transaction service URL)
//!     → service.rs (Safe info over REST, batch export for owners)
//!     → LinkService::create_link
//! ```
//!
//! Link creation moves Safe funds, so it always goes through owner
//! approval: this crate only prepares the batch.

pub mod service;

use alloy::primitives::Address;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::link::types::{LinkResult, SafeTransaction};

pub use service::SafeServiceApp;

/// What is known about the connected Safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeInfo {
    pub address: Address,
    pub chain_id: u64,
    /// Owner approvals required, when the transaction service reports it.
    pub threshold: Option<u32>,
    pub owners: Vec<Address>,
    pub nonce: Option<u64>,
}

/// The Safe a link is funded from.
#[async_trait]
pub trait SafeApp: Send + Sync {
    /// Whether a Safe is available to submit transactions to.
    async fn is_connected(&self) -> bool;

    /// Details of the connected Safe.
    async fn safe_info(&self) -> LinkResult<SafeInfo>;

    /// Hand a batch of calls to the Safe for multisig execution. Returns a
    /// reference the owners can use to find the batch.
    async fn submit_txs(&self, txs: &[SafeTransaction]) -> LinkResult<String>;
}
