//! Payment links.
//!
//! # Data Flow
//! ```text
//! create:  seed (CSPRNG) → keys.rs (authority address)
//!          → contract.rs (createLink calldata) → SafeApp batch
//!          → CreatedLink { i, p, c } → share.rs (URL)
//!
//! claim:   share URL / seed → keys.rs (claim signature for the claimant)
//!          → contract.rs (claimLink calldata) → TransactionSender
//! ```
//!
//! The seed never leaves this module except inside [`CreatedLink`].

pub mod amount;
pub mod contract;
pub mod keys;
pub mod service;
pub mod share;
pub mod types;

pub use service::LinkService;
pub use types::{CreatedLink, LinkError, LinkKeyPair, LinkRecord, LinkResult, SafeTransaction};
