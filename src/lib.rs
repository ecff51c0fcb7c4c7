//! Safe2Link: shareable payment links funded by a Safe multisig.
//!
//! A link is a record in the link module contract holding a token amount
//! and a claim authority address. The authority is derived from a random
//! seed; the seed travels in a share URL and whoever holds it can sign a
//! claim for their own address.

pub mod blockchain;
pub mod config;
pub mod link;
pub mod networks;
pub mod observability;
pub mod safe;

pub use config::schema::LinkConfig;
pub use link::{CreatedLink, LinkError, LinkService};
pub use networks::{Network, NetworkRegistry};
