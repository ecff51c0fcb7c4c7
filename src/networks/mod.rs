//! Network registry subsystem.
//!
//! # Data Flow
//! ```text
//! table.rs (static per-chain constants, URL templates)
//!     + LinkConfig (API keys, per-network overrides)
//!     → registry.rs (resolved, immutable NetworkDescriptors)
//!     → lookups by chain id or symbolic name
//! ```

pub mod registry;
pub mod table;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

pub use registry::{overrides_by_network, NetworkDescriptor, NetworkRegistry};

/// Symbolic name of a supported network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
    Localhost,
    Mainnet,
    Goerli,
    Sepolia,
    BaseGoerli,
    Base,
    Optimism,
    Gnosis,
    PolygonTestnet,
    Polygon,
    Celo,
}

impl Network {
    pub const ALL: &'static [Network] = &[
        Network::Localhost,
        Network::Mainnet,
        Network::Goerli,
        Network::Sepolia,
        Network::BaseGoerli,
        Network::Base,
        Network::Optimism,
        Network::Gnosis,
        Network::PolygonTestnet,
        Network::Polygon,
        Network::Celo,
    ];

    /// Key used in configuration files and on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Network::Localhost => "localhost",
            Network::Mainnet => "mainnet",
            Network::Goerli => "goerli",
            Network::Sepolia => "sepolia",
            Network::BaseGoerli => "basegoerli",
            Network::Base => "base",
            Network::Optimism => "optimism",
            Network::Gnosis => "gnosis",
            Network::PolygonTestnet => "polygontestnet",
            Network::Polygon => "polygon",
            Network::Celo => "celo",
        }
    }
}

impl fmt::Display for Network {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown network '{0}'")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
    type Err = UnknownNetwork;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Network::ALL
            .iter()
            .copied()
            .find(|n| n.as_str() == wanted)
            .ok_or_else(|| UnknownNetwork(s.to_string()))
    }
}

/// Whether a network carries real value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkType {
    Mainnet,
    Testnet,
}

impl fmt::Display for NetworkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NetworkType::Mainnet => f.write_str("mainnet"),
            NetworkType::Testnet => f.write_str("testnet"),
        }
    }
}
