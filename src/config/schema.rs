//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from `safe2link.toml`.
//! Every field has a default so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::observability::redact_url;

/// Module contract deployed on every supported network.
pub const DEFAULT_MODULE_ADDRESS: &str = "0x664e3acE00b41ab503936010c7EBa9c7Fe24A4B9";

/// Length of generated link seeds.
pub const DEFAULT_SEED_LENGTH: usize = 18;

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct LinkConfig {
    /// Observability settings.
    pub observability: ObservabilityConfig,

    /// RPC provider settings and API keys.
    pub providers: ProviderConfig,

    /// Link module settings.
    pub module: ModuleConfig,

    /// Connected Safe.
    pub safe: SafeConfig,

    /// Relayer account used for claims.
    pub relayer: RelayerConfig,

    /// Per-network overrides keyed by symbolic network name (e.g. "sepolia").
    pub networks: BTreeMap<String, NetworkOverride>,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// RPC provider configuration.
///
/// API keys are substituted into the network table's URL templates. They are
/// never logged.
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ProviderConfig {
    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,

    /// Failover JSON-RPC endpoint URLs, tried after the network's own URL.
    pub failover_urls: Vec<String>,

    pub infura_api_key: String,
    pub alchemy_api_key: String,
    pub etherscan_api_key: String,
    pub polygonscan_api_key: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            rpc_timeout_secs: 10,
            failover_urls: Vec::new(),
            infura_api_key: String::new(),
            alchemy_api_key: String::new(),
            etherscan_api_key: String::new(),
            polygonscan_api_key: String::new(),
        }
    }
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("rpc_timeout_secs", &self.rpc_timeout_secs)
            .field(
                "failover_urls",
                &self.failover_urls.iter().map(|u| redact_url(u)).collect::<Vec<_>>(),
            )
            .field("infura_api_key", &redact(&self.infura_api_key))
            .field("alchemy_api_key", &redact(&self.alchemy_api_key))
            .field("etherscan_api_key", &redact(&self.etherscan_api_key))
            .field("polygonscan_api_key", &redact(&self.polygonscan_api_key))
            .finish()
    }
}

fn redact(value: &str) -> &'static str {
    if value.is_empty() {
        "<unset>"
    } else {
        "<redacted>"
    }
}

/// Link module configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModuleConfig {
    /// Default module contract address, used unless a network overrides it.
    pub address: String,

    /// Number of characters in generated link seeds.
    pub seed_length: usize,
}

impl Default for ModuleConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_MODULE_ADDRESS.to_string(),
            seed_length: DEFAULT_SEED_LENGTH,
        }
    }
}

/// Safe connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SafeConfig {
    /// Safe address. No address means "not connected".
    pub address: Option<String>,

    /// Chain the Safe lives on.
    pub chain_id: u64,

    /// Directory batch files are written to for owners to import.
    pub batch_output_dir: String,

    /// Safe transaction service base URL. Defaults to the network's own.
    pub service_url: Option<String>,
}

impl Default for SafeConfig {
    fn default() -> Self {
        Self {
            address: None,
            chain_id: 1,
            batch_output_dir: ".".to_string(),
            service_url: None,
        }
    }
}

/// Relayer account configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RelayerConfig {
    /// How long to wait for a claim transaction receipt.
    pub confirmation_timeout_secs: u64,

    /// Blocks required on top of the claim transaction.
    pub confirmation_blocks: u32,

    /// Fixed gas limit for claim transactions.
    pub gas_limit: u64,

    /// Gas price multiplier (1.0 = node price, 1.2 = 20% buffer).
    pub gas_price_multiplier: f64,

    /// Maximum gas price in gwei (protection against spikes).
    pub max_gas_price_gwei: u64,
}

impl Default for RelayerConfig {
    fn default() -> Self {
        Self {
            confirmation_timeout_secs: 120,
            confirmation_blocks: 1,
            gas_limit: 300_000,
            gas_price_multiplier: 1.2,
            max_gas_price_gwei: 500,
        }
    }
}

/// Per-network overrides of the built-in table.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct NetworkOverride {
    pub rpc_url: Option<String>,
    pub module_address: Option<String>,
    pub manager_address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_uses_defaults() {
        let config: LinkConfig = toml::from_str("").unwrap();
        assert_eq!(config.module.address, DEFAULT_MODULE_ADDRESS);
        assert_eq!(config.module.seed_length, 18);
        assert_eq!(config.providers.rpc_timeout_secs, 10);
        assert!(config.safe.address.is_none());
        assert!(config.networks.is_empty());
    }

    #[test]
    fn test_network_overrides_parse() {
        let config: LinkConfig = toml::from_str(
            r#"
            [networks.localhost]
            rpc_url = "http://127.0.0.1:9545"
            manager_address = "0x6CB0CcE62E70BF2e88EEeb125197A133873525A7"
            "#,
        )
        .unwrap();
        let local = &config.networks["localhost"];
        assert_eq!(local.rpc_url.as_deref(), Some("http://127.0.0.1:9545"));
        assert!(local.module_address.is_none());
    }

    #[test]
    fn test_debug_redacts_api_keys() {
        let providers = ProviderConfig {
            infura_api_key: "super-secret".to_string(),
            failover_urls: vec!["https://eth-mainnet.g.alchemy.com/v2/other-secret".to_string()],
            ..Default::default()
        };
        let rendered = format!("{:?}", providers);
        assert!(!rendered.contains("super-secret"));
        assert!(!rendered.contains("other-secret"));
        assert!(rendered.contains("<redacted>"));
    }
}
