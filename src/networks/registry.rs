//! Resolved network descriptors and lookups.

use alloy::primitives::{Address, TxHash};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::config::schema::{LinkConfig, NetworkOverride, ProviderConfig};
use crate::config::validation::ValidationError;
use crate::networks::table::{NetworkTemplate, BUILTIN_NETWORKS, DEFAULT_MODULE};
use crate::networks::{Network, NetworkType};
use crate::observability::redact_url;

/// Everything this crate knows about one chain. Immutable after the
/// registry is built.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct NetworkDescriptor {
    pub network: Network,
    pub name: String,
    pub chain_id: u64,
    pub network_type: NetworkType,
    pub rpc_url: String,
    pub safe_service: Option<String>,
    pub block_explorer: Option<String>,
    pub api_url: Option<String>,
    pub eas_explorer: Option<String>,
    pub module_address: Address,
    pub manager_address: Option<Address>,
}

impl NetworkDescriptor {
    fn from_template(template: &NetworkTemplate, providers: &ProviderConfig, module: Address) -> Self {
        Self {
            network: template.network,
            name: template.name.to_string(),
            chain_id: template.chain_id,
            network_type: template.network_type,
            rpc_url: fill_keys(template.rpc_url, providers),
            safe_service: non_empty(template.safe_service),
            block_explorer: non_empty(template.block_explorer),
            api_url: non_empty(template.api_url).map(|u| fill_keys(&u, providers)),
            eas_explorer: non_empty(template.eas_explorer),
            module_address: module,
            manager_address: template.manager_address,
        }
    }

    /// Explorer page for a transaction, if the network has an explorer.
    pub fn tx_url(&self, hash: TxHash) -> Option<String> {
        self.block_explorer
            .as_ref()
            .map(|base| format!("{}/tx/{}", base.trim_end_matches('/'), hash))
    }

    /// Explorer page for an address, if the network has an explorer.
    pub fn address_url(&self, address: Address) -> Option<String> {
        self.block_explorer
            .as_ref()
            .map(|base| format!("{}/address/{}", base.trim_end_matches('/'), address))
    }
}

impl std::fmt::Debug for NetworkDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NetworkDescriptor")
            .field("network", &self.network)
            .field("chain_id", &self.chain_id)
            .field("rpc_url", &redact_url(&self.rpc_url))
            .field("safe_service", &self.safe_service)
            .field("api_url", &self.api_url.as_deref().map(redact_url))
            .field("module_address", &self.module_address)
            .field("manager_address", &self.manager_address)
            .finish_non_exhaustive()
    }
}

fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

fn fill_keys(template: &str, providers: &ProviderConfig) -> String {
    template
        .replace("{infura_key}", &providers.infura_api_key)
        .replace("{alchemy_key}", &providers.alchemy_api_key)
        .replace("{etherscan_key}", &providers.etherscan_api_key)
        .replace("{polygonscan_key}", &providers.polygonscan_api_key)
}

/// Registry of supported networks.
#[derive(Debug, Clone)]
pub struct NetworkRegistry {
    networks: Vec<NetworkDescriptor>,
}

impl NetworkRegistry {
    /// The built-in table with no API keys and the default module address.
    pub fn builtin() -> Self {
        let providers = ProviderConfig::default();
        Self {
            networks: BUILTIN_NETWORKS
                .iter()
                .map(|t| NetworkDescriptor::from_template(t, &providers, DEFAULT_MODULE))
                .collect(),
        }
    }

    /// Build the registry from configuration: fills API keys into URL
    /// templates and applies per-network overrides.
    pub fn from_config(config: &LinkConfig) -> Result<Self, ValidationError> {
        let module = parse_address("module.address", &config.module.address)?;

        let (overrides, errors) = overrides_by_network(&config.networks);
        if let Some(error) = errors.into_iter().next() {
            return Err(error);
        }

        let mut networks = Vec::with_capacity(BUILTIN_NETWORKS.len());
        for template in BUILTIN_NETWORKS {
            let mut descriptor = NetworkDescriptor::from_template(template, &config.providers, module);

            if let Some((name, overrides)) = overrides.get(&template.network) {
                if let Some(url) = &overrides.rpc_url {
                    descriptor.rpc_url = url.clone();
                }
                if let Some(address) = &overrides.module_address {
                    descriptor.module_address =
                        parse_address(&format!("networks.{name}.module_address"), address)?;
                }
                if let Some(address) = &overrides.manager_address {
                    descriptor.manager_address = Some(parse_address(
                        &format!("networks.{name}.manager_address"),
                        address,
                    )?);
                }
            }

            networks.push(descriptor);
        }

        Ok(Self { networks })
    }

    /// Look up a network by chain id. `None` for unregistered chains.
    pub fn get_network_by_id(&self, chain_id: u64) -> Option<&NetworkDescriptor> {
        self.networks.iter().find(|n| n.chain_id == chain_id)
    }

    /// Look up a network by symbolic name. Every `Network` has a row.
    pub fn get_network_by_name(&self, network: Network) -> &NetworkDescriptor {
        self.networks
            .iter()
            .find(|n| n.network == network)
            .unwrap_or_else(|| unreachable!("built-in table covers every Network variant"))
    }

    pub fn iter(&self) -> impl Iterator<Item = &NetworkDescriptor> {
        self.networks.iter()
    }
}

impl Default for NetworkRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Resolve `[networks.<name>]` keys to networks.
///
/// Keys match the way [`Network`]'s `FromStr` does, so `Sepolia` and
/// `sepolia` name the same network and may not both appear. Each entry
/// keeps the key as written for error messages.
pub fn overrides_by_network(
    overrides: &BTreeMap<String, NetworkOverride>,
) -> (BTreeMap<Network, (&str, &NetworkOverride)>, Vec<ValidationError>) {
    let mut resolved: BTreeMap<Network, (&str, &NetworkOverride)> = BTreeMap::new();
    let mut errors = Vec::new();

    for (name, entry) in overrides {
        let network = match name.parse::<Network>() {
            Ok(network) => network,
            Err(_) => {
                errors.push(ValidationError::UnknownNetwork(name.clone()));
                continue;
            }
        };
        if let Some((first, _)) = resolved.get(&network) {
            errors.push(ValidationError::DuplicateNetwork {
                first: first.to_string(),
                second: name.clone(),
            });
            continue;
        }
        resolved.insert(network, (name.as_str(), entry));
    }

    (resolved, errors)
}

fn parse_address(field: &str, value: &str) -> Result<Address, ValidationError> {
    value.parse().map_err(|_| ValidationError::InvalidAddress {
        field: field.to_string(),
        value: value.to_string(),
    })
}
