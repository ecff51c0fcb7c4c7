//! Configuration validation.
//!
//! Serde handles syntax; this module checks semantics. Validation is a pure
//! function `&LinkConfig -> Result<(), Vec<ValidationError>>` and reports
//! every problem, not just the first.

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::LinkConfig;
use crate::networks::overrides_by_network;

/// Shortest seed accepted for generated links.
pub const MIN_SEED_LENGTH: usize = 12;

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: invalid address '{value}'")]
    InvalidAddress { field: String, value: String },

    #[error("{field}: must be greater than zero")]
    Zero { field: String },

    #[error("unknown network '{0}'")]
    UnknownNetwork(String),

    #[error("module.seed_length: {0} is shorter than the minimum of {min}", min = MIN_SEED_LENGTH)]
    SeedTooShort(usize),

    #[error("{field}: invalid URL '{value}'")]
    InvalidUrl { field: String, value: String },

    #[error("{field}: must be a finite number greater than zero")]
    NotPositive { field: String },

    #[error("networks: '{first}' and '{second}' name the same network")]
    DuplicateNetwork { first: String, second: String },
}

/// Validate a parsed configuration.
pub fn validate_config(config: &LinkConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    check_address("module.address", &config.module.address, &mut errors);

    if config.module.seed_length < MIN_SEED_LENGTH {
        errors.push(ValidationError::SeedTooShort(config.module.seed_length));
    }

    if config.providers.rpc_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "providers.rpc_timeout_secs".to_string(),
        });
    }

    for url in &config.providers.failover_urls {
        check_url("providers.failover_urls", url, &mut errors);
    }

    if let Some(address) = &config.safe.address {
        check_address("safe.address", address, &mut errors);
    }

    if let Some(url) = &config.safe.service_url {
        check_url("safe.service_url", url, &mut errors);
    }

    if config.safe.chain_id == 0 {
        errors.push(ValidationError::Zero {
            field: "safe.chain_id".to_string(),
        });
    }

    if config.relayer.confirmation_timeout_secs == 0 {
        errors.push(ValidationError::Zero {
            field: "relayer.confirmation_timeout_secs".to_string(),
        });
    }

    if config.relayer.gas_limit == 0 {
        errors.push(ValidationError::Zero {
            field: "relayer.gas_limit".to_string(),
        });
    }

    let multiplier = config.relayer.gas_price_multiplier;
    if !multiplier.is_finite() || multiplier <= 0.0 {
        errors.push(ValidationError::NotPositive {
            field: "relayer.gas_price_multiplier".to_string(),
        });
    }

    let (overrides, override_errors) = overrides_by_network(&config.networks);
    errors.extend(override_errors);
    for (name, overrides) in overrides.values() {
        if let Some(url) = &overrides.rpc_url {
            check_url(&format!("networks.{name}.rpc_url"), url, &mut errors);
        }
        if let Some(address) = &overrides.module_address {
            check_address(&format!("networks.{name}.module_address"), address, &mut errors);
        }
        if let Some(address) = &overrides.manager_address {
            check_address(&format!("networks.{name}.manager_address"), address, &mut errors);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_address(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if value.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}

fn check_url(field: &str, value: &str, errors: &mut Vec<ValidationError>) {
    if url::Url::parse(value).is_err() {
        errors.push(ValidationError::InvalidUrl {
            field: field.to_string(),
            value: value.to_string(),
        });
    }
}
