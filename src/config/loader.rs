//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::LinkConfig;
use crate::config::validation::{validate_config, ValidationError};

pub const INFURA_KEY_ENV_VAR: &str = "SAFE2LINK_INFURA_API_KEY";
pub const ALCHEMY_KEY_ENV_VAR: &str = "SAFE2LINK_ALCHEMY_API_KEY";
pub const ETHERSCAN_KEY_ENV_VAR: &str = "SAFE2LINK_ETHERSCAN_API_KEY";
pub const POLYGONSCAN_KEY_ENV_VAR: &str = "SAFE2LINK_POLYGONSCAN_API_KEY";
pub const SAFE_ADDRESS_ENV_VAR: &str = "SAFE2LINK_SAFE_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load, apply environment overrides, and validate a TOML config file.
pub fn load_config(path: &Path) -> Result<LinkConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: LinkConfig = toml::from_str(&content)?;
    finish(config)
}

/// Build a configuration from defaults plus environment overrides.
pub fn load_default() -> Result<LinkConfig, ConfigError> {
    finish(LinkConfig::default())
}

fn finish(mut config: LinkConfig) -> Result<LinkConfig, ConfigError> {
    apply_env_overrides(&mut config, |name| std::env::var(name).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Environment values win over the file.
pub fn apply_env_overrides<F>(config: &mut LinkConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let providers = &mut config.providers;
    for (var, slot) in [
        (INFURA_KEY_ENV_VAR, &mut providers.infura_api_key),
        (ALCHEMY_KEY_ENV_VAR, &mut providers.alchemy_api_key),
        (ETHERSCAN_KEY_ENV_VAR, &mut providers.etherscan_api_key),
        (POLYGONSCAN_KEY_ENV_VAR, &mut providers.polygonscan_api_key),
    ] {
        if let Some(value) = lookup(var).filter(|v| !v.is_empty()) {
            *slot = value;
        }
    }

    if let Some(address) = lookup(SAFE_ADDRESS_ENV_VAR).filter(|v| !v.is_empty()) {
        config.safe.address = Some(address);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_env_overrides_file_values() {
        let mut config: LinkConfig = toml::from_str(
            r#"
            [providers]
            infura_api_key = "from-file"
            alchemy_api_key = "alchemy-file"
            "#,
        )
        .unwrap();

        let env: HashMap<&str, &str> = [
            (INFURA_KEY_ENV_VAR, "from-env"),
            (ALCHEMY_KEY_ENV_VAR, ""),
            (SAFE_ADDRESS_ENV_VAR, "0x000000000000000000000000000000000000dEaD"),
        ]
        .into_iter()
        .collect();
        apply_env_overrides(&mut config, |name| env.get(name).map(|v| v.to_string()));

        assert_eq!(config.providers.infura_api_key, "from-env");
        assert_eq!(config.providers.alchemy_api_key, "alchemy-file");
        assert_eq!(
            config.safe.address.as_deref(),
            Some("0x000000000000000000000000000000000000dEaD")
        );
    }

    #[test]
    fn test_load_config_reports_validation_errors() {
        let path = std::env::temp_dir().join("safe2link_invalid_config.toml");
        fs::write(&path, "[module]\nseed_length = 3\n").unwrap();

        let err = load_config(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("seed_length"));

        fs::remove_file(&path).unwrap_or_default();
    }

    #[test]
    fn test_load_config_missing_file() {
        let err = load_config(Path::new("/definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }
}
