//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! safe2link.toml (optional)
//!     → loader.rs (parse & deserialize, environment overrides)
//!     → validation.rs (semantic checks)
//!     → LinkConfig (validated, immutable)
//!     → NetworkRegistry / LinkService
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Provider API keys and the Safe address may come from the environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, load_default, ConfigError};
pub use schema::{
    LinkConfig, ModuleConfig, NetworkOverride, ObservabilityConfig, ProviderConfig,
    RelayerConfig, SafeConfig,
};
