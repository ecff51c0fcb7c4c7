//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems emit tracing events with structured fields
//!     → logging.rs (EnvFilter + fmt subscriber)
//!     → stderr
//! ```
//!
//! Seeds, private keys and provider API keys are never recorded as fields.

pub mod logging;

pub use logging::{init_logging, redact_url};
