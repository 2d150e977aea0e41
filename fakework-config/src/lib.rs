//! Domain-driven configuration management for fakework
//!
//! Configuration is split by functional domain (endpoint, siege driver,
//! logging), loaded from YAML and/or environment variables, and validated
//! per domain.

pub mod error;
pub mod loader;
pub mod validation;

// Domain-specific configuration modules
pub mod domains;

// Re-export main types
pub use error::{ConfigError, ConfigResult};
pub use loader::ConfigLoader;

// Re-export domain configurations
pub use domains::{
    endpoint::{EndpointConfig, WorkDefaults},
    logging::{LogFormat, LogLevel, LoggingConfig},
    siege::SiegeConfig,
    FakeworkConfig,
};

// Re-export utilities
pub use domains::utils::serde_duration;
