//! Domain-specific configuration modules

pub mod endpoint;
pub mod logging;
pub mod siege;
pub mod utils;

use crate::error::ConfigResult;
use crate::validation::Validatable;
use serde::{Deserialize, Serialize};

/// Main fakework configuration combining all domains
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct FakeworkConfig {
    /// Fake-work endpoint (server) configuration
    #[serde(default)]
    pub endpoint: endpoint::EndpointConfig,

    /// Siege driver configuration
    #[serde(default)]
    pub siege: siege::SiegeConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: logging::LoggingConfig,
}

impl FakeworkConfig {
    /// Validate the domains that must be valid for every command.
    ///
    /// The siege domain is only checked when the driver starts, so serving
    /// does not require a target application.
    pub fn validate_all(&self) -> ConfigResult<()> {
        self.endpoint.validate()?;
        self.logging.validate()?;
        Ok(())
    }

    /// Generate a sample configuration file
    pub fn generate_sample() -> String {
        let config = FakeworkConfig::default();
        serde_yaml::to_string(&config)
            .unwrap_or_else(|_| "# Failed to generate sample config".to_string())
    }
}
