//! Error types for the siege driver

use fakework_config::ConfigError;
use thiserror::Error;

/// Result type for driver operations
pub type SiegeResult<T> = Result<T, SiegeError>;

#[derive(Error, Debug)]
pub enum SiegeError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Deploy of variant '{variant}' failed ({status}): {stderr}")]
    DeployFailed {
        variant: String,
        /// Rendered exit status, e.g. `exit status 1`
        status: String,
        stderr: String,
    },

    #[error("Failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
}
