//! Fake-work endpoint (HTTP server) configuration

use crate::error::ConfigResult;
use crate::validation::{validate_port_range, validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};

/// Endpoint server configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EndpointConfig {
    /// Server bind address
    #[serde(default = "default_bind_address")]
    pub bind_address: String,

    /// Server port
    #[serde(default = "default_port")]
    pub port: u16,

    /// Whether to attach the HTTP trace layer
    #[serde(default = "crate::domains::utils::default_true")]
    pub enable_tracing: bool,

    /// Upper bound applied to `response_chars`. Unset means unbounded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_response_chars: Option<u64>,

    /// Values used when a query parameter is absent
    #[serde(default)]
    pub defaults: WorkDefaults,
}

/// Parameter defaults for `/fake_work`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct WorkDefaults {
    pub cpu_ms: u64,
    pub iowait_ms: u64,
    pub response_chars: u64,
}

impl Default for WorkDefaults {
    fn default() -> Self {
        Self {
            cpu_ms: 50,
            iowait_ms: 250,
            response_chars: 20_000,
        }
    }
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            port: default_port(),
            enable_tracing: true,
            max_response_chars: None,
            defaults: WorkDefaults::default(),
        }
    }
}

impl EndpointConfig {
    /// `host:port` string suitable for binding a listener
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.bind_address, self.port)
    }
}

impl Validatable for EndpointConfig {
    fn validate(&self) -> ConfigResult<()> {
        validate_required_string(&self.bind_address, "bind_address", self.domain_name())?;
        validate_port_range(self.port, "port", self.domain_name())?;

        if let Some(cap) = self.max_response_chars {
            validate_positive(cap, "max_response_chars", self.domain_name())?;
            if self.defaults.response_chars > cap {
                return Err(self.validation_error(format!(
                    "defaults.response_chars ({}) exceeds max_response_chars ({})",
                    self.defaults.response_chars, cap
                )));
            }
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "endpoint"
    }
}

fn default_bind_address() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}
