//! Configuration loading and environment variable handling

use crate::domains::FakeworkConfig;
use crate::error::{ConfigError, ConfigResult};
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Configuration loader with environment variable support.
///
/// Prefixed variables (`FAKEWORK_*`) cover every domain. The siege driver
/// additionally honours the unprefixed names its shell predecessor used
/// (`HEROKU_APP`, `LOG`, `QUERY`, `MAX_CONC`), and the endpoint honours the
/// PaaS `PORT` convention. Prefixed variables win when both are set.
pub struct ConfigLoader {
    /// Environment variable prefix
    prefix: String,
}

impl ConfigLoader {
    /// Create a new config loader with default prefix
    pub fn new() -> Self {
        Self {
            prefix: "FAKEWORK".to_string(),
        }
    }

    /// Load configuration from a YAML file with environment overrides
    pub fn from_file(&self, path: impl AsRef<Path>) -> ConfigResult<FakeworkConfig> {
        let content = std::fs::read_to_string(path)?;
        let mut config: FakeworkConfig = serde_yaml::from_str(&content)?;

        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env(&self) -> ConfigResult<FakeworkConfig> {
        let mut config = FakeworkConfig::default();
        self.apply_env_overrides(&mut config)?;
        config.validate_all()?;
        Ok(config)
    }

    /// Load configuration with fallback chain
    pub fn load(&self, config_path: Option<impl AsRef<Path>>) -> ConfigResult<FakeworkConfig> {
        match config_path {
            Some(path) => self.from_file(path),
            None => self.from_env(),
        }
    }

    /// Apply environment variable overrides to configuration
    fn apply_env_overrides(&self, config: &mut FakeworkConfig) -> ConfigResult<()> {
        self.apply_endpoint_overrides(&mut config.endpoint)?;
        self.apply_siege_overrides(&mut config.siege)?;
        self.apply_logging_overrides(&mut config.logging)?;
        Ok(())
    }

    /// Apply endpoint config overrides
    fn apply_endpoint_overrides(
        &self,
        config: &mut crate::domains::endpoint::EndpointConfig,
    ) -> ConfigResult<()> {
        if let Ok(port) = std::env::var("PORT") {
            config.port = parse_var("PORT", &port)?;
        }

        if let Ok(bind) = self.get_env_var("SERVER_BIND_ADDRESS") {
            config.bind_address = bind;
        }

        if let Ok(port) = self.get_env_var("SERVER_PORT") {
            config.port = parse_var(&self.var_name("SERVER_PORT"), &port)?;
        }

        if let Ok(cap) = self.get_env_var("MAX_RESPONSE_CHARS") {
            config.max_response_chars = Some(parse_var(&self.var_name("MAX_RESPONSE_CHARS"), &cap)?);
        }

        Ok(())
    }

    /// Apply siege driver overrides
    fn apply_siege_overrides(
        &self,
        config: &mut crate::domains::siege::SiegeConfig,
    ) -> ConfigResult<()> {
        if let Ok(app) = std::env::var("HEROKU_APP") {
            config.app = app;
        }

        if let Ok(log_file) = std::env::var("LOG") {
            if !log_file.is_empty() {
                config.log_file = PathBuf::from(log_file);
            }
        }

        if let Ok(query) = std::env::var("QUERY") {
            config.query = query;
        }

        if let Ok(max_conc) = std::env::var("MAX_CONC") {
            config.max_concurrency = parse_var("MAX_CONC", &max_conc)?;
        }

        if let Ok(variants) = self.get_env_var("SIEGE_VARIANTS") {
            config.variants = split_list(&variants);
        }

        if let Ok(base_url) = self.get_env_var("SIEGE_BASE_URL") {
            config.base_url = Some(base_url);
        }

        Ok(())
    }

    /// Apply logging config overrides
    fn apply_logging_overrides(
        &self,
        config: &mut crate::domains::logging::LoggingConfig,
    ) -> ConfigResult<()> {
        if let Ok(log_level) = self.get_env_var("LOG_LEVEL") {
            config.level = crate::domains::logging::LogLevel::from_str(&log_level)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_LEVEL: {}", log_level)))?;
        }

        if let Ok(format) = self.get_env_var("LOG_FORMAT") {
            config.format = crate::domains::logging::LogFormat::from_str(&format)
                .map_err(|_| ConfigError::EnvError(format!("Invalid LOG_FORMAT: {}", format)))?;
        }

        Ok(())
    }

    fn var_name(&self, name: &str) -> String {
        format!("{}_{}", self.prefix, name)
    }

    /// Get environment variable with prefix
    fn get_env_var(&self, name: &str) -> Result<String, std::env::VarError> {
        std::env::var(self.var_name(name))
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_var<T>(name: &str, value: &str) -> ConfigResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e| ConfigError::EnvError(format!("Invalid {}: {}", name, e)))
}

/// Split a comma separated list, dropping blank entries
pub fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_list() {
        assert_eq!(split_list("puma, unicorn,,"), vec!["puma", "unicorn"]);
        assert!(split_list(" , ").is_empty());
    }

    #[test]
    fn test_parse_var_reports_name() {
        let err = parse_var::<u32>("MAX_CONC", "lots").unwrap_err();
        assert!(err.to_string().contains("Invalid MAX_CONC"));
        assert_eq!(parse_var::<u32>("MAX_CONC", " 7 ").unwrap(), 7);
    }
}
