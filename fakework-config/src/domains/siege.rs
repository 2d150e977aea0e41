//! Siege driver configuration
//!
//! The driver deploys each variant (a git branch) to the target application
//! and then runs `siege` at increasing concurrency against `/fake_work`.

use crate::error::ConfigResult;
use crate::validation::{validate_http_url, validate_positive, validate_required_string, Validatable};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Siege driver configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiegeConfig {
    /// Target application name. Always required: it names the deploy target
    /// and, without `base_url`, the probe host
    #[serde(default)]
    pub app: String,

    /// Explicit base URL, overriding the one derived from `app`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Query string appended to every probe request
    #[serde(default)]
    pub query: String,

    /// Shared siege log file
    #[serde(default = "default_log_file")]
    pub log_file: PathBuf,

    /// Highest concurrency level of the ramp (inclusive)
    #[serde(default = "default_max_concurrency")]
    pub max_concurrency: u32,

    /// Ordered variant (branch) names
    #[serde(default = "default_variants")]
    pub variants: Vec<String>,

    /// Git remote the variants are pushed to
    #[serde(default = "default_deploy_remote")]
    pub deploy_remote: String,

    /// Branch on the remote that triggers a deploy
    #[serde(default = "default_deploy_branch")]
    pub deploy_branch: String,

    /// Wait after a deploy before the ramp starts
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_settle_delay")]
    pub settle_delay: Duration,

    /// Wait before each siege run
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_drain_delay")]
    pub drain_delay: Duration,

    /// Length of each siege run
    #[serde(with = "crate::domains::utils::serde_duration", default = "default_run_duration")]
    pub run_duration: Duration,

    /// Load generation binary
    #[serde(default = "default_siege_program")]
    pub siege_program: String,

    /// Deploy binary
    #[serde(default = "default_git_program")]
    pub git_program: String,
}

impl Default for SiegeConfig {
    fn default() -> Self {
        Self {
            app: String::new(),
            base_url: None,
            query: String::new(),
            log_file: default_log_file(),
            max_concurrency: default_max_concurrency(),
            variants: default_variants(),
            deploy_remote: default_deploy_remote(),
            deploy_branch: default_deploy_branch(),
            settle_delay: default_settle_delay(),
            drain_delay: default_drain_delay(),
            run_duration: default_run_duration(),
            siege_program: default_siege_program(),
            git_program: default_git_program(),
        }
    }
}

impl SiegeConfig {
    /// Base URL of the deployment under test, without a trailing slash
    pub fn resolved_base_url(&self) -> String {
        match &self.base_url {
            Some(url) => url.trim_end_matches('/').to_string(),
            None => format!("http://{}.herokuapp.com", self.app),
        }
    }

    /// Full probe URL for `/fake_work` including the configured query
    pub fn target_url(&self) -> String {
        format!(
            "{}/fake_work?{}",
            self.resolved_base_url(),
            self.query.trim_start_matches('?')
        )
    }
}

impl Validatable for SiegeConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.app.trim().is_empty() {
            return Err(self.validation_error(
                "target application name is not set (HEROKU_APP or --app)",
            ));
        }
        if let Some(url) = &self.base_url {
            validate_http_url(url, "base_url", self.domain_name())?;
        }
        validate_positive(self.max_concurrency, "max_concurrency", self.domain_name())?;

        if self.variants.is_empty() {
            return Err(self.validation_error("at least one variant is required"));
        }
        for variant in &self.variants {
            validate_required_string(variant, "variant", self.domain_name())?;
        }

        validate_required_string(&self.deploy_remote, "deploy_remote", self.domain_name())?;
        validate_required_string(&self.deploy_branch, "deploy_branch", self.domain_name())?;
        validate_required_string(&self.siege_program, "siege_program", self.domain_name())?;
        validate_required_string(&self.git_program, "git_program", self.domain_name())?;

        if self.run_duration.as_secs() == 0 {
            return Err(self.validation_error("run_duration must be at least one second"));
        }

        Ok(())
    }

    fn domain_name(&self) -> &'static str {
        "siege"
    }
}

fn default_log_file() -> PathBuf {
    PathBuf::from("siege.log")
}

fn default_max_concurrency() -> u32 {
    20
}

fn default_variants() -> Vec<String> {
    [
        "unicorn",
        "unicorn_4_workers",
        "puma",
        "puma_clustered",
        "puma_clustered_4_workers",
    ]
    .iter()
    .map(|v| v.to_string())
    .collect()
}

fn default_deploy_remote() -> String {
    "heroku".to_string()
}

fn default_deploy_branch() -> String {
    "master".to_string()
}

fn default_settle_delay() -> Duration {
    Duration::from_secs(12)
}

fn default_drain_delay() -> Duration {
    Duration::from_secs(10)
}

fn default_run_duration() -> Duration {
    Duration::from_secs(30)
}

fn default_siege_program() -> String {
    "siege".to_string()
}

fn default_git_program() -> String {
    "git".to_string()
}
