//! Validated run plan: which commands to run and how long to wait

use std::time::Duration;

use fakework_config::validation::Validatable;
use fakework_config::SiegeConfig;

use crate::command::CommandSpec;
use crate::error::SiegeResult;

/// A validated siege run, built once from [`SiegeConfig`]
#[derive(Debug, Clone)]
pub struct SiegePlan {
    config: SiegeConfig,
    target_url: String,
}

impl SiegePlan {
    /// Validate the configuration and freeze it into a plan.
    ///
    /// Fails when no target application is configured, before anything runs.
    pub fn from_config(config: &SiegeConfig) -> SiegeResult<Self> {
        config.validate()?;

        Ok(Self {
            target_url: config.target_url(),
            config: config.clone(),
        })
    }

    pub fn variants(&self) -> &[String] {
        &self.config.variants
    }

    pub fn max_concurrency(&self) -> u32 {
        self.config.max_concurrency
    }

    pub fn target_url(&self) -> &str {
        &self.target_url
    }

    pub fn settle_delay(&self) -> Duration {
        self.config.settle_delay
    }

    pub fn drain_delay(&self) -> Duration {
        self.config.drain_delay
    }

    /// Total number of siege runs the plan will perform
    pub fn total_runs(&self) -> usize {
        self.config.variants.len() * self.config.max_concurrency as usize
    }

    /// `git push -f <remote> origin/<variant>:<branch>`
    pub fn deploy_command(&self, variant: &str) -> CommandSpec {
        CommandSpec::new(&self.config.git_program).args([
            "push".to_string(),
            "-f".to_string(),
            self.config.deploy_remote.clone(),
            format!("origin/{}:{}", variant, self.config.deploy_branch),
        ])
    }

    /// `siege -b -c<n> -t<secs>s <url> -l<log> [-m <variant>]`
    ///
    /// Only the first run of a variant carries the marker.
    pub fn siege_command(&self, variant: &str, concurrency: u32) -> CommandSpec {
        let command = CommandSpec::new(&self.config.siege_program).args([
            "-b".to_string(),
            format!("-c{}", concurrency),
            format!("-t{}s", self.config.run_duration.as_secs()),
            self.target_url.clone(),
            format!("-l{}", self.config.log_file.display()),
        ]);

        if concurrency == 1 {
            command.args(["-m", variant])
        } else {
            command
        }
    }
}
