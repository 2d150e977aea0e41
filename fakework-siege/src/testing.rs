//! Test doubles for [`CommandRunner`]
//!
//! `RecordingRunner` records every command and answers from simple failure
//! rules; `MockRunner` is the mockall double for expectation-style tests.

use async_trait::async_trait;
use mockall::mock;
use std::sync::Mutex;

use crate::command::{CommandOutcome, CommandSpec};
use crate::error::SiegeResult;
use crate::runner::CommandRunner;

mock! {
    pub Runner {}

    #[async_trait]
    impl CommandRunner for Runner {
        async fn run(&self, command: &CommandSpec) -> SiegeResult<CommandOutcome>;
    }
}

/// Records calls in order; succeeds unless a failure rule matches
#[derive(Debug, Default)]
pub struct RecordingRunner {
    calls: Mutex<Vec<CommandSpec>>,
    failing_deploys: Vec<String>,
    fail_siege_runs: bool,
}

impl RecordingRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the deploy of `variant` exit with status 1
    pub fn failing_deploy_of(mut self, variant: impl Into<String>) -> Self {
        self.failing_deploys.push(variant.into());
        self
    }

    /// Make every non-deploy command exit with status 1
    pub fn failing_siege_runs(mut self) -> Self {
        self.fail_siege_runs = true;
        self
    }

    /// Snapshot of the commands run so far
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn is_failing_deploy(&self, command: &CommandSpec) -> bool {
        command.has_arg("push")
            && self.failing_deploys.iter().any(|variant| {
                command
                    .args
                    .iter()
                    .any(|a| a.starts_with(&format!("origin/{}:", variant)))
            })
    }
}

#[async_trait]
impl CommandRunner for RecordingRunner {
    async fn run(&self, command: &CommandSpec) -> SiegeResult<CommandOutcome> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.clone());
        }

        let failed = if command.has_arg("push") {
            self.is_failing_deploy(command)
        } else {
            self.fail_siege_runs
        };

        if failed {
            Ok(CommandOutcome {
                status: Some(1),
                stderr: format!("{} failed", command.program),
                ..Default::default()
            })
        } else {
            Ok(CommandOutcome::success())
        }
    }
}
