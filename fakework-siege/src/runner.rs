//! Subprocess execution

use async_trait::async_trait;
use std::process::Stdio;
use tokio::process::Command;
use tracing::debug;

use crate::command::{CommandOutcome, CommandSpec};
use crate::error::{SiegeError, SiegeResult};

/// Runs a command to completion and reports its exit status
#[async_trait]
pub trait CommandRunner: Send + Sync {
    async fn run(&self, command: &CommandSpec) -> SiegeResult<CommandOutcome>;
}

/// Runs commands as real child processes with captured output
#[derive(Debug, Clone, Default)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandRunner for ProcessCommandRunner {
    async fn run(&self, command: &CommandSpec) -> SiegeResult<CommandOutcome> {
        debug!("Executing command: {}", command);

        let output = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .await
            .map_err(|source| SiegeError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let outcome = CommandOutcome {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        debug!("Command finished with {}", outcome.describe_status());
        debug!("stdout: {}", outcome.stdout);
        debug!("stderr: {}", outcome.stderr);

        Ok(outcome)
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_captures_exit_status_and_output() {
        let runner = ProcessCommandRunner::new();

        let outcome = runner
            .run(&CommandSpec::new("sh").args(["-c", "echo out; echo err >&2; exit 3"]))
            .await
            .unwrap();

        assert_eq!(outcome.status, Some(3));
        assert_eq!(outcome.stdout.trim(), "out");
        assert_eq!(outcome.stderr.trim(), "err");
        assert!(!outcome.is_success());
    }

    #[tokio::test]
    async fn test_success() {
        let outcome = ProcessCommandRunner::new()
            .run(&CommandSpec::new("true"))
            .await
            .unwrap();
        assert!(outcome.is_success());
    }

    #[tokio::test]
    async fn test_missing_program_is_spawn_error() {
        let err = ProcessCommandRunner::new()
            .run(&CommandSpec::new("fakework-no-such-program-xyz"))
            .await
            .unwrap_err();
        assert!(matches!(err, SiegeError::Spawn { .. }));
    }
}
