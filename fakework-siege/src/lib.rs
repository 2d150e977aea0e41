//! Siege driver
//!
//! Deploys each server variant in turn, waits for it to settle, then runs
//! `siege` against `/fake_work` at concurrency 1 up to a maximum, sharing
//! one log file so the variants can be compared afterwards.
//!
//! Subprocesses go through the [`CommandRunner`] trait so the orchestration
//! can be exercised without running git or siege.

pub mod command;
pub mod driver;
pub mod error;
pub mod plan;
pub mod runner;

#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use command::{CommandOutcome, CommandSpec};
pub use driver::{run_siege, SiegeDriver, SiegeReport};
pub use error::{SiegeError, SiegeResult};
pub use plan::SiegePlan;
pub use runner::{CommandRunner, ProcessCommandRunner};
