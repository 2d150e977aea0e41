//! Sequential deploy + concurrency ramp orchestration

use fakework_config::SiegeConfig;
use tracing::{error, info, warn};

use crate::error::{SiegeError, SiegeResult};
use crate::plan::SiegePlan;
use crate::runner::CommandRunner;

/// What a completed run did
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiegeReport {
    /// Variants that were deployed, in order
    pub variants: Vec<String>,
    pub deploys: usize,
    pub siege_runs: usize,
    /// Runs that carried a variant marker
    pub marked_runs: usize,
    /// Siege runs that could not be spawned or exited non-zero
    pub failed_runs: usize,
    /// Per-run summaries siege printed on stderr, in run order
    pub summaries: Vec<String>,
}

/// Drives one plan through a [`CommandRunner`].
///
/// Variants are processed strictly one after another; nothing here runs in
/// parallel.
pub struct SiegeDriver<'a, R: CommandRunner + ?Sized> {
    plan: SiegePlan,
    runner: &'a R,
}

impl<'a, R: CommandRunner + ?Sized> SiegeDriver<'a, R> {
    pub fn new(plan: SiegePlan, runner: &'a R) -> Self {
        Self { plan, runner }
    }

    /// Deploy and ramp every variant. Stops at the first failed deploy.
    pub async fn run(&self) -> SiegeResult<SiegeReport> {
        info!(
            "Sieging {} with {} variant(s), concurrency 1..={} ({} runs)",
            self.plan.target_url(),
            self.plan.variants().len(),
            self.plan.max_concurrency(),
            self.plan.total_runs()
        );

        let mut report = SiegeReport::default();

        for variant in self.plan.variants() {
            self.deploy(variant).await?;
            report.deploys += 1;
            report.variants.push(variant.clone());

            tokio::time::sleep(self.plan.settle_delay()).await;

            for concurrency in 1..=self.plan.max_concurrency() {
                tokio::time::sleep(self.plan.drain_delay()).await;

                self.siege(variant, concurrency, &mut report).await;
                report.siege_runs += 1;
                if concurrency == 1 {
                    report.marked_runs += 1;
                }
            }

            info!("Variant '{}' complete", variant);
        }

        info!(
            "Siege finished: {} deploys, {} runs ({} failed)",
            report.deploys, report.siege_runs, report.failed_runs
        );

        Ok(report)
    }

    async fn deploy(&self, variant: &str) -> SiegeResult<()> {
        let command = self.plan.deploy_command(variant);
        info!("Deploying variant '{}': {}", variant, command);

        let outcome = self.runner.run(&command).await.inspect_err(|e| {
            error!("Deploy of '{}' could not be started: {}", variant, e);
        })?;

        if !outcome.is_success() {
            error!(
                "Deploy of '{}' failed with {}, aborting the remaining run",
                variant,
                outcome.describe_status()
            );
            return Err(SiegeError::DeployFailed {
                variant: variant.to_string(),
                status: outcome.describe_status(),
                stderr: outcome.stderr.trim().to_string(),
            });
        }

        Ok(())
    }

    /// Run siege once; failures are logged and otherwise ignored.
    ///
    /// siege reports its transaction summary on stderr, which is surfaced at
    /// info level and kept in the report.
    async fn siege(&self, variant: &str, concurrency: u32, report: &mut SiegeReport) {
        let command = self.plan.siege_command(variant, concurrency);
        info!("{}", command);

        let outcome = match self.runner.run(&command).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("siege for '{}' at concurrency {} failed: {}", variant, concurrency, e);
                report.failed_runs += 1;
                return;
            }
        };

        let summary = outcome.stderr.trim();
        if !summary.is_empty() {
            info!("siege summary for '{}' at concurrency {}:\n{}", variant, concurrency, summary);
            report.summaries.push(summary.to_string());
        }

        if !outcome.is_success() {
            warn!(
                "siege for '{}' at concurrency {} exited with {}",
                variant,
                concurrency,
                outcome.describe_status()
            );
            report.failed_runs += 1;
        }
    }
}

/// Validate `config` and run it to completion.
///
/// An unset target application fails here, before any command runs.
pub async fn run_siege<R>(config: &SiegeConfig, runner: &R) -> SiegeResult<SiegeReport>
where
    R: CommandRunner + ?Sized,
{
    let plan = SiegePlan::from_config(config)?;
    SiegeDriver::new(plan, runner).run().await
}
