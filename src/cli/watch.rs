//! Check for updates repeatedly.
//!
//! The first cycle runs immediately, later ones every `--interval` seconds
//! (the `check_interval` setting by default). A build is announced once; an
//! unchanged manifest on later cycles stays quiet. Ctrl-C stops the loop,
//! abandoning a fetch that is still in flight.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::cli::CliConfig;
use crate::cli::common::{CheckContext, TargetArgs};
use crate::update::{CycleOutcome, ManifestSource, UpdateSession, UpdateStatus};

#[derive(Args)]
pub struct WatchCommand {
    #[command(flatten)]
    target: TargetArgs,

    /// Seconds between checks, overriding check_interval from settings
    #[arg(long, value_name = "SECONDS", value_parser = clap::value_parser!(u64).range(1..))]
    interval: Option<u64>,

    /// Stop after this many check cycles
    #[arg(long, value_name = "COUNT", value_parser = clap::value_parser!(u64).range(1..))]
    max_cycles: Option<u64>,
}

/// Counters for a finished watch loop.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WatchSummary {
    pub cycles: u64,
    pub prompts: u64,
    pub failures: u64,
}

impl WatchCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let ctx = CheckContext::load(config, &self.target).await?;
        if ctx.report_if_disabled() {
            return Ok(());
        }
        let Some(session) = ctx.session()? else {
            return Ok(());
        };

        let interval = self
            .interval
            .map_or_else(|| ctx.settings.check_interval(), Duration::from_secs);

        println!(
            "{} {} every {}s (Ctrl-C to stop)",
            "Watching".cyan(),
            ctx.url.url,
            interval.as_secs()
        );

        let shutdown = async {
            if tokio::signal::ctrl_c().await.is_err() {
                // No signal handler available; run until max_cycles.
                std::future::pending::<()>().await;
            }
        };
        let summary = watch_loop(&session, interval, self.max_cycles, shutdown).await;

        info!(
            "Watch finished after {} cycles ({} prompts, {} failed checks)",
            summary.cycles, summary.prompts, summary.failures
        );
        Ok(())
    }
}

/// Run check cycles until `max_cycles` is reached or `shutdown` resolves.
pub async fn watch_loop<S, F>(
    session: &UpdateSession<S>,
    interval: Duration,
    max_cycles: Option<u64>,
    shutdown: F,
) -> WatchSummary
where
    S: ManifestSource,
    F: Future<Output = ()>,
{
    let mut summary = WatchSummary::default();
    let mut ticker = tokio::time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            _ = ticker.tick() => {}
            () = &mut shutdown => {
                debug!("Shutdown requested while idle");
                break;
            }
        }

        let outcome = tokio::select! {
            outcome = session.run_cycle() => outcome,
            () = &mut shutdown => {
                debug!("Shutdown requested during a check cycle");
                break;
            }
        };

        summary.cycles += 1;
        record(&mut summary, &outcome);

        if max_cycles.is_some_and(|max| summary.cycles >= max) {
            break;
        }
    }

    summary
}

fn record(summary: &mut WatchSummary, outcome: &CycleOutcome) {
    if outcome.stale {
        return;
    }
    if let Some(prompt) = &outcome.prompt {
        summary.prompts += 1;
        println!("{}", prompt.render_colored());
    } else if outcome.info.status == UpdateStatus::Error {
        summary.failures += 1;
        debug!("Cycle {} was inconclusive", outcome.ticket.id());
    }
}
