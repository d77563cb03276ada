//! Run a single update check.
//!
//! Every outcome exits successfully: a failed fetch or a malformed manifest is
//! reported as "unable to check", never as a command failure.

use anyhow::Result;
use clap::Args;
use colored::Colorize;
use serde::Serialize;

use crate::cli::CliConfig;
use crate::cli::common::{CheckContext, TargetArgs};
use crate::config::ResolvedUrl;
use crate::core::UpdaterError;
use crate::update::{CycleOutcome, UpdateInfo, UpdatePrompt, UpdateStatus};

#[derive(Args)]
pub struct CheckCommand {
    #[command(flatten)]
    target: TargetArgs,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,
}

/// JSON shape of a check result.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport<'a> {
    url: &'a str,
    url_source: &'a str,
    #[serde(flatten)]
    info: &'a UpdateInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    prompt: Option<&'a UpdatePrompt>,
}

impl CheckCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let ctx = CheckContext::load(config, &self.target).await?;
        if ctx.report_if_disabled() {
            return Ok(());
        }

        let Some(session) = ctx.session()? else {
            if let Err(error) = &ctx.installed {
                self.print_invalid_installed(&ctx.url, error)?;
            }
            return Ok(());
        };

        if !self.json {
            println!("{} {}", "Checking for updates at".cyan(), ctx.url.url);
        }
        let outcome = session.run_cycle().await;

        if self.json {
            println!("{}", report_json(&ctx.url, &outcome)?);
        } else {
            println!("{}", report_text(&outcome));
        }
        Ok(())
    }

    fn print_invalid_installed(&self, url: &ResolvedUrl, error: &UpdaterError) -> Result<()> {
        if self.json {
            let report = serde_json::json!({
                "url": url.url,
                "urlSource": url.source.as_str(),
                "status": UpdateStatus::Error,
                "error": error.to_string(),
                "errorKind": error.kind(),
            });
            println!("{}", serde_json::to_string_pretty(&report)?);
        } else {
            println!("{} {}", "Unable to check for updates:".yellow(), error);
        }
        Ok(())
    }
}

fn report_json(url: &ResolvedUrl, outcome: &CycleOutcome) -> Result<String> {
    let report = CheckReport {
        url: &url.url,
        url_source: url.source.as_str(),
        info: &outcome.info,
        prompt: outcome.prompt.as_ref(),
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

fn report_text(outcome: &CycleOutcome) -> String {
    if let Some(prompt) = &outcome.prompt {
        return prompt.render_colored();
    }

    let info = &outcome.info;
    match info.status {
        UpdateStatus::UpToDate => format!(
            "{} (build {})",
            "You are on the latest version".green(),
            info.current_version
        ),
        UpdateStatus::Available => format!(
            "Build {} is available and was already shown",
            info.remote_version.map(|v| v.to_string()).unwrap_or_default()
        ),
        UpdateStatus::Error => format!(
            "{} {}",
            "Unable to check for updates:".yellow(),
            info.error.as_deref().unwrap_or("unknown error")
        ),
    }
}
