//! Show what the updater knows about this build.

use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::cli::CliConfig;
use crate::cli::common::{CheckContext, TargetArgs};
use crate::update::format_check_result;

#[derive(Args)]
pub struct StatusCommand {
    #[command(flatten)]
    target: TargetArgs,
}

impl StatusCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let ctx = CheckContext::load(config, &self.target).await?;

        for line in header_lines(&ctx) {
            println!("{line}");
        }
        println!();

        if ctx.report_if_disabled() {
            return Ok(());
        }

        match ctx.session()? {
            Some(session) => {
                let outcome = session.run_cycle().await;
                println!("{}", format_check_result(&outcome.info));
                if let Some(prompt) = outcome.prompt {
                    println!("{} {}", "Download:".cyan(), prompt.url);
                    println!("{}", prompt.display_notes());
                }
            }
            None => {
                let reason = ctx.installed.as_ref().err().map(ToString::to_string).unwrap_or_default();
                println!("(Unable to check for updates: {reason})");
            }
        }
        Ok(())
    }
}

fn header_lines(ctx: &CheckContext) -> Vec<String> {
    let installed = match &ctx.installed {
        Ok(code) => code.to_string(),
        Err(_) => "invalid".red().to_string(),
    };

    vec![
        format!("{}", ctx.app.app_name.bold()),
        format!("Version:         {}", ctx.app.display_version()),
        format!("Installed build: {installed}"),
        format!("Update URL:      {} ({})", ctx.url.url, ctx.url.source),
    ]
}
