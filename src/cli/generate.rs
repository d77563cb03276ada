//! Generate `update.json` for the current app version.
//!
//! Reads `expo.version` from app.json, derives the version code from it and
//! writes the manifest next to the app config (`public/update.json`) unless
//! `--output` says otherwise.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::cli::CliConfig;
use crate::config::AppInfo;
use crate::constants::{DEFAULT_GENERATED_NOTES, DEFAULT_MANIFEST_OUTPUT, DEFAULT_URL_TEMPLATE};
use crate::update::ManifestGenerator;

#[derive(Args)]
pub struct GenerateCommand {
    /// Download URL template; `{version}` is replaced with the version name
    #[arg(long, default_value = DEFAULT_URL_TEMPLATE)]
    url_template: String,

    /// Release notes for the manifest
    #[arg(long, default_value = DEFAULT_GENERATED_NOTES)]
    notes: String,

    /// SHA-256 of the published artifact
    #[arg(long)]
    sha256: Option<String>,

    /// Output file, `public/update.json` next to app.json by default
    #[arg(short, long)]
    output: Option<PathBuf>,
}

impl GenerateCommand {
    pub async fn execute(self, config: &CliConfig) -> Result<()> {
        let app = AppInfo::load(&config.app_config)
            .await
            .with_context(|| format!("Cannot generate manifest from {}", config.app_config.display()))?;

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| default_output(&config.app_config));

        let manifest = ManifestGenerator::new()
            .url_template(self.url_template)
            .release_notes(self.notes)
            .sha256(self.sha256)
            .write(&app, &output)
            .await?;

        println!("✅ update.json generated at: {}", output.display());
        println!("\n{}", "Manifest:".bold());
        println!("{}", manifest.to_json_pretty()?);
        Ok(())
    }
}

fn default_output(app_config: &Path) -> PathBuf {
    app_config
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(DEFAULT_MANIFEST_OUTPUT)
}
