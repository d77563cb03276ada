//! Command-line interface for barbersbar-update.
//!
//! # Available Commands
//!
//! - `check` - Run one update check cycle
//! - `status` - Show build info, the resolved manifest URL and the check result
//! - `watch` - Run check cycles on an interval, prompting once per new build
//! - `generate` - Write `update.json` for the app's current version
//! - `config` - Inspect or create the settings file
//!
//! # Global Options
//!
//! - `--verbose` / `-v` - Debug logging
//! - `--quiet` / `-q` - No logging
//! - `--config` / `-c` - Settings file (also `BARBERSBAR_CONFIG`)
//! - `--app-config` - App configuration file, `app.json` by default
//!
//! # Examples
//!
//! ```bash
//! barbersbar-update check
//! barbersbar-update check --url https://example.com/update.json --installed-code 5
//! barbersbar-update status
//! barbersbar-update watch --interval 600
//! barbersbar-update generate --url-template "https://cdn.example.com/app-{version}.apk"
//! ```

mod check;
pub mod common;
mod config;
mod generate;
mod status;
mod watch;

use crate::constants::{CONFIG_PATH_ENV_VAR, DEFAULT_APP_CONFIG};
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// Resolved global options shared by every command.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Log filter, `None` disables logging.
    pub log_level: Option<String>,

    /// Settings file override.
    pub config_path: Option<PathBuf>,

    /// App configuration file.
    pub app_config: PathBuf,
}

impl CliConfig {
    #[must_use]
    pub fn new() -> Self {
        Self {
            app_config: PathBuf::from(DEFAULT_APP_CONFIG),
            ..Self::default()
        }
    }

    /// Install the global tracing subscriber.
    ///
    /// `RUST_LOG` wins over the verbosity flags. Logs go to stderr so command
    /// output on stdout stays machine-readable.
    pub fn init_logging(&self) {
        let filter = match (&self.log_level, std::env::var("RUST_LOG").is_ok()) {
            (_, true) => EnvFilter::from_default_env(),
            (Some(level), false) => EnvFilter::new(format!("barbersbar_update={level}")),
            (None, false) => return,
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

#[derive(Parser)]
#[command(
    name = "barbersbar-update",
    about = "Check for new Barbersbar app builds",
    version,
    long_about = "Fetches the update manifest, compares its version code with the installed build and shows where to download a newer one."
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable logging
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    quiet: bool,

    /// Path to the settings file
    #[arg(short, long, global = true, env = CONFIG_PATH_ENV_VAR)]
    config: Option<PathBuf>,

    /// Path to the app configuration (app.json)
    #[arg(long, global = true, default_value = DEFAULT_APP_CONFIG)]
    app_config: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one update check cycle
    Check(check::CheckCommand),

    /// Show build info, manifest URL and update status
    Status(status::StatusCommand),

    /// Check for updates repeatedly on an interval
    Watch(watch::WatchCommand),

    /// Generate update.json from app.json
    Generate(generate::GenerateCommand),

    /// Manage the settings file
    Config(config::ConfigCommand),
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        let config = self.build_config();
        config.init_logging();
        self.execute_with_config(config).await
    }

    #[must_use]
    pub fn build_config(&self) -> CliConfig {
        let log_level = if self.verbose {
            Some("debug".to_string())
        } else if self.quiet {
            None
        } else {
            Some("info".to_string())
        };

        CliConfig {
            log_level,
            config_path: self.config.clone(),
            app_config: self.app_config.clone(),
        }
    }

    pub async fn execute_with_config(self, config: CliConfig) -> Result<()> {
        match self.command {
            Commands::Check(cmd) => cmd.execute(&config).await,
            Commands::Status(cmd) => cmd.execute(&config).await,
            Commands::Watch(cmd) => cmd.execute(&config).await,
            Commands::Generate(cmd) => cmd.execute(&config).await,
            Commands::Config(cmd) => cmd.execute(config.config_path).await,
        }
    }
}
