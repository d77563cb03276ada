//! Manage the updater settings file.
//!
//! The settings file (`~/.barbersbar/config.toml` by default) controls whether
//! checks run, the fetch timeout, the `watch` interval and the user agent.
//! It never holds the manifest URL; that comes from the command line, app.json
//! or `EXPO_PUBLIC_UPDATE_JSON_URL`.
//!
//! # Examples
//!
//! ```bash
//! barbersbar-update config init
//! barbersbar-update config show
//! barbersbar-update config        # defaults to show
//! barbersbar-update config path
//! ```

use anyhow::Result;
use clap::{Args, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

use crate::config::UpdaterSettings;

/// Command to manage the settings file.
///
/// Defaults to `show` when no subcommand is given.
#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    command: Option<ConfigSubcommands>,
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Write a settings file with default values.
    ///
    /// Refuses to overwrite an existing file unless `--force` is given.
    Init {
        /// Overwrite an existing settings file
        #[arg(long)]
        force: bool,
    },

    /// Display the effective settings.
    Show,

    /// Display the path to the settings file.
    Path,
}

impl ConfigCommand {
    pub async fn execute(self, config_path: Option<PathBuf>) -> Result<()> {
        match self.command {
            Some(ConfigSubcommands::Init {
                force,
            }) => Self::init(force, config_path).await,
            Some(ConfigSubcommands::Show) | None => Self::show(config_path).await,
            Some(ConfigSubcommands::Path) => Self::show_path(config_path),
        }
    }

    fn resolve_path(config_path: Option<PathBuf>) -> Result<PathBuf> {
        match config_path {
            Some(path) => Ok(path),
            None => UpdaterSettings::default_path(),
        }
    }

    async fn init(force: bool, config_path: Option<PathBuf>) -> Result<()> {
        let config_path = Self::resolve_path(config_path)?;

        if config_path.exists() && !force {
            println!("❌ Settings already exist at: {}", config_path.display());
            println!("   Use --force to overwrite");
            return Ok(());
        }

        let settings = UpdaterSettings::default();
        settings.save_to(&config_path).await?;

        println!("✅ Created settings at: {}", config_path.display());
        println!("\n{}", "Settings:".bold());
        println!("{}", toml::to_string_pretty(&settings)?);

        Ok(())
    }

    async fn show(config_path: Option<PathBuf>) -> Result<()> {
        let config_path = Self::resolve_path(config_path)?;
        let exists = config_path.exists();
        let settings = UpdaterSettings::load_with_optional(Some(config_path.clone())).await?;

        println!("{}", "Updater Settings".bold());
        println!("Location: {}\n", config_path.display());
        println!("{}", toml::to_string_pretty(&settings)?);

        if !exists {
            println!("\n{}", "Tip:".yellow());
            println!("  No settings file found, showing defaults");
            println!("  Run 'barbersbar-update config init' to create one");
        }

        Ok(())
    }

    fn show_path(config_path: Option<PathBuf>) -> Result<()> {
        let config_path = Self::resolve_path(config_path)?;
        println!("{}", config_path.display());
        Ok(())
    }
}
