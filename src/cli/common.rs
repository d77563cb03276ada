//! Setup shared by the checking commands.

use crate::cli::CliConfig;
use crate::config::{
    AppInfo, EnvLookup, ProcessEnv, ResolvedUrl, UpdaterSettings, resolve_update_url,
};
use crate::core::UpdaterError;
use crate::update::{HttpManifestFetcher, UpdateChecker, UpdateSession, VersionCode};
use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use tracing::warn;

/// Options selecting what to check against.
#[derive(Args, Debug, Clone, Default)]
pub struct TargetArgs {
    /// Manifest URL, overriding app.json and EXPO_PUBLIC_UPDATE_JSON_URL
    #[arg(long)]
    pub url: Option<String>,

    /// Installed version code, overriding expo.android.versionCode
    #[arg(long, value_name = "CODE", allow_hyphen_values = true)]
    pub installed_code: Option<String>,
}

/// Everything resolved before a check runs.
#[derive(Debug, Clone)]
pub struct CheckContext {
    pub settings: UpdaterSettings,
    pub app: AppInfo,
    pub url: ResolvedUrl,
    /// Installed code, or why it could not be determined.
    pub installed: Result<VersionCode, UpdaterError>,
}

impl CheckContext {
    /// Load settings and app info, resolve the URL with the process
    /// environment.
    pub async fn load(config: &CliConfig, target: &TargetArgs) -> Result<Self> {
        Self::load_with_env(config, target, &ProcessEnv).await
    }

    pub async fn load_with_env(
        config: &CliConfig,
        target: &TargetArgs,
        env: &impl EnvLookup,
    ) -> Result<Self> {
        let settings = UpdaterSettings::load_with_optional(config.config_path.clone())
            .await
            .context("Failed to load settings")?;
        let app = AppInfo::load_or_default(&config.app_config)
            .await
            .context("Failed to load app configuration")?;

        let url = resolve_update_url(target.url.clone(), &app, env);

        let installed = match target.installed_code.as_deref() {
            Some(raw) => raw.parse::<VersionCode>(),
            None => app.build_version.clone(),
        };

        Ok(Self {
            settings,
            app,
            url,
            installed,
        })
    }

    /// Session for the resolved target, or `None` when the installed code is
    /// invalid (already logged).
    pub fn session(&self) -> Result<Option<UpdateSession<HttpManifestFetcher>>> {
        let installed = match &self.installed {
            Ok(code) => *code,
            Err(error) => {
                warn!("Cannot compare versions, treating as no update: {}", error);
                return Ok(None);
            }
        };

        let fetcher = HttpManifestFetcher::from_settings(&self.settings)?;
        Ok(Some(UpdateSession::new(
            UpdateChecker::new(fetcher),
            self.url.clone(),
            installed,
        )))
    }

    /// Print the notice for disabled checks; returns whether checks are disabled.
    pub fn report_if_disabled(&self) -> bool {
        if self.settings.enabled {
            return false;
        }
        println!(
            "{}",
            "Update checks are disabled (enabled = false in settings)".yellow()
        );
        true
    }
}
