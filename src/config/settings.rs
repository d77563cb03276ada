//! User settings for the updater (`~/.barbersbar/config.toml`).
//!
//! Settings are optional: a missing file yields [`UpdaterSettings::default`].
//! Every field has a serde default so partial files keep working.
//!
//! ```toml
//! enabled = true
//! timeout_secs = 10
//! check_interval = 3600
//! user_agent = "barbersbar-update/0.3.2"
//! ```
//!
//! **Location:**
//! - Unix/macOS: `~/.barbersbar/config.toml`
//! - Windows: `%LOCALAPPDATA%\barbersbar\config.toml`
//! - Overridden by `--config <path>` or `BARBERSBAR_CONFIG`

use crate::constants::{
    DEFAULT_CHECK_INTERVAL_SECS, DEFAULT_FETCH_TIMEOUT_SECS, default_user_agent,
};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::fs;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdaterSettings {
    /// Whether update checks run at all.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Timeout for a single manifest fetch, in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Seconds between check cycles in `watch`.
    #[serde(default = "default_check_interval")]
    pub check_interval: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for UpdaterSettings {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            timeout_secs: default_timeout_secs(),
            check_interval: default_check_interval(),
            user_agent: default_user_agent(),
        }
    }
}

const fn default_enabled() -> bool {
    true
}

const fn default_timeout_secs() -> u64 {
    DEFAULT_FETCH_TIMEOUT_SECS
}

const fn default_check_interval() -> u64 {
    DEFAULT_CHECK_INTERVAL_SECS
}

impl UpdaterSettings {
    /// Fetch timeout as a [`Duration`]; zero is bumped to one second.
    #[must_use]
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs.max(1))
    }

    /// Interval between watch cycles; zero is bumped to one second.
    #[must_use]
    pub fn check_interval(&self) -> Duration {
        Duration::from_secs(self.check_interval.max(1))
    }

    /// Load settings from `path`, or from the default location when `None`.
    ///
    /// A missing file is not an error and yields defaults.
    pub async fn load_with_optional(path: Option<PathBuf>) -> Result<Self> {
        let path = match path {
            Some(path) => path,
            None => Self::default_path()?,
        };
        if path.exists() {
            Self::load_from(&path).await
        } else {
            debug!("No settings file at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Load settings from a specific file.
    pub async fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse settings from {}", path.display()))
    }

    /// Write settings as pretty TOML, creating parent directories.
    pub async fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize settings")?;

        fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write settings to {}", path.display()))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;

            let mut perms = fs::metadata(path)
                .await
                .with_context(|| format!("Failed to read permissions for {}", path.display()))?
                .permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms).await.with_context(|| {
                format!("Failed to set permissions on {}", path.display())
            })?;
        }

        Ok(())
    }

    /// Default settings path for the current platform.
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "windows") {
            dirs::data_local_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine local data directory"))?
                .join("barbersbar")
        } else {
            dirs::home_dir()
                .ok_or_else(|| anyhow::anyhow!("Unable to determine home directory"))?
                .join(".barbersbar")
        };

        Ok(config_dir.join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let settings = UpdaterSettings::default();
        assert!(settings.enabled);
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.check_interval, 3600);
        assert!(settings.user_agent.starts_with("barbersbar-update/"));
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let settings: UpdaterSettings = toml::from_str("enabled = false").unwrap();
        assert!(!settings.enabled);
        assert_eq!(settings.timeout_secs, 10);
        assert_eq!(settings.check_interval, 3600);
    }

    #[test]
    fn test_zero_durations_are_clamped() {
        let settings = UpdaterSettings {
            timeout_secs: 0,
            check_interval: 0,
            ..UpdaterSettings::default()
        };
        assert_eq!(settings.fetch_timeout(), Duration::from_secs(1));
        assert_eq!(settings.check_interval(), Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_save_and_load_roundtrip() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let settings = UpdaterSettings {
            timeout_secs: 3,
            ..UpdaterSettings::default()
        };
        settings.save_to(&path).await.unwrap();

        let loaded = UpdaterSettings::load_with_optional(Some(path.clone())).await.unwrap();
        assert_eq!(loaded, settings);

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }

    #[tokio::test]
    async fn test_missing_file_yields_defaults() {
        let temp = TempDir::new().unwrap();
        let loaded = UpdaterSettings::load_with_optional(Some(temp.path().join("absent.toml")))
            .await
            .unwrap();
        assert_eq!(loaded, UpdaterSettings::default());
    }

    #[tokio::test]
    async fn test_invalid_toml_is_error() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "enabled = [").unwrap();

        let err = UpdaterSettings::load_from(&path).await.unwrap_err();
        assert!(err.to_string().contains("Failed to parse settings"));
    }
}
