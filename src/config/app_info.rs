//! Build information read from the app configuration (`app.json`).
//!
//! Only the handful of fields the updater needs are modelled; everything else
//! in the file is ignored. A malformed `expo.android.versionCode` does not
//! make the file unreadable: it is kept as an [`UpdaterError::InvalidVersion`]
//! so checks can report "no update" instead of failing.
//!
//! ```json
//! {
//!   "expo": {
//!     "name": "Barbersbar",
//!     "version": "1.0.7",
//!     "android": { "versionCode": 7 },
//!     "extra": { "updateJsonUrl": "https://example.com/update.json" }
//!   }
//! }
//! ```

use crate::constants::{DEFAULT_APP_NAME, DEFAULT_DISPLAY_VERSION, DEFAULT_VERSION_CODE};
use crate::core::UpdaterError;
use crate::update::version::VersionCode;
use serde::Deserialize;
use std::path::Path;
use tokio::fs;
use tracing::{debug, warn};

#[derive(Debug, Default, Deserialize)]
struct AppJson {
    #[serde(default)]
    expo: ExpoSection,
}

#[derive(Debug, Default, Deserialize)]
struct ExpoSection {
    name: Option<String>,
    version: Option<String>,
    #[serde(default)]
    android: AndroidSection,
    #[serde(default)]
    extra: ExtraSection,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AndroidSection {
    version_code: Option<serde_json::Value>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ExtraSection {
    update_json_url: Option<String>,
}

/// Build information burned into the running app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppInfo {
    pub app_name: String,
    /// `expo.version`, e.g. `"1.0.7"`, when present.
    pub display_version: Option<String>,
    /// Installed version code used for update comparison, or why it is
    /// unusable.
    pub build_version: Result<VersionCode, UpdaterError>,
    /// Manifest URL embedded in the app's extra configuration, if any.
    pub embedded_update_url: Option<String>,
}

impl Default for AppInfo {
    fn default() -> Self {
        Self {
            app_name: DEFAULT_APP_NAME.to_string(),
            display_version: None,
            build_version: Ok(VersionCode::new(DEFAULT_VERSION_CODE)),
            embedded_update_url: None,
        }
    }
}

impl AppInfo {
    /// Version for display, `1.0.0` when `expo.version` is absent.
    #[must_use]
    pub fn display_version(&self) -> &str {
        self.display_version.as_deref().unwrap_or(DEFAULT_DISPLAY_VERSION)
    }

    /// Parse app configuration JSON, filling absent fields with defaults.
    pub fn from_json(content: &str, file: &str) -> Result<Self, UpdaterError> {
        let parsed: AppJson =
            serde_json::from_str(content).map_err(|e| UpdaterError::AppConfigParse {
                file: file.to_string(),
                reason: e.to_string(),
            })?;
        let expo = parsed.expo;

        Ok(Self {
            app_name: expo.name.unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            display_version: expo.version,
            build_version: match expo.android.version_code {
                Some(value) => VersionCode::from_json(&value),
                None => Ok(VersionCode::new(DEFAULT_VERSION_CODE)),
            },
            embedded_update_url: expo.extra.update_json_url,
        })
    }

    /// Read and parse the app configuration file.
    pub async fn load(path: &Path) -> Result<Self, UpdaterError> {
        let content = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                UpdaterError::AppConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                UpdaterError::Io {
                    operation: format!("reading app configuration ({e})"),
                    path: path.display().to_string(),
                }
            }
        })?;

        let info = Self::from_json(&content, &path.display().to_string())?;
        match &info.build_version {
            Ok(code) => debug!(
                "Loaded {} {} (build {}) from {}",
                info.app_name,
                info.display_version(),
                code,
                path.display()
            ),
            Err(error) => warn!("Unusable version code in {}: {}", path.display(), error),
        }
        Ok(info)
    }

    /// Like [`load`](Self::load), but a missing file yields defaults.
    pub async fn load_or_default(path: &Path) -> Result<Self, UpdaterError> {
        match Self::load(path).await {
            Err(UpdaterError::AppConfigNotFound { .. }) => {
                debug!("No app configuration at {}, using defaults", path.display());
                Ok(Self::default())
            }
            other => other,
        }
    }
}
