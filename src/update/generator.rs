//! Produce `update.json` from the app configuration.
//!
//! The version code is derived from `expo.version` the same way consumers
//! validate it, and the result is re-parsed before writing, so a generated
//! manifest is always one the checker accepts.

use crate::config::AppInfo;
use crate::constants::{DEFAULT_GENERATED_NOTES, DEFAULT_URL_TEMPLATE};
use crate::core::UpdaterError;
use crate::update::manifest::UpdateManifest;
use crate::update::version::derive_version_code;
use std::path::Path;
use tokio::fs;
use tracing::info;

/// Placeholder replaced with the version name in URL templates.
pub const VERSION_PLACEHOLDER: &str = "{version}";

#[derive(Debug, Clone)]
pub struct ManifestGenerator {
    url_template: String,
    release_notes: String,
    sha256: Option<String>,
}

impl Default for ManifestGenerator {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            release_notes: DEFAULT_GENERATED_NOTES.to_string(),
            sha256: None,
        }
    }
}

impl ManifestGenerator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    #[must_use]
    pub fn release_notes(mut self, notes: impl Into<String>) -> Self {
        self.release_notes = notes.into();
        self
    }

    #[must_use]
    pub fn sha256(mut self, hash: Option<String>) -> Self {
        self.sha256 = hash;
        self
    }

    /// Build the manifest for the app's current version.
    ///
    /// Requires `expo.version`; there is no fallback version here.
    pub fn build(&self, app: &AppInfo) -> Result<UpdateManifest, UpdaterError> {
        let version_name = app
            .display_version
            .as_deref()
            .map(str::trim)
            .filter(|version| !version.is_empty())
            .ok_or_else(|| {
                UpdaterError::invalid_version("", "expo.version not found in app configuration")
            })?
            .to_string();
        let version_code = derive_version_code(&version_name)?;
        let url = self.url_template.replace(VERSION_PLACEHOLDER, &version_name);

        let manifest = UpdateManifest {
            version_name,
            version_code,
            url,
            release_notes: self.release_notes.clone(),
            sha256: self.sha256.clone(),
        };

        UpdateManifest::parse(&manifest.to_json_pretty()?)
    }

    /// Build the manifest and write it to `output`, creating parent
    /// directories. Nothing is written if the manifest is invalid.
    pub async fn write(&self, app: &AppInfo, output: &Path) -> Result<UpdateManifest, UpdaterError> {
        let manifest = self.build(app)?;
        let content = manifest.to_json_pretty()?;

        let io_error = |operation: &str, path: &Path, e: std::io::Error| UpdaterError::Io {
            operation: format!("{operation} ({e})"),
            path: path.display().to_string(),
        };

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| io_error("creating output directory", parent, e))?;
        }
        fs::write(output, format!("{content}\n"))
            .await
            .map_err(|e| io_error("writing manifest", output, e))?;

        info!(
            "Generated manifest for {} (build {}) at {}",
            manifest.version_name,
            manifest.version_code,
            output.display()
        );
        Ok(manifest)
    }
}
