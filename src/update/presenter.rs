//! Surfacing an available update to the user.
//!
//! The presenter turns an [`UpdateInfo`] into an [`UpdatePrompt`] carrying the
//! manifest's `url` and `release_notes` exactly as fetched. It remembers the
//! last version it prompted for, so an unchanged manifest seen on a later
//! cycle does not prompt twice. Downloading and installing the artifact is
//! left to the platform; the prompt only hands over the URL.

use crate::constants::FALLBACK_RELEASE_NOTES;
use crate::update::checker::{UpdateInfo, UpdateStatus};
use crate::update::version::VersionCode;
use colored::Colorize;
use serde::Serialize;
use tracing::debug;

/// What the user is shown when a newer build exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePrompt {
    pub version_name: String,
    pub version_code: VersionCode,
    pub url: String,
    pub release_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

impl UpdatePrompt {
    /// Release notes for display, with a generic line when they are empty.
    #[must_use]
    pub fn display_notes(&self) -> &str {
        if self.release_notes.trim().is_empty() {
            FALLBACK_RELEASE_NOTES
        } else {
            &self.release_notes
        }
    }

    /// Plain-text rendering.
    #[must_use]
    pub fn render(&self) -> String {
        format!(
            "Update available: {} (build {})\n{}\nDownload: {}",
            self.version_name,
            self.version_code,
            self.display_notes(),
            self.url
        )
    }

    /// Colored rendering for the terminal.
    #[must_use]
    pub fn render_colored(&self) -> String {
        format!(
            "{} {} (build {})\n{}\n{} {}",
            "Update available:".green().bold(),
            self.version_name.bold(),
            self.version_code,
            self.display_notes().italic(),
            "Download:".cyan(),
            self.url
        )
    }
}

/// Decides whether a check result warrants a prompt.
#[derive(Debug, Default)]
pub struct UpdatePresenter {
    last_prompted: Option<VersionCode>,
}

impl UpdatePresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a prompt for an available update, unless this version was
    /// already prompted for.
    pub fn present(&mut self, info: &UpdateInfo) -> Option<UpdatePrompt> {
        if info.status != UpdateStatus::Available {
            return None;
        }
        let manifest = info.manifest.as_ref()?;

        if self.last_prompted == Some(manifest.version_code) {
            debug!(
                "Already prompted for build {}, not prompting again",
                manifest.version_code
            );
            return None;
        }

        self.last_prompted = Some(manifest.version_code);
        Some(UpdatePrompt {
            version_name: manifest.version_name.clone(),
            version_code: manifest.version_code,
            url: manifest.url.clone(),
            release_notes: manifest.release_notes.clone(),
            sha256: manifest.sha256.clone(),
        })
    }

    #[must_use]
    pub const fn last_prompted(&self) -> Option<VersionCode> {
        self.last_prompted
    }
}

/// One-line summary of a check result, in the style of a status report.
#[must_use]
pub fn format_check_result(info: &UpdateInfo) -> String {
    match info.status {
        UpdateStatus::Available => match &info.manifest {
            Some(manifest) => format!(
                "Installed build: {}\nLatest build:    {} ({}, update available)",
                info.current_version, manifest.version_code, manifest.version_name
            ),
            None => format!("Installed build: {}", info.current_version),
        },
        UpdateStatus::UpToDate => format!("Installed build: {} (up to date)", info.current_version),
        UpdateStatus::Error => format!(
            "Installed build: {}\n(Unable to check for updates: {})",
            info.current_version,
            info.error.as_deref().unwrap_or("unknown error")
        ),
    }
}
