//! One update check: fetch the manifest, compare version codes.
//!
//! [`UpdateChecker::check`] never fails. Network, parse and version errors are
//! logged and folded into an [`UpdateInfo`] with [`UpdateStatus::Error`], which
//! always means "no update".

use crate::config::ResolvedUrl;
use crate::core::UpdaterError;
use crate::update::fetcher::ManifestSource;
use crate::update::manifest::UpdateManifest;
use crate::update::version::{VersionCode, is_newer};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UpdateStatus {
    UpToDate,
    Available,
    Error,
}

/// Outcome of a single check.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInfo {
    pub status: UpdateStatus,
    /// Installed version code.
    pub current_version: VersionCode,
    /// Version code from the manifest, when one was parsed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote_version: Option<VersionCode>,
    /// Present only when an update is available.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manifest: Option<UpdateManifest>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Error family (`network`, `parse`, `invalid_version`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<String>,
    pub checked_at: DateTime<Utc>,
}

impl UpdateInfo {
    fn up_to_date(current: VersionCode, remote: VersionCode) -> Self {
        Self {
            status: UpdateStatus::UpToDate,
            current_version: current,
            remote_version: Some(remote),
            manifest: None,
            error: None,
            error_kind: None,
            checked_at: Utc::now(),
        }
    }

    fn available(current: VersionCode, manifest: UpdateManifest) -> Self {
        Self {
            status: UpdateStatus::Available,
            current_version: current,
            remote_version: Some(manifest.version_code),
            manifest: Some(manifest),
            error: None,
            error_kind: None,
            checked_at: Utc::now(),
        }
    }

    /// An inconclusive check.
    #[must_use]
    pub fn failed(current: VersionCode, error: &UpdaterError) -> Self {
        Self {
            status: UpdateStatus::Error,
            current_version: current,
            remote_version: None,
            manifest: None,
            error: Some(error.to_string()),
            error_kind: Some(error.kind().to_string()),
            checked_at: Utc::now(),
        }
    }

    #[must_use]
    pub fn is_available(&self) -> bool {
        self.status == UpdateStatus::Available && self.manifest.is_some()
    }

    /// Same decision as `other`, ignoring the timestamp.
    #[must_use]
    pub fn same_result(&self, other: &Self) -> bool {
        self.status == other.status
            && self.current_version == other.current_version
            && self.remote_version == other.remote_version
            && self.manifest == other.manifest
    }
}

/// Runs checks against a [`ManifestSource`].
#[derive(Debug, Clone)]
pub struct UpdateChecker<S> {
    source: S,
}

impl<S: ManifestSource> UpdateChecker<S> {
    pub const fn new(source: S) -> Self {
        Self { source }
    }

    pub const fn source(&self) -> &S {
        &self.source
    }

    /// Fetch and compare, reporting failures as [`UpdateStatus::Error`].
    pub async fn check(&self, url: &ResolvedUrl, installed: VersionCode) -> UpdateInfo {
        match self.try_check(url, installed).await {
            Ok(info) => info,
            Err(failure) => {
                if failure.is_check_failure() {
                    warn!(
                        kind = failure.kind(),
                        source = %url.source,
                        "Update check failed, treating as no update: {}",
                        failure
                    );
                } else {
                    error!(
                        kind = failure.kind(),
                        source = %url.source,
                        "Manifest source failed unexpectedly, treating as no update: {}",
                        failure
                    );
                }
                UpdateInfo::failed(installed, &failure)
            }
        }
    }

    /// Fetch and compare, propagating failures.
    pub async fn try_check(
        &self,
        url: &ResolvedUrl,
        installed: VersionCode,
    ) -> Result<UpdateInfo, UpdaterError> {
        let manifest = self.source.fetch(&url.url).await?;
        let remote = manifest.version_code;

        if is_newer(remote, installed) {
            info!(
                "Update available: build {} -> {} ({})",
                installed, remote, manifest.version_name
            );
            Ok(UpdateInfo::available(installed, manifest))
        } else {
            debug!("Up to date: installed {}, latest {}", installed, remote);
            Ok(UpdateInfo::up_to_date(installed, remote))
        }
    }
}
