//! Manifest retrieval.
//!
//! [`ManifestSource`] is the seam between the check cycle and the network.
//! [`HttpManifestFetcher`] is the production implementation; tests plug in
//! their own sources or point the fetcher at a mock server.

use crate::config::UpdaterSettings;
use crate::core::UpdaterError;
use crate::update::manifest::UpdateManifest;
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Something that can produce the current manifest for a URL.
///
/// Every call is expected to perform a fresh retrieval; implementations
/// must not cache manifests between calls.
pub trait ManifestSource {
    fn fetch(&self, url: &str) -> impl Future<Output = Result<UpdateManifest, UpdaterError>> + Send;
}

/// Fetches manifests over HTTP(S) with a fixed timeout.
#[derive(Debug, Clone)]
pub struct HttpManifestFetcher {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpManifestFetcher {
    /// Build a fetcher with the given request timeout and user agent.
    pub fn new(timeout: Duration, user_agent: &str) -> Result<Self, UpdaterError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| UpdaterError::ConfigError {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { client, timeout })
    }

    /// Build a fetcher from user settings.
    pub fn from_settings(settings: &UpdaterSettings) -> Result<Self, UpdaterError> {
        Self::new(settings.fetch_timeout(), &settings.user_agent)
    }

    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    fn network_error(&self, url: &str, error: &reqwest::Error) -> UpdaterError {
        let reason = if error.is_timeout() {
            format!("request timed out after {}s", self.timeout.as_secs())
        } else if error.is_connect() {
            format!("connection failed: {error}")
        } else {
            error.to_string()
        };
        UpdaterError::Network {
            url: url.to_string(),
            reason,
        }
    }
}

impl ManifestSource for HttpManifestFetcher {
    async fn fetch(&self, url: &str) -> Result<UpdateManifest, UpdaterError> {
        debug!("Fetching update manifest from {}", url);

        let response = self
            .client
            .get(url)
            .header(ACCEPT, "application/json")
            .header(CACHE_CONTROL, "no-cache")
            .send()
            .await
            .map_err(|e| self.network_error(url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(UpdaterError::Network {
                url: url.to_string(),
                reason: format!("HTTP {status}"),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| self.network_error(url, &e))?;
        debug!("Received {} byte manifest", body.len());

        UpdateManifest::parse(&body)
    }
}
