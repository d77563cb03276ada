//! Test utilities shared by unit tests and the integration suite.
//!
//! Available under `cfg(test)` and with the `test-utils` feature.
//!
//! - [`init_test_logging`] - one-time tracing setup honoring `RUST_LOG`
//! - [`StaticSource`] / [`ScriptedSource`] - in-memory [`ManifestSource`]s
//! - [`manifest_json`] / [`write_app_json`] - fixture builders

use crate::core::UpdaterError;
use crate::update::fetcher::ManifestSource;
use crate::update::manifest::UpdateManifest;
use std::path::{Path, PathBuf};
use std::sync::Once;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::Level;
use tracing_subscriber::EnvFilter;

static INIT_LOGGING: Once = Once::new();

/// Initialize logging for tests, once per process.
///
/// Uses `level` when given, otherwise `RUST_LOG`; with neither, logging stays
/// off.
///
/// ```bash
/// RUST_LOG=barbersbar_update=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .try_init();
    });
}

/// Manifest JSON whose code matches its name, pointing at an https URL.
pub fn manifest_json(version_name: &str, version_code: u64) -> String {
    serde_json::json!({
        "versionName": version_name,
        "versionCode": version_code,
        "url": format!("https://downloads.test/app-{version_name}.apk"),
        "releaseNotes": format!("Release {version_name}"),
    })
    .to_string()
}

/// Write an `app.json` into `dir` and return its path.
pub fn write_app_json(
    dir: &Path,
    version: &str,
    version_code: u64,
    update_url: Option<&str>,
) -> std::io::Result<PathBuf> {
    let mut expo = serde_json::json!({
        "name": "Barbersbar",
        "version": version,
        "android": { "versionCode": version_code },
    });
    if let Some(url) = update_url {
        expo["extra"] = serde_json::json!({ "updateJsonUrl": url });
    }

    let path = dir.join("app.json");
    std::fs::write(&path, serde_json::json!({ "expo": expo }).to_string())?;
    Ok(path)
}

/// Always serves the same body and counts calls.
#[derive(Debug)]
pub struct StaticSource {
    body: String,
    calls: AtomicUsize,
}

impl StaticSource {
    pub fn body(body: impl Into<String>) -> Self {
        Self {
            body: body.into(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl ManifestSource for StaticSource {
    async fn fetch(&self, _url: &str) -> Result<UpdateManifest, UpdaterError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        UpdateManifest::parse(&self.body)
    }
}

/// Serves scripted responses in call order, each after its delay.
///
/// Calls beyond the script reuse the last entry.
#[derive(Debug)]
pub struct ScriptedSource {
    responses: Vec<(Duration, String)>,
    next: AtomicUsize,
}

impl ScriptedSource {
    pub fn new(responses: Vec<(Duration, String)>) -> Self {
        assert!(!responses.is_empty(), "ScriptedSource needs at least one response");
        Self {
            responses,
            next: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.next.load(Ordering::SeqCst)
    }
}

impl ManifestSource for ScriptedSource {
    async fn fetch(&self, url: &str) -> Result<UpdateManifest, UpdaterError> {
        let index = self.next.fetch_add(1, Ordering::SeqCst);
        let (delay, body) = &self.responses[index.min(self.responses.len() - 1)];
        tokio::time::sleep(*delay).await;

        if body.is_empty() {
            return Err(UpdaterError::Network {
                url: url.to_string(),
                reason: "scripted failure".to_string(),
            });
        }
        UpdateManifest::parse(body)
    }
}
