//! Resolution of the update manifest URL.
//!
//! The URL comes from an ordered list of named sources; the first one holding
//! a non-empty value wins:
//!
//! 1. `command-line` - `--url` flag (only when given)
//! 2. `embedded` - `expo.extra.updateJsonUrl` from `app.json`
//! 3. `environment` - `EXPO_PUBLIC_UPDATE_JSON_URL`
//! 4. `default` - [`DEFAULT_UPDATE_URL`]
//!
//! Environment access goes through [`EnvLookup`] so resolution can be tested
//! without touching the process environment. The result is a plain
//! [`ResolvedUrl`] value handed to the fetcher.

use crate::config::AppInfo;
use crate::constants::{DEFAULT_UPDATE_URL, UPDATE_URL_ENV_VAR};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

/// Read access to environment variables.
pub trait EnvLookup {
    fn var(&self, key: &str) -> Option<String>;
}

/// [`EnvLookup`] backed by the real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl EnvLookup for ProcessEnv {
    fn var(&self, key: &str) -> Option<String> {
        std::env::var(key).ok()
    }
}

impl EnvLookup for HashMap<String, String> {
    fn var(&self, key: &str) -> Option<String> {
        self.get(key).cloned()
    }
}

/// Where a resolved URL came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UrlSourceKind {
    CommandLine,
    Embedded,
    Environment,
    Default,
}

impl UrlSourceKind {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::CommandLine => "command-line",
            Self::Embedded => "embedded",
            Self::Environment => "environment",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for UrlSourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named candidate value.
#[derive(Debug, Clone)]
pub struct UrlSource {
    pub kind: UrlSourceKind,
    pub candidate: Option<String>,
}

/// Manifest URL together with the source that supplied it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedUrl {
    pub url: String,
    pub source: UrlSourceKind,
}

impl ResolvedUrl {
    /// A URL given directly, e.g. in tests.
    pub fn explicit(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: UrlSourceKind::CommandLine,
        }
    }
}

/// Ordered list of URL sources.
#[derive(Debug, Clone, Default)]
pub struct UpdateUrlResolver {
    sources: Vec<UrlSource>,
}

impl UpdateUrlResolver {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a source; earlier sources take priority.
    #[must_use]
    pub fn with_source(mut self, kind: UrlSourceKind, candidate: Option<String>) -> Self {
        self.sources.push(UrlSource { kind, candidate });
        self
    }

    /// The standard chain: command line, embedded config, environment, default.
    pub fn standard(cli_url: Option<String>, app: &AppInfo, env: &impl EnvLookup) -> Self {
        Self::new()
            .with_source(UrlSourceKind::CommandLine, cli_url)
            .with_source(UrlSourceKind::Embedded, app.embedded_update_url.clone())
            .with_source(UrlSourceKind::Environment, env.var(UPDATE_URL_ENV_VAR))
            .with_source(UrlSourceKind::Default, Some(DEFAULT_UPDATE_URL.to_string()))
    }

    #[must_use]
    pub fn sources(&self) -> &[UrlSource] {
        &self.sources
    }

    /// First non-empty candidate, trimmed.
    #[must_use]
    pub fn resolve(&self) -> Option<ResolvedUrl> {
        for source in &self.sources {
            let Some(value) = source.candidate.as_deref().map(str::trim) else {
                debug!("Update URL source '{}' not set", source.kind);
                continue;
            };
            if value.is_empty() {
                debug!("Update URL source '{}' is empty, skipping", source.kind);
                continue;
            }

            if source.kind == UrlSourceKind::Default {
                warn!(
                    "Update URL not configured; set {} or expo.extra.updateJsonUrl. Using default {}",
                    UPDATE_URL_ENV_VAR, value
                );
            } else {
                debug!("Update URL from {} source: {}", source.kind, value);
            }

            return Some(ResolvedUrl {
                url: value.to_string(),
                source: source.kind,
            });
        }
        None
    }
}

/// Resolve the manifest URL through the standard chain.
pub fn resolve_update_url(
    cli_url: Option<String>,
    app: &AppInfo,
    env: &impl EnvLookup,
) -> ResolvedUrl {
    UpdateUrlResolver::standard(cli_url, app, env)
        .resolve()
        .unwrap_or_else(|| ResolvedUrl {
            url: DEFAULT_UPDATE_URL.to_string(),
            source: UrlSourceKind::Default,
        })
}
