//! Constants shared across the updater.
//!
//! Timeouts, defaults and well-known names live here so the configuration
//! layer, the fetcher and the CLI agree on them.

/// Update manifest used when neither the app configuration nor the
/// environment names one.
pub const DEFAULT_UPDATE_URL: &str = "https://orell123.github.io/barbers-bar-updates/update.json";

/// Environment variable consulted for the manifest URL.
pub const UPDATE_URL_ENV_VAR: &str = "EXPO_PUBLIC_UPDATE_JSON_URL";

/// Environment variable overriding the settings file location.
pub const CONFIG_PATH_ENV_VAR: &str = "BARBERSBAR_CONFIG";

/// App configuration file read for build info and the embedded manifest URL.
pub const DEFAULT_APP_CONFIG: &str = "app.json";

/// Fallback values used when `app.json` omits them.
pub const DEFAULT_APP_NAME: &str = "Barbersbar";
pub const DEFAULT_DISPLAY_VERSION: &str = "1.0.0";
pub const DEFAULT_VERSION_CODE: u64 = 1;

/// Network timeout for a single manifest fetch (10 seconds).
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 10;

/// Seconds between cycles of `watch` (1 hour).
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 3600;

/// User agent sent with manifest requests.
pub fn default_user_agent() -> String {
    format!("barbersbar-update/{}", env!("CARGO_PKG_VERSION"))
}

/// Download URL template used by `generate`; `{version}` is replaced with
/// the version name.
pub const DEFAULT_URL_TEMPLATE: &str = "https://mydomain.com/myapp-{version}.apk";

/// Release notes written by `generate` when none are given.
pub const DEFAULT_GENERATED_NOTES: &str = "Auto-generated from app.json";

/// Output path of `generate`, relative to the app directory.
pub const DEFAULT_MANIFEST_OUTPUT: &str = "public/update.json";

/// Shown in place of empty release notes.
pub const FALLBACK_RELEASE_NOTES: &str = "General improvements and bug fixes";
