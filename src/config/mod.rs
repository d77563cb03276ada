//! Configuration for the updater
//!
//! Three inputs feed a check cycle:
//!
//! 1. **App configuration** (`app.json`) - build info of the installed app and
//!    an optional embedded manifest URL, see [`AppInfo`]
//! 2. **URL sources** - the ordered fallback chain that picks the manifest URL,
//!    see [`UpdateUrlResolver`]
//! 3. **User settings** (`~/.barbersbar/config.toml`) - timeouts, watch
//!    interval and the on/off switch, see [`UpdaterSettings`]
//!
//! All three are resolved once, up front, into plain values that are passed
//! to the fetcher and checker. Nothing below the CLI reads the process
//! environment on its own.

pub mod app_info;
pub mod settings;
pub mod url_source;

pub use app_info::AppInfo;
pub use settings::UpdaterSettings;
pub use url_source::{
    EnvLookup, ProcessEnv, ResolvedUrl, UpdateUrlResolver, UrlSourceKind, resolve_update_url,
};
