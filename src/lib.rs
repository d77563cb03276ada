//! barbersbar-update - update checks for the Barbersbar Android app
//!
//! The app is distributed outside an app store. A small JSON manifest
//! (`update.json`) published at a known URL describes the latest build; this
//! crate fetches it, compares its `versionCode` with the installed build and,
//! when the remote build is newer, hands the download URL and release notes to
//! the user.
//!
//! # Manifest Format
//!
//! ```json
//! {
//!   "versionName": "1.0.6",
//!   "versionCode": 6,
//!   "url": "https://example.com/barbersbar-1.0.6.apk",
//!   "releaseNotes": "Booking fixes"
//! }
//! ```
//!
//! `versionCode` must equal the leading digits of the last dot-separated
//! segment of `versionName`. Manifests that break this, lack a field, or are
//! not JSON at all count as "no update".
//!
//! # Modules
//!
//! - [`update`] - fetching, comparison, presentation, check cycles, generation
//! - [`config`] - app.json, URL resolution and user settings
//! - [`core`] - error types and user-facing error formatting
//! - [`cli`] - the `barbersbar-update` command line
//! - [`constants`] - defaults shared across modules

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod update;

// test_utils module is available for both unit tests and integration tests
#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
