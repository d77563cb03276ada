//! Update-manifest checking for the Barbersbar app.
//!
//! # Architecture Overview
//!
//! A check cycle flows through three components:
//!
//! ```text
//! 1. Fetch     ManifestSource / HttpManifestFetcher
//!    └── GET the configured URL, parse and validate the JSON manifest
//!
//! 2. Compare   version::is_newer
//!    └── remote versionCode > installed version code ?
//!
//! 3. Present   UpdatePresenter
//!    └── expose url + releaseNotes once per new build
//! ```
//!
//! [`UpdateSession`] wires the three together and discards results of cycles
//! that were superseded while their fetch was in flight.
//!
//! # Failure Model
//!
//! Network failures, malformed manifests and invalid version codes all make a
//! check inconclusive: they are logged, reported as
//! [`UpdateStatus::Error`], and never produce a prompt. Nothing is retried
//! within a cycle; the next natural trigger simply checks again.
//!
//! # What Is Not Here
//!
//! Downloading the installer, checksum or signature verification,
//! installation and rollback are the platform's job. The optional `sha256` of
//! a manifest is passed through to the prompt untouched.
//!
//! # Example
//!
//! ```rust,no_run
//! use barbersbar_update::config::ResolvedUrl;
//! use barbersbar_update::update::{HttpManifestFetcher, UpdateChecker, UpdateSession, VersionCode};
//! use std::time::Duration;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let fetcher = HttpManifestFetcher::new(Duration::from_secs(10), "example")?;
//! let session = UpdateSession::new(
//!     UpdateChecker::new(fetcher),
//!     ResolvedUrl::explicit("https://example.com/update.json"),
//!     VersionCode::new(5),
//! );
//!
//! if let Some(prompt) = session.run_cycle().await.prompt {
//!     println!("{}", prompt.render());
//! }
//! # Ok(())
//! # }
//! ```

pub mod checker;
pub mod cycle;
pub mod fetcher;
pub mod generator;
pub mod manifest;
pub mod presenter;
pub mod version;

pub use checker::{UpdateChecker, UpdateInfo, UpdateStatus};
pub use cycle::{CycleGuard, CycleOutcome, CycleTicket, UpdateSession};
pub use fetcher::{HttpManifestFetcher, ManifestSource};
pub use generator::ManifestGenerator;
pub use manifest::UpdateManifest;
pub use presenter::{UpdatePresenter, UpdatePrompt, format_check_result};
pub use version::{VersionCode, derive_version_code, is_newer, is_update_available};
