//! Core types shared by every layer of the updater.
//!
//! Currently this is the error system: [`UpdaterError`] for typed failures and
//! [`ErrorContext`] / [`user_friendly_error`] for CLI reporting.

pub mod error;

pub use error::{ErrorContext, UpdaterError, user_friendly_error};
