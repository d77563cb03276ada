//! Error handling for barbersbar-update
//!
//! The error system follows two principles:
//! 1. **Strongly-typed errors** so the check cycle can tell a network failure
//!    from a malformed manifest or an invalid version code
//! 2. **User-friendly messages** with actionable suggestions for CLI users
//!
//! # Architecture
//!
//! - [`UpdaterError`] - Enumerated error types for every failure case
//! - [`ErrorContext`] - Wrapper that adds user-friendly messages and suggestions
//!
//! Inside a check cycle the update-related variants ([`UpdaterError::Network`],
//! [`UpdaterError::Parse`], [`UpdaterError::InvalidVersion`]) are never fatal:
//! the cycle reports "no update" and logs the failure. The remaining variants
//! surface from CLI plumbing (configuration files, `app.json`, output files).
//!
//! # Examples
//!
//! ```rust,no_run
//! use barbersbar_update::core::{UpdaterError, ErrorContext, user_friendly_error};
//!
//! let error = UpdaterError::AppConfigNotFound { path: "app.json".to_string() };
//! let ctx = user_friendly_error(anyhow::Error::from(error));
//! ctx.display(); // Shows colored error with suggestions
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// Every failure the updater can report.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UpdaterError {
    /// The manifest request could not complete (connectivity, timeout, non-2xx).
    #[error("Failed to fetch update manifest from {url}: {reason}")]
    Network {
        /// Manifest URL that was requested
        url: String,
        /// Transport-level reason or HTTP status
        reason: String,
    },

    /// The manifest body was not valid JSON or lacked required fields.
    #[error("Invalid update manifest: {reason}")]
    Parse {
        /// What was wrong with the body
        reason: String,
    },

    /// A version code was missing, non-numeric, negative or inconsistent.
    #[error("Invalid version '{value}': {reason}")]
    InvalidVersion {
        /// The offending raw value
        value: String,
        /// Why it was rejected
        reason: String,
    },

    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
    },

    #[error("App configuration file not found: {path}")]
    AppConfigNotFound {
        path: String,
    },

    #[error("Invalid app configuration in {file}")]
    AppConfigParse {
        file: String,
        reason: String,
    },

    #[error("File system error during {operation}: {path}")]
    Io {
        operation: String,
        path: String,
    },
}

impl UpdaterError {
    /// Shorthand for [`UpdaterError::InvalidVersion`].
    pub fn invalid_version(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidVersion {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Shorthand for [`UpdaterError::Parse`].
    pub fn parse(reason: impl Into<String>) -> Self {
        Self::Parse {
            reason: reason.into(),
        }
    }

    /// Whether this error belongs to the inconclusive-check family.
    ///
    /// These never abort the host application; the check cycle treats them
    /// as "no update available".
    #[must_use]
    pub const fn is_check_failure(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Parse { .. } | Self::InvalidVersion { .. }
        )
    }

    /// Short machine-friendly label, used in JSON output and log fields.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Network { .. } => "network",
            Self::Parse { .. } => "parse",
            Self::InvalidVersion { .. } => "invalid_version",
            Self::ConfigError { .. } => "config",
            Self::AppConfigNotFound { .. } => "app_config_not_found",
            Self::AppConfigParse { .. } => "app_config_parse",
            Self::Io { .. } => "io",
        }
    }
}

/// Error wrapper carrying an optional suggestion and details for CLI display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: UpdaterError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: UpdaterError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    #[must_use]
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error.
    #[must_use]
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Recognizes [`UpdaterError`] (also when wrapped in anyhow context),
/// [`std::io::Error`] and [`toml::de::Error`]; anything else is reported with
/// its full context chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(updater_error) = error.downcast_ref::<UpdaterError>() {
        return create_error_context(updater_error.clone());
    }

    for cause in error.chain() {
        if let Some(updater_error) = cause.downcast_ref::<UpdaterError>() {
            return create_error_context(updater_error.clone())
                .with_details(format!("{error:#}"));
        }
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        return match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => ErrorContext::new(UpdaterError::Io {
                operation: "file access".to_string(),
                path: "unknown".to_string(),
            })
            .with_suggestion("Check file ownership and permissions of the output directory")
            .with_details(io_error.to_string()),
            _ => ErrorContext::new(UpdaterError::Io {
                operation: "file access".to_string(),
                path: "unknown".to_string(),
            })
            .with_details(io_error.to_string()),
        };
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(UpdaterError::ConfigError {
            message: "invalid TOML syntax".to_string(),
        })
        .with_suggestion("Check the settings file for missing quotes or unmatched brackets")
        .with_details(toml_error.to_string());
    }

    ErrorContext::new(UpdaterError::ConfigError {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: UpdaterError) -> ErrorContext {
    match &error {
        UpdaterError::Network { url, .. } => {
            let url = url.clone();
            ErrorContext::new(error)
                .with_suggestion(format!(
                    "Check your internet connection and that {url} is reachable. Override it with --url or EXPO_PUBLIC_UPDATE_JSON_URL"
                ))
                .with_details("The manifest is fetched once per check; the next check will try again")
        }
        UpdaterError::Parse { .. } => ErrorContext::new(error)
            .with_suggestion("The manifest must be JSON with versionName, versionCode, url and releaseNotes")
            .with_details("Regenerate it with 'barbersbar-update generate'"),
        UpdaterError::InvalidVersion { .. } => ErrorContext::new(error)
            .with_suggestion("versionCode must be a non-negative integer equal to the last number of versionName (1.0.7 -> 7)"),
        UpdaterError::ConfigError { .. } => ErrorContext::new(error)
            .with_suggestion("Inspect the settings with 'barbersbar-update config show'"),
        UpdaterError::AppConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Run the command from the app directory or pass --app-config <path>"),
        UpdaterError::AppConfigParse { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_suggestion("app.json must be valid JSON with an 'expo' object")
                .with_details(reason)
        }
        UpdaterError::Io { path, .. } => {
            let path = path.clone();
            ErrorContext::new(error)
                .with_suggestion(format!("Check that {path} is writable"))
        }
    }
}
