//! Version codes and their comparison.
//!
//! A version code is the monotonically increasing integer that orders builds.
//! By convention it is the last number of the dotted display version:
//! `"1.0.7"` has code 7, `"2.0.10"` has code 10.

use crate::core::UpdaterError;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Non-negative build number used to order releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct VersionCode(u64);

impl VersionCode {
    #[must_use]
    pub const fn new(code: u64) -> Self {
        Self(code)
    }

    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// Interpret a JSON value as a version code.
    ///
    /// Accepts non-negative integers and strings made of decimal digits.
    /// Floats, negatives, booleans and other strings are rejected.
    pub fn from_json(value: &Value) -> Result<Self, UpdaterError> {
        match value {
            Value::Number(number) => number.as_u64().map(Self).ok_or_else(|| {
                UpdaterError::invalid_version(
                    number.to_string(),
                    "version code must be a non-negative integer",
                )
            }),
            Value::String(text) => text.parse(),
            other => Err(UpdaterError::invalid_version(
                other.to_string(),
                "version code must be a number",
            )),
        }
    }
}

impl FromStr for VersionCode {
    type Err = UpdaterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return Err(UpdaterError::invalid_version(
                s,
                "version code must be a non-negative integer",
            ));
        }
        trimmed
            .parse::<u64>()
            .map(Self)
            .map_err(|e| UpdaterError::invalid_version(s, e.to_string()))
    }
}

impl TryFrom<i64> for VersionCode {
    type Error = UpdaterError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u64::try_from(value)
            .map(Self)
            .map_err(|_| UpdaterError::invalid_version(value.to_string(), "version code is negative"))
    }
}

impl From<u64> for VersionCode {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for VersionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Derive the version code from a dotted version name.
///
/// Takes the leading decimal digits of the last dot-separated segment, the
/// way `parseInt` reads it: `"1.0.7"` gives 7, `"1.0.7-beta"` gives 7.
///
/// # Errors
///
/// [`UpdaterError::InvalidVersion`] when the last segment does not start with
/// a digit, e.g. `"1.0.x"` or `"1.0."`.
pub fn derive_version_code(version_name: &str) -> Result<VersionCode, UpdaterError> {
    let last = version_name.trim().rsplit('.').next().unwrap_or_default();
    let digits: &str = {
        let end = last
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(last.len());
        &last[..end]
    };

    if digits.is_empty() {
        return Err(UpdaterError::invalid_version(
            version_name,
            "last segment of the version name is not a number",
        ));
    }

    digits
        .parse::<u64>()
        .map(VersionCode)
        .map_err(|e| UpdaterError::invalid_version(version_name, e.to_string()))
}

/// Whether `remote` is strictly newer than `installed`.
///
/// Ties and lower remote codes never signal an update.
///
/// # Errors
///
/// [`UpdaterError::InvalidVersion`] if either value is negative. Callers treat
/// this as "no update available".
pub fn is_update_available(remote: i64, installed: i64) -> Result<bool, UpdaterError> {
    let remote = VersionCode::try_from(remote)?;
    let installed = VersionCode::try_from(installed)?;
    Ok(is_newer(remote, installed))
}

/// Typed form of [`is_update_available`].
#[must_use]
pub fn is_newer(remote: VersionCode, installed: VersionCode) -> bool {
    remote > installed
}
