//! The update manifest: the small JSON document describing the latest build.
//!
//! ```json
//! {
//!   "versionName": "1.0.7",
//!   "versionCode": 7,
//!   "url": "https://example.com/app-1.0.7.apk",
//!   "releaseNotes": "free text"
//! }
//! ```
//!
//! Older manifests used `apkUrl` and `notes`. They are still accepted, also
//! next to `url` and `releaseNotes`, in which case the newer keys win. An
//! optional `sha256` is carried along untouched.
//!
//! Validation classifies failures the way the check cycle reports them:
//! - body is not a JSON object, a required field is missing or has the wrong
//!   type, or the URL is not an absolute `https` URL: [`UpdaterError::Parse`]
//! - `versionCode` missing, non-numeric, negative, or not equal to the code
//!   derived from `versionName`: [`UpdaterError::InvalidVersion`]

use crate::core::UpdaterError;
use crate::update::version::{VersionCode, derive_version_code};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A validated manifest. Immutable for the duration of one check cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateManifest {
    pub version_name: String,
    pub version_code: VersionCode,
    pub url: String,
    pub release_notes: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawManifest {
    version_name: Option<String>,
    version_code: Option<Value>,
    url: Option<String>,
    apk_url: Option<String>,
    release_notes: Option<String>,
    notes: Option<String>,
    sha256: Option<String>,
}

impl UpdateManifest {
    /// Parse and validate a manifest body.
    pub fn parse(body: &str) -> Result<Self, UpdaterError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| UpdaterError::parse(format!("body is not valid JSON: {e}")))?;
        Self::from_value(value)
    }

    /// Validate an already-decoded JSON value.
    pub fn from_value(value: Value) -> Result<Self, UpdaterError> {
        if !value.is_object() {
            return Err(UpdaterError::parse("manifest must be a JSON object"));
        }

        let raw: RawManifest = serde_json::from_value(value)
            .map_err(|e| UpdaterError::parse(format!("unexpected field type: {e}")))?;

        let version_code = match raw.version_code {
            None | Some(Value::Null) => {
                return Err(UpdaterError::invalid_version(
                    "",
                    "manifest is missing versionCode",
                ));
            }
            Some(ref value) => VersionCode::from_json(value)?,
        };

        let version_name = raw
            .version_name
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| UpdaterError::parse("missing required field 'versionName'"))?;

        let url = non_blank(raw.url)
            .or_else(|| non_blank(raw.apk_url))
            .ok_or_else(|| UpdaterError::parse("missing required field 'url'"))?;
        validate_download_url(&url)?;

        let derived = derive_version_code(&version_name)?;
        if derived != version_code {
            return Err(UpdaterError::invalid_version(
                version_code.to_string(),
                format!("versionCode does not match versionName '{version_name}' (expected {derived})"),
            ));
        }

        Ok(Self {
            version_name,
            version_code,
            url,
            release_notes: raw.release_notes.or(raw.notes).unwrap_or_default(),
            sha256: raw.sha256.filter(|hash| !hash.trim().is_empty()),
        })
    }

    /// Pretty JSON in the wire format.
    pub fn to_json_pretty(&self) -> Result<String, UpdaterError> {
        serde_json::to_string_pretty(self).map_err(|e| UpdaterError::parse(e.to_string()))
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|text| !text.trim().is_empty())
}

fn validate_download_url(url: &str) -> Result<(), UpdaterError> {
    let parsed = Url::parse(url.trim())
        .map_err(|e| UpdaterError::parse(format!("url '{url}' is not an absolute URL: {e}")))?;
    if parsed.scheme() != "https" {
        return Err(UpdaterError::parse(format!(
            "url '{url}' must use https, found '{}'",
            parsed.scheme()
        )));
    }
    Ok(())
}
