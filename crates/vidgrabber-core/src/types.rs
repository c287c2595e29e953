//! Wire types exchanged with the VidGrabber backend
//!
//! All response fields except the ones the renderer keys on are optional;
//! missing data must never make a payload unreadable.

use serde::{Deserialize, Serialize};

/// The only outbound payload shape
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoDownloadRequest {
    /// Video page URL, already trimmed
    pub url: String,
}

impl VideoDownloadRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

/// Metadata returned by the info endpoint of the two-step flow
///
/// This is also the value cached under [`crate::storage::VIDEO_DATA_KEY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoInfoResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uploader: Option<String>,

    /// Human readable duration (e.g. "3:32")
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_string: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub formats: Option<Vec<VideoFormat>>,

    /// Application-level failure reported with a success status
    ///
    /// Usually a string; any other non-null value is shown as JSON.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<serde_json::Value>,

    /// URL the backend processed, echoed back
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}

impl VideoInfoResponse {
    /// The `error` field, if it carries anything to show
    pub fn application_error(&self) -> Option<String> {
        value_message(self.error.as_ref()?)
    }
}

/// One downloadable encoding option for a video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VideoFormat {
    #[serde(default)]
    pub format_id: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_note: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fps: Option<f64>,

    /// Container extension (e.g. "mp4")
    #[serde(default)]
    pub ext: String,

    /// Approximate size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filesize_approx: Option<f64>,

    /// Total bitrate in kbps
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tbr: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub acodec: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vcodec: Option<String>,

    /// Direct media URL
    #[serde(default)]
    pub url: String,
}

/// Error body returned by the backend with a non-success status
///
/// `detail` is usually a string, but validation failures carry a list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ErrorPayload {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorPayload {
    /// Text to show for this payload, or `None` to use the generic status message
    pub fn detail_message(&self) -> Option<String> {
        value_message(self.detail.as_ref()?)
    }
}

/// Strings verbatim, null and empty as absent, anything else as compact JSON
fn value_message(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::Null => None,
        serde_json::Value::String(s) if s.is_empty() => None,
        serde_json::Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

/// Treats empty strings as absent
pub(crate) fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

/// Treats zero (and NaN) as absent
pub(crate) fn non_zero(value: Option<f64>) -> Option<f64> {
    value.filter(|v| *v != 0.0 && !v.is_nan())
}
