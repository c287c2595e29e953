//! Error types for the VidGrabber client
//!
//! Provides a single error enum with human-readable messages
//! and Tauri-compatible serialization.

use serde::{Serialize, Serializer};
use thiserror::Error;

/// Error type for all VidGrabber client operations
///
/// The `Display` text is what ends up after `Error: ` in the status
/// message shown to the user.
#[derive(Error, Debug)]
pub enum VidgrabberError {
    /// Transport-level failure (unreachable host, timeout, TLS, ...)
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Backend answered with a non-success status
    #[error("{}", http_status_message(.status, .detail))]
    HttpStatus { status: u16, detail: Option<String> },

    /// Backend answered 2xx but the payload carries an `error` field
    #[error("{0}")]
    Application(String),

    /// Response or cached payload is not the expected JSON
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Local I/O failed (download sink, file storage)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Storage port could not read or write a key
    #[error("Storage error: {0}")]
    Storage(String),

    /// Configuration file could not be loaded
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Clipboard could not be accessed or written
    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

fn http_status_message(status: &u16, detail: &Option<String>) -> String {
    match detail {
        Some(detail) => detail.clone(),
        None => format!("HTTP error, status {}", status),
    }
}

impl Serialize for VidgrabberError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// Result type alias for VidGrabber operations
pub type Result<T> = std::result::Result<T, VidgrabberError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_uses_detail() {
        let error = VidgrabberError::HttpStatus {
            status: 404,
            detail: Some("not found".to_string()),
        };
        assert_eq!(error.to_string(), "not found");
    }

    #[test]
    fn test_http_status_generic_message() {
        let error = VidgrabberError::HttpStatus {
            status: 502,
            detail: None,
        };
        assert_eq!(error.to_string(), "HTTP error, status 502");
    }

    #[test]
    fn test_application_error_is_verbatim() {
        let error = VidgrabberError::Application("unsupported site".to_string());
        assert_eq!(error.to_string(), "unsupported site");
    }

    #[test]
    fn test_storage_error_display() {
        let error = VidgrabberError::Storage("quota exceeded".to_string());
        assert_eq!(error.to_string(), "Storage error: quota exceeded");
    }

    #[test]
    fn test_config_error_display() {
        let error = VidgrabberError::Config("unknown variant".to_string());
        assert_eq!(error.to_string(), "Invalid configuration: unknown variant");
    }

    #[test]
    fn test_error_serialize() {
        let error = VidgrabberError::Application("unsupported site".to_string());
        let json = serde_json::to_string(&error).expect("Serialization should succeed");
        assert_eq!(json, "\"unsupported site\"");
    }
}
