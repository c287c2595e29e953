//! URL helper functions for the VidGrabber backend
//!
//! Provides the endpoint paths of both backend contracts.

use crate::config::ProtocolVariant;

/// Path of the direct-download endpoint (response is the file)
pub const PROCESS_AND_DOWNLOAD_PATH: &str = "/api/process_and_download_video";

/// Path of the info endpoint used by the two-step flow
pub const INFO_PATH: &str = "/api/download";

/// Sibling view opened after a successful two-step submission
pub const RESULTS_PAGE: &str = "result.html";

/// Endpoint path for a protocol variant
///
/// # Example
/// ```
/// use vidgrabber_core::ProtocolVariant;
/// use vidgrabber_core::url::endpoint_path;
/// assert_eq!(endpoint_path(ProtocolVariant::TwoStep), "/api/download");
/// ```
pub fn endpoint_path(variant: ProtocolVariant) -> &'static str {
    match variant {
        ProtocolVariant::DirectDownload => PROCESS_AND_DOWNLOAD_PATH,
        ProtocolVariant::TwoStep => INFO_PATH,
    }
}

/// Joins a backend base URL and an endpoint path
///
/// Trailing slashes on the base are ignored.
///
/// # Example
/// ```
/// use vidgrabber_core::url::build_endpoint_url;
/// let url = build_endpoint_url("http://127.0.0.1:8000/", "/api/download");
/// assert_eq!(url, "http://127.0.0.1:8000/api/download");
/// ```
pub fn build_endpoint_url(base: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
