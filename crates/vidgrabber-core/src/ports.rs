//! Ports the core talks through
//!
//! The controller and renderer never touch the network, the cache or the
//! clipboard directly; hosts inject implementations of these traits.

use std::path::PathBuf;

use async_trait::async_trait;

use crate::error::Result;
use crate::types::VideoDownloadRequest;

/// A response as seen by the controller
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortResponse {
    /// HTTP status code
    pub status: u16,
    /// Raw `Content-Disposition` header, if any
    pub content_disposition: Option<String>,
    /// Buffered body; empty when the platform consumed it as a download
    pub body: Vec<u8>,
    /// Where the platform stored a consumed download
    pub saved_to: Option<PathBuf>,
}

impl PortResponse {
    /// Whether the status is in the 2xx range
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Outbound HTTP
#[async_trait]
pub trait NetworkPort: Send + Sync {
    /// POST `request` as JSON to `path` and buffer the whole response
    async fn post_json(&self, path: &str, request: &VideoDownloadRequest) -> Result<PortResponse>;

    /// POST `request` as JSON to `path`, handing a successful body to the
    /// platform's download handling instead of returning it
    ///
    /// Non-success bodies are still buffered so the caller can read the
    /// error payload.
    async fn post_for_download(
        &self,
        path: &str,
        request: &VideoDownloadRequest,
    ) -> Result<PortResponse>;
}

/// Origin-scoped string key-value store
pub trait StoragePort: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// System clipboard
pub trait ClipboardPort {
    fn write_text(&mut self, text: &str) -> Result<()>;
}

#[async_trait]
impl<T: NetworkPort + ?Sized> NetworkPort for std::sync::Arc<T> {
    async fn post_json(&self, path: &str, request: &VideoDownloadRequest) -> Result<PortResponse> {
        (**self).post_json(path, request).await
    }

    async fn post_for_download(
        &self,
        path: &str,
        request: &VideoDownloadRequest,
    ) -> Result<PortResponse> {
        (**self).post_for_download(path, request).await
    }
}

impl<T: StoragePort + ?Sized> StoragePort for std::sync::Arc<T> {
    fn get(&self, key: &str) -> Result<Option<String>> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<()> {
        (**self).set(key, value)
    }
}
