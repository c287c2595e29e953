//! HTTP client for the VidGrabber backend
//!
//! Implements [`NetworkPort`] on top of reqwest. Each call is exactly one
//! request: no retries, no redirects beyond reqwest's defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::config::ClientConfig;
use crate::disposition::local_filename;
use crate::error::{Result, VidgrabberError};
use crate::ports::{NetworkPort, PortResponse};
use crate::types::VideoDownloadRequest;
use crate::url::build_endpoint_url;

/// Used when a download arrives without a usable filename
const FALLBACK_DOWNLOAD_NAME: &str = "video.download";

/// HTTP client wrapper bound to one backend
///
/// Handles all HTTP communication with the backend:
/// - JSON request bodies with `Content-Type: application/json`
/// - Buffered responses for metadata and error payloads
/// - Streaming successful file responses to the download directory
pub struct HttpClient {
    client: reqwest::Client,
    endpoint: String,
    download_dir: PathBuf,
}

impl HttpClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(&ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: &ClientConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().map_err(VidgrabberError::HttpError)?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            download_dir: config.resolved_download_dir(),
        })
    }

    /// Backend base URL
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Directory successful direct downloads are written to
    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    async fn send(&self, path: &str, request: &VideoDownloadRequest) -> Result<reqwest::Response> {
        let url = build_endpoint_url(&self.endpoint, path);
        tracing::info!("POST {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(VidgrabberError::HttpError)?;

        tracing::debug!("{} answered {}", url, response.status());
        Ok(response)
    }

    /// Stream a response body into the download directory
    ///
    /// Never overwrites: a taken name gets a ` (n)` suffix. A body that
    /// fails partway leaves no file behind.
    async fn save_body(
        &self,
        mut response: reqwest::Response,
        content_disposition: Option<&str>,
    ) -> Result<PathBuf> {
        tokio::fs::create_dir_all(&self.download_dir).await?;
        let name = local_filename(content_disposition, FALLBACK_DOWNLOAD_NAME);
        let (target, mut file) = create_unique(&self.download_dir, &name).await?;

        match write_body(&mut response, &mut file).await {
            Ok(written) => {
                tracing::info!("saved {} bytes to {}", written, target.display());
                Ok(target)
            }
            Err(e) => {
                drop(file);
                if let Err(remove_err) = tokio::fs::remove_file(&target).await {
                    tracing::warn!("could not remove partial {}: {}", target.display(), remove_err);
                }
                Err(e)
            }
        }
    }
}

/// Candidate name for the `n`th collision: `clip.mp4`, `clip (1).mp4`, ...
fn numbered_name(name: &str, n: u32) -> String {
    if n == 0 {
        return name.to_string();
    }
    let path = Path::new(name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(name);
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{} ({}).{}", stem, n, ext),
        None => format!("{} ({})", stem, n),
    }
}

/// Create a file in `dir` that did not exist before
async fn create_unique(dir: &Path, name: &str) -> Result<(PathBuf, tokio::fs::File)> {
    let mut n = 0;
    loop {
        let path = dir.join(numbered_name(name, n));
        match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => n += 1,
            Err(e) => return Err(e.into()),
        }
    }
}

async fn write_body(response: &mut reqwest::Response, file: &mut tokio::fs::File) -> Result<u64> {
    let mut written: u64 = 0;
    while let Some(chunk) = response.chunk().await.map_err(VidgrabberError::HttpError)? {
        file.write_all(&chunk).await?;
        written += chunk.len() as u64;
    }
    file.flush().await?;
    Ok(written)
}

fn content_disposition(response: &reqwest::Response) -> Option<String> {
    response
        .headers()
        .get(reqwest::header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn buffer(response: reqwest::Response) -> Result<PortResponse> {
    let status = response.status().as_u16();
    let content_disposition = content_disposition(&response);
    let body = response
        .bytes()
        .await
        .map_err(VidgrabberError::HttpError)?
        .to_vec();

    Ok(PortResponse {
        status,
        content_disposition,
        body,
        saved_to: None,
    })
}

#[async_trait]
impl NetworkPort for HttpClient {
    async fn post_json(&self, path: &str, request: &VideoDownloadRequest) -> Result<PortResponse> {
        let response = self.send(path, request).await?;
        buffer(response).await
    }

    async fn post_for_download(
        &self,
        path: &str,
        request: &VideoDownloadRequest,
    ) -> Result<PortResponse> {
        let response = self.send(path, request).await?;
        if !response.status().is_success() {
            return buffer(response).await;
        }

        let status = response.status().as_u16();
        let disposition = content_disposition(&response);
        let saved_to = self.save_body(response, disposition.as_deref()).await?;

        Ok(PortResponse {
            status,
            content_disposition: disposition,
            body: Vec::new(),
            saved_to: Some(saved_to),
        })
    }
}
