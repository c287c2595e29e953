//! Client configuration
//!
//! Loaded from `<config dir>/vidgrabber/config.toml` when present.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, VidgrabberError};

/// Backend address used by the original page script
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8000";

/// Which backend contract a deployment speaks
///
/// The two variants are mutually exclusive for a given deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProtocolVariant {
    /// `POST /api/process_and_download_video`, the response is the file
    DirectDownload,
    /// `POST /api/download`, the response is metadata rendered on a second view
    #[default]
    TwoStep,
}

/// Configuration for the HTTP client and submission flow
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL (default: http://127.0.0.1:8000)
    pub endpoint: String,
    /// Backend contract (default: two-step)
    pub variant: ProtocolVariant,
    /// Request timeout in seconds (default: none, platform behavior)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Where direct downloads are written (default: the user's download dir)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub download_dir: Option<PathBuf>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            variant: ProtocolVariant::default(),
            timeout_secs: None,
            download_dir: None,
        }
    }
}

impl ClientConfig {
    /// Parse a TOML document; missing keys take their defaults
    pub fn from_toml(data: &str) -> Result<Self> {
        toml::from_str(data).map_err(|e| VidgrabberError::Config(e.to_string()))
    }

    /// Load from `path`, falling back to defaults if the file does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let data = fs::read_to_string(path)?;
        Self::from_toml(&data)
    }

    /// Load from the default location, falling back to defaults
    pub fn load_or_default() -> Result<Self> {
        match config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Directory direct downloads are written to
    pub fn resolved_download_dir(&self) -> PathBuf {
        self.download_dir
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// `<config dir>/vidgrabber/config.toml`, if the platform has a config dir
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("vidgrabber").join("config.toml"))
}
