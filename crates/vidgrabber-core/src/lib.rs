//! VidGrabber Client Core Library
//!
//! Submits video URLs to a VidGrabber backend and renders what comes back.
//!
//! # Overview
//!
//! This crate holds all client behavior, independent of any UI toolkit:
//! - [`SubmissionController`] runs one request per user action and drives the
//!   submit control and status message through a [`SubmitView`]
//! - [`ResultsRenderer`] turns the cached metadata into a [`ResultsView`]
//! - [`CopyLinkButton`] is the per-format copy-to-clipboard control
//!
//! Network, cache and clipboard are reached through the traits in [`ports`],
//! so hosts (a Tauri webview, a terminal) inject their own implementations.
//!
//! # Example
//!
//! ```no_run
//! use vidgrabber_core::{
//!     ClientConfig, ControlState, FileStorage, HttpClient, ResultsRenderer, StatusMessage,
//!     SubmissionController, SubmitOutcome, SubmitView,
//! };
//!
//! struct Stdout;
//!
//! impl SubmitView for Stdout {
//!     fn set_control(&mut self, _state: &ControlState) {}
//!     fn show_message(&mut self, message: &StatusMessage) {
//!         println!("{}", message.text);
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() -> vidgrabber_core::Result<()> {
//!     let config = ClientConfig::load_or_default()?;
//!     let controller = SubmissionController::new(
//!         HttpClient::with_config(&config)?,
//!         FileStorage::default_location(),
//!         config.variant,
//!     );
//!
//!     let outcome = controller.submit("https://example.com/watch?v=1", &mut Stdout).await;
//!     if let SubmitOutcome::Navigate { .. } = outcome {
//!         print!("{}", ResultsRenderer::new().render_cached(controller.storage()));
//!     }
//!     Ok(())
//! }
//! ```
//!
//! # Protocol variants
//!
//! A deployment speaks one of two contracts, chosen by
//! [`ClientConfig::variant`]:
//!
//! - **two-step**: `POST /api/download` returns metadata, which is cached under
//!   `videoData` and rendered on the results view;
//! - **direct-download**: `POST /api/process_and_download_video` returns the
//!   file itself, which the network adapter saves.

mod client;
mod clipboard;
pub mod config;
mod controller;
mod copy;
pub mod disposition;
mod error;
pub mod ports;
pub mod render;
mod storage;
mod types;
pub mod url;

// Re-export adapters
pub use client::HttpClient;
pub use clipboard::SystemClipboard;
pub use storage::{FileStorage, MemoryStorage, VIDEO_DATA_KEY};

// Re-export configuration
pub use config::{ClientConfig, ProtocolVariant};

// Re-export the submission flow
pub use controller::{
    ControlState, MessageKind, StatusMessage, SubmissionController, SubmitOutcome, SubmitView,
    submit,
};

// Re-export the results view
pub use copy::{CopyLinkButton, CopyOutcome};
pub use render::{FormatItem, FormatList, ResultsRenderer, ResultsView, VideoView};

// Re-export error types
pub use error::{Result, VidgrabberError};

// Re-export ports and wire types
pub use ports::{ClipboardPort, NetworkPort, PortResponse, StoragePort};
pub use types::{ErrorPayload, VideoDownloadRequest, VideoFormat, VideoInfoResponse};
