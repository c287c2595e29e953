//! VidGrabber Tauri Integration
//!
//! Provides Tauri plugin binding the webview's submit button and results page
//! to the VidGrabber client core.
//!
//! # Usage
//!
//! Register the plugin in your Tauri application:
//!
//! ```ignore
//! fn main() {
//!     tauri::Builder::default()
//!         .plugin(vidgrabber_tauri::init())
//!         .run(tauri::generate_context!())
//!         .expect("error while running tauri application");
//! }
//! ```
//!
//! Then invoke commands from the frontend:
//!
//! ```javascript
//! import { invoke } from '@tauri-apps/api/core';
//! import { listen } from '@tauri-apps/api/event';
//!
//! await listen('vidgrabber://control', (e) => {
//!   submitBtn.disabled = !e.payload.enabled;
//!   submitBtn.textContent = e.payload.label;
//! });
//!
//! const outcome = await invoke('plugin:vidgrabber|submit_url', { url: videoUrlInput.value });
//! if (outcome.type === 'navigate') window.location.href = outcome.target;
//!
//! // On result.html
//! const view = await invoke('plugin:vidgrabber|load_results');
//! ```

use std::path::Path;
use std::sync::Arc;
use tokio::sync::Mutex;

use tauri::{
    Manager, Runtime,
    plugin::{Builder, TauriPlugin},
};
use vidgrabber_core::{ClientConfig, FileStorage, HttpClient, SubmissionController};

mod commands;
mod view;

pub use view::{CONTROL_EVENT, COPY_LABEL_EVENT, CopyLabelChange, MESSAGE_EVENT, WebviewView};

/// Controller wired to the real backend and the app's local data dir
pub type AppController = SubmissionController<HttpClient, FileStorage>;

/// Thread-safe wrapper for the submission controller
///
/// Uses Arc<Mutex<>> so a second click cannot interleave with a running
/// submission if the frontend fails to disable the button.
pub struct VidgrabberState {
    pub(crate) controller: Arc<Mutex<AppController>>,
}

impl VidgrabberState {
    /// Create a new state storing its cache under `data_dir`
    ///
    /// # Errors
    /// Returns error string if the HTTP client cannot be built
    pub fn new(config: &ClientConfig, data_dir: &Path) -> Result<Self, String> {
        let client = HttpClient::with_config(config).map_err(|e| e.to_string())?;
        let controller =
            SubmissionController::new(client, FileStorage::in_dir(data_dir), config.variant);
        Ok(Self {
            controller: Arc::new(Mutex::new(controller)),
        })
    }
}

/// Initialize the vidgrabber plugin with the configuration file, or defaults
///
/// # Returns
/// A configured TauriPlugin ready to be registered with the Tauri application
pub fn init<R: Runtime>() -> TauriPlugin<R> {
    let config = ClientConfig::load_or_default().unwrap_or_else(|e| {
        tracing::warn!("ignoring configuration: {}", e);
        ClientConfig::default()
    });
    init_with_config(config)
}

/// Initialize the vidgrabber plugin with an explicit configuration
///
/// # Example
/// ```ignore
/// let config = vidgrabber_core::ClientConfig {
///     variant: vidgrabber_core::ProtocolVariant::DirectDownload,
///     ..Default::default()
/// };
/// tauri::Builder::default()
///     .plugin(vidgrabber_tauri::init_with_config(config))
///     .run(tauri::generate_context!())
///     .expect("error while running tauri application");
/// ```
pub fn init_with_config<R: Runtime>(config: ClientConfig) -> TauriPlugin<R> {
    Builder::new("vidgrabber")
        .invoke_handler(tauri::generate_handler![
            commands::submit_url,
            commands::load_results,
            commands::copy_format_link
        ])
        .setup(move |app, _api| {
            let data_dir = app.path().app_local_data_dir()?;
            let state = VidgrabberState::new(&config, &data_dir)
                .map_err(Box::<dyn std::error::Error>::from)?;
            tracing::info!(
                "vidgrabber plugin ready ({:?}, cache in {})",
                config.variant,
                data_dir.display()
            );
            app.manage(state);
            Ok(())
        })
        .build()
}

// Re-export types for convenience
pub use vidgrabber_core::{CopyOutcome, ResultsView, SubmitOutcome};
