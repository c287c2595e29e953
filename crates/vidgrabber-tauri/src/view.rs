//! Webview side of the submit flow
//!
//! UI affordance changes are pushed to the frontend as events.

use serde::{Deserialize, Serialize};
use tauri::{AppHandle, Emitter, Runtime};
use vidgrabber_core::{ControlState, StatusMessage, SubmitView};

/// Payload: [`ControlState`]
pub const CONTROL_EVENT: &str = "vidgrabber://control";
/// Payload: [`StatusMessage`]
pub const MESSAGE_EVENT: &str = "vidgrabber://message";
/// Payload: [`CopyLabelChange`]
pub const COPY_LABEL_EVENT: &str = "vidgrabber://copy-label";

/// New label for the copy control of the format with `url`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyLabelChange {
    pub url: String,
    pub label: String,
}

/// [`SubmitView`] that emits every change to the webview
pub struct WebviewView<R: Runtime> {
    app: AppHandle<R>,
}

impl<R: Runtime> WebviewView<R> {
    pub fn new(app: AppHandle<R>) -> Self {
        Self { app }
    }

    pub(crate) fn emit<S: Serialize + Clone>(&self, event: &str, payload: S) {
        if let Err(e) = self.app.emit(event, payload) {
            tracing::warn!("failed to emit {}: {}", event, e);
        }
    }
}

impl<R: Runtime> SubmitView for WebviewView<R> {
    fn set_control(&mut self, state: &ControlState) {
        self.emit(CONTROL_EVENT, state);
    }

    fn show_message(&mut self, message: &StatusMessage) {
        self.emit(MESSAGE_EVENT, message);
    }
}
