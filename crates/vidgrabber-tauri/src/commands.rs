//! Tauri commands for the VidGrabber client
//!
//! This module contains all Tauri command implementations.

use tauri::{AppHandle, Runtime, State};
use vidgrabber_core::{
    CopyLinkButton, CopyOutcome, ResultsRenderer, ResultsView, SubmitOutcome, SystemClipboard,
};

use crate::VidgrabberState;
use crate::view::{COPY_LABEL_EVENT, CopyLabelChange, WebviewView};

/// Submit a video URL, the analogue of the page's Download button
///
/// Control and message changes are emitted as events while the request
/// runs; the final outcome tells the frontend whether to navigate.
///
/// # Arguments
/// * `app` - Handle used to emit UI events
/// * `state` - Managed VidgrabberState from Tauri
/// * `url` - Raw input field value
///
/// # Returns
/// The submission outcome
#[tauri::command]
pub async fn submit_url<R: Runtime>(
    app: AppHandle<R>,
    state: State<'_, VidgrabberState>,
    url: String,
) -> Result<SubmitOutcome, String> {
    let controller = state.controller.lock().await;
    let mut view = WebviewView::new(app);
    Ok(controller.submit(&url, &mut view).await)
}

/// Render the cached metadata for the results page
///
/// # Returns
/// The results view; never an error, broken caches render as notices
#[tauri::command]
pub async fn load_results(state: State<'_, VidgrabberState>) -> Result<ResultsView, String> {
    let controller = state.controller.lock().await;
    Ok(ResultsRenderer::new().render_cached(controller.storage()))
}

/// Copy a format URL to the clipboard
///
/// On success a `Copied!` label is emitted immediately and the idle label
/// two seconds later.
///
/// # Errors
/// Never; a clipboard failure is reported as `CopyOutcome::Failed` so the
/// frontend can raise its alert
#[tauri::command]
pub async fn copy_format_link<R: Runtime>(
    app: AppHandle<R>,
    url: String,
) -> Result<CopyOutcome, String> {
    let mut button = CopyLinkButton::new();
    let outcome = button.press(&mut SystemClipboard, &url);
    if outcome != CopyOutcome::Copied {
        return Ok(outcome);
    }

    let view = WebviewView::new(app);
    view.emit(
        COPY_LABEL_EVENT,
        CopyLabelChange {
            url: url.clone(),
            label: button.label().to_string(),
        },
    );

    tauri::async_runtime::spawn(async move {
        button.settle().await;
        view.emit(
            COPY_LABEL_EVENT,
            CopyLabelChange {
                url,
                label: button.label().to_string(),
            },
        );
    });

    Ok(outcome)
}
