//! Submission controller
//!
//! Runs one request/response cycle per user action and drives the submit
//! control and status message through a [`SubmitView`].

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::ProtocolVariant;
use crate::disposition::display_filename;
use crate::error::{Result, VidgrabberError};
use crate::ports::{NetworkPort, PortResponse, StoragePort};
use crate::storage::VIDEO_DATA_KEY;
use crate::types::{ErrorPayload, VideoDownloadRequest, VideoInfoResponse};
use crate::url::{RESULTS_PAGE, endpoint_path};

pub const EMPTY_URL_MESSAGE: &str = "Please paste a video URL.";
pub const REQUESTING_MESSAGE: &str = "Requesting video... This may take a moment.";
pub const IDLE_LABEL: &str = "Download";
pub const BUSY_LABEL: &str = "Processing... Please wait.";

/// State of the submit button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlState {
    pub enabled: bool,
    pub label: String,
}

impl ControlState {
    pub fn idle() -> Self {
        Self {
            enabled: true,
            label: IDLE_LABEL.to_string(),
        }
    }

    pub fn busy() -> Self {
        Self {
            enabled: false,
            label: BUSY_LABEL.to_string(),
        }
    }
}

impl Default for ControlState {
    fn default() -> Self {
        Self::idle()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    Info,
    Success,
    Error,
}

/// Text shown in the status area
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl StatusMessage {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Info,
            text: text.into(),
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Success,
            text: text.into(),
        }
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Error,
            text: text.into(),
        }
    }
}

/// UI affordances the controller updates while a submission runs
pub trait SubmitView {
    fn set_control(&mut self, state: &ControlState);
    fn show_message(&mut self, message: &StatusMessage);
}

/// Result of one submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum SubmitOutcome {
    /// Blank URL; nothing was sent
    Rejected { message: String },
    /// The platform took over the file response
    DownloadStarted {
        filename: String,
        saved_to: Option<PathBuf>,
    },
    /// Metadata cached; the host should open `target`
    Navigate { target: String },
    /// The request failed; `message` is what the user sees
    Failed { message: String },
}

impl SubmitOutcome {
    /// Status message to show for this outcome, if any
    pub fn status_message(&self) -> Option<StatusMessage> {
        match self {
            SubmitOutcome::Rejected { message } | SubmitOutcome::Failed { message } => {
                Some(StatusMessage::error(message.clone()))
            }
            SubmitOutcome::DownloadStarted { filename, .. } => {
                Some(StatusMessage::success(download_message(filename)))
            }
            SubmitOutcome::Navigate { .. } => None,
        }
    }
}

fn download_message(filename: &str) -> String {
    format!(
        "Download for \"{}\" should start automatically. If not, please check your download manager.",
        filename
    )
}

/// Controller bound to one network port, one storage port and one variant
pub struct SubmissionController<N, S> {
    network: N,
    storage: S,
    variant: ProtocolVariant,
}

impl<N: NetworkPort, S: StoragePort> SubmissionController<N, S> {
    pub fn new(network: N, storage: S, variant: ProtocolVariant) -> Self {
        Self {
            network,
            storage,
            variant,
        }
    }

    pub fn variant(&self) -> ProtocolVariant {
        self.variant
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Submit `url` and report progress to `view`
    ///
    /// See [`submit`].
    pub async fn submit<V: SubmitView + ?Sized>(&self, url: &str, view: &mut V) -> SubmitOutcome {
        submit(url, self.variant, &self.network, &self.storage, view).await
    }
}

/// Runs one submission
///
/// A blank URL is rejected before anything else happens. Otherwise the
/// control is disabled, exactly one request is issued, and the control is
/// restored to idle whatever the result.
pub async fn submit<N, S, V>(
    url: &str,
    variant: ProtocolVariant,
    network: &N,
    storage: &S,
    view: &mut V,
) -> SubmitOutcome
where
    N: NetworkPort + ?Sized,
    S: StoragePort + ?Sized,
    V: SubmitView + ?Sized,
{
    let url = url.trim();
    if url.is_empty() {
        let outcome = SubmitOutcome::Rejected {
            message: EMPTY_URL_MESSAGE.to_string(),
        };
        view.show_message(&StatusMessage::error(EMPTY_URL_MESSAGE));
        return outcome;
    }

    view.set_control(&ControlState::busy());
    view.show_message(&StatusMessage::info(REQUESTING_MESSAGE));

    let request = VideoDownloadRequest::new(url);
    let result = match variant {
        ProtocolVariant::DirectDownload => direct_download(network, &request).await,
        ProtocolVariant::TwoStep => fetch_info(network, storage, &request).await,
    };

    let outcome = result.unwrap_or_else(|e| {
        tracing::warn!("submission of {} failed: {}", url, e);
        SubmitOutcome::Failed {
            message: format!("Error: {}", e),
        }
    });

    if let Some(message) = outcome.status_message() {
        view.show_message(&message);
    }
    view.set_control(&ControlState::idle());

    tracing::info!("submission of {} finished: {:?}", url, outcome);
    outcome
}

async fn direct_download<N>(network: &N, request: &VideoDownloadRequest) -> Result<SubmitOutcome>
where
    N: NetworkPort + ?Sized,
{
    let path = endpoint_path(ProtocolVariant::DirectDownload);
    let response = network.post_for_download(path, request).await?;
    ensure_success(&response)?;

    Ok(SubmitOutcome::DownloadStarted {
        filename: display_filename(response.content_disposition.as_deref()),
        saved_to: response.saved_to,
    })
}

async fn fetch_info<N, S>(
    network: &N,
    storage: &S,
    request: &VideoDownloadRequest,
) -> Result<SubmitOutcome>
where
    N: NetworkPort + ?Sized,
    S: StoragePort + ?Sized,
{
    let path = endpoint_path(ProtocolVariant::TwoStep);
    let response = network.post_json(path, request).await?;
    ensure_success(&response)?;

    let info: VideoInfoResponse = serde_json::from_slice(&response.body)?;
    if let Some(error) = info.application_error() {
        return Err(VidgrabberError::Application(error));
    }

    storage.set(VIDEO_DATA_KEY, &serde_json::to_string(&info)?)?;
    tracing::debug!("cached video info under {}", VIDEO_DATA_KEY);

    Ok(SubmitOutcome::Navigate {
        target: RESULTS_PAGE.to_string(),
    })
}

/// Maps a non-success status to [`VidgrabberError::HttpStatus`]
///
/// The body is read as an [`ErrorPayload`] on a best-effort basis.
fn ensure_success(response: &PortResponse) -> Result<()> {
    if response.is_success() {
        return Ok(());
    }

    let detail = match serde_json::from_slice::<ErrorPayload>(&response.body) {
        Ok(payload) => payload.detail_message(),
        Err(_) => {
            tracing::warn!("could not parse error response as JSON");
            None
        }
    };

    Err(VidgrabberError::HttpStatus {
        status: response.status,
        detail,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::Mutex;

    /// Network port answering every call with a canned response
    struct FakeNetwork {
        reply: std::result::Result<PortResponse, String>,
        calls: Mutex<Vec<(String, String)>>,
    }

    impl FakeNetwork {
        fn replying(status: u16, body: serde_json::Value) -> Self {
            Self::replying_raw(status, body.to_string().into_bytes(), None)
        }

        fn replying_raw(status: u16, body: Vec<u8>, disposition: Option<&str>) -> Self {
            Self {
                reply: Ok(PortResponse {
                    status,
                    content_disposition: disposition.map(str::to_string),
                    body,
                    saved_to: None,
                }),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(message: &str) -> Self {
            Self {
                reply: Err(message.to_string()),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<(String, String)> {
            self.calls.lock().unwrap().clone()
        }

        fn answer(&self, path: &str, request: &VideoDownloadRequest) -> Result<PortResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((path.to_string(), request.url.clone()));
            self.reply.clone().map_err(|e| {
                VidgrabberError::Io(std::io::Error::new(
                    std::io::ErrorKind::ConnectionRefused,
                    e,
                ))
            })
        }
    }

    #[async_trait]
    impl NetworkPort for FakeNetwork {
        async fn post_json(
            &self,
            path: &str,
            request: &VideoDownloadRequest,
        ) -> Result<PortResponse> {
            self.answer(path, request)
        }

        async fn post_for_download(
            &self,
            path: &str,
            request: &VideoDownloadRequest,
        ) -> Result<PortResponse> {
            let mut response = self.answer(path, request)?;
            if response.is_success() {
                response.body.clear();
            }
            Ok(response)
        }
    }

    /// Storage port whose writes always fail
    struct ReadOnlyStorage;

    impl StoragePort for ReadOnlyStorage {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Ok(None)
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(VidgrabberError::Storage("quota exceeded".to_string()))
        }
    }

    #[derive(Default)]
    struct RecordingView {
        controls: Vec<ControlState>,
        messages: Vec<StatusMessage>,
    }

    impl SubmitView for RecordingView {
        fn set_control(&mut self, state: &ControlState) {
            self.controls.push(state.clone());
        }

        fn show_message(&mut self, message: &StatusMessage) {
            self.messages.push(message.clone());
        }
    }

    impl RecordingView {
        fn last_message(&self) -> &StatusMessage {
            self.messages.last().expect("a message was shown")
        }

        fn assert_restored(&self) {
            assert_eq!(
                self.controls,
                vec![ControlState::busy(), ControlState::idle()],
                "control must be disabled then restored"
            );
        }
    }

    #[tokio::test]
    async fn test_two_step_success_caches_and_navigates() {
        let network = FakeNetwork::replying(
            200,
            json!({ "title": "Cat", "formats": [{ "format_id": "18", "ext": "mp4", "acodec": "aac" }] }),
        );
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "  https://example.com/v1 ",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Navigate {
                target: "result.html".to_string()
            }
        );
        assert_eq!(
            network.calls(),
            vec![("/api/download".to_string(), "https://example.com/v1".to_string())]
        );
        let cached = storage.get(VIDEO_DATA_KEY).unwrap().expect("payload cached");
        let info: VideoInfoResponse = serde_json::from_str(&cached).unwrap();
        assert_eq!(info.title.as_deref(), Some("Cat"));
        assert_eq!(view.messages, vec![StatusMessage::info(REQUESTING_MESSAGE)]);
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_empty_url_is_rejected_without_request() {
        let network = FakeNetwork::replying(200, json!({}));
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit("", ProtocolVariant::TwoStep, &network, &storage, &mut view).await;

        assert_eq!(
            outcome,
            SubmitOutcome::Rejected {
                message: "Please paste a video URL.".to_string()
            }
        );
        assert!(network.calls().is_empty());
        assert!(view.controls.is_empty());
        assert_eq!(view.last_message(), &StatusMessage::error("Please paste a video URL."));
    }

    #[tokio::test]
    async fn test_http_error_uses_detail() {
        let network = FakeNetwork::replying(404, json!({ "detail": "not found" }));
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Error: not found".to_string()
            }
        );
        assert_eq!(view.last_message(), &StatusMessage::error("Error: not found"));
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_http_error_with_unparsable_body() {
        let network = FakeNetwork::replying_raw(502, b"<html>Bad Gateway</html>".to_vec(), None);
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::DirectDownload,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Error: HTTP error, status 502".to_string()
            }
        );
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_http_error_without_detail() {
        let network = FakeNetwork::replying(500, json!({ "message": "boom" }));
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Error: HTTP error, status 500".to_string()
            }
        );
    }

    #[tokio::test]
    async fn test_application_error_does_not_navigate() {
        let network = FakeNetwork::replying(200, json!({ "error": "unsupported site" }));
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Error: unsupported site".to_string()
            }
        );
        assert_eq!(storage.get(VIDEO_DATA_KEY).unwrap(), None);
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_structured_application_error_is_reported() {
        let network = FakeNetwork::replying(200, json!({ "error": { "msg": "x" } }));
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: r#"Error: {"msg":"x"}"#.to_string()
            }
        );
        assert_eq!(storage.get(VIDEO_DATA_KEY).unwrap(), None);
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_transport_failure_is_reported() {
        let network = FakeNetwork::failing("connection refused");
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        match outcome {
            SubmitOutcome::Failed { message } => {
                assert!(message.starts_with("Error: "));
                assert!(message.contains("connection refused"));
            }
            other => panic!("Expected Failed, got {:?}", other),
        }
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_malformed_success_body() {
        let network = FakeNetwork::replying_raw(200, b"not json".to_vec(), None);
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert!(matches!(outcome, SubmitOutcome::Failed { .. }));
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_cache_write_failure_is_reported() {
        let network = FakeNetwork::replying(200, json!({ "title": "Cat" }));
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::TwoStep,
            &network,
            &ReadOnlyStorage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::Failed {
                message: "Error: Storage error: quota exceeded".to_string()
            }
        );
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_direct_download_reports_filename() {
        let network = FakeNetwork::replying_raw(
            200,
            b"binary".to_vec(),
            Some(r#"attachment; filename="clip.mp4""#),
        );
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::DirectDownload,
            &network,
            &storage,
            &mut view,
        )
        .await;

        assert_eq!(
            outcome,
            SubmitOutcome::DownloadStarted {
                filename: "clip.mp4".to_string(),
                saved_to: None
            }
        );
        assert_eq!(
            network.calls()[0].0,
            "/api/process_and_download_video".to_string()
        );
        let message = view.last_message();
        assert_eq!(message.kind, MessageKind::Success);
        assert!(message.text.contains("\"clip.mp4\""));
        assert_eq!(storage.get(VIDEO_DATA_KEY).unwrap(), None);
        view.assert_restored();
    }

    #[tokio::test]
    async fn test_direct_download_placeholder_filename() {
        let network = FakeNetwork::replying_raw(200, Vec::new(), None);
        let storage = MemoryStorage::new();
        let mut view = RecordingView::default();

        let outcome = submit(
            "https://example.com/v1",
            ProtocolVariant::DirectDownload,
            &network,
            &storage,
            &mut view,
        )
        .await;

        match outcome {
            SubmitOutcome::DownloadStarted { filename, .. } => assert_eq!(filename, "your video"),
            other => panic!("Expected DownloadStarted, got {:?}", other),
        }
        assert!(view.last_message().text.contains("\"your video\""));
    }

    #[tokio::test]
    async fn test_controller_uses_configured_variant() {
        let controller = SubmissionController::new(
            FakeNetwork::replying(200, json!({ "title": "Cat" })),
            MemoryStorage::new(),
            ProtocolVariant::TwoStep,
        );
        let mut view = RecordingView::default();

        let outcome = controller.submit("https://example.com/v1", &mut view).await;

        assert!(matches!(outcome, SubmitOutcome::Navigate { .. }));
        assert!(controller.storage().get(VIDEO_DATA_KEY).unwrap().is_some());
    }

    #[test]
    fn test_outcome_serializes_tagged() {
        let outcome = SubmitOutcome::Navigate {
            target: "result.html".to_string(),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json, json!({ "type": "navigate", "target": "result.html" }));
    }

    proptest! {
        #[test]
        fn prop_blank_urls_never_reach_the_network(url in "[ \t\n\r]*") {
            let network = FakeNetwork::replying(200, json!({}));
            let storage = MemoryStorage::new();
            let mut view = RecordingView::default();
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

            let outcome = runtime.block_on(submit(
                &url,
                ProtocolVariant::TwoStep,
                &network,
                &storage,
                &mut view,
            ));

            let rejected = matches!(outcome, SubmitOutcome::Rejected { .. });
            prop_assert!(rejected, "expected Rejected, got {:?}", outcome);
            prop_assert!(network.calls().is_empty());
        }

        #[test]
        fn prop_non_blank_urls_issue_exactly_one_request(url in "[ ]{0,3}[a-z:/.]{1,30}[ ]{0,3}") {
            prop_assume!(!url.trim().is_empty());
            let network = FakeNetwork::replying(404, json!({ "detail": "not found" }));
            let storage = MemoryStorage::new();
            let mut view = RecordingView::default();
            let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();

            runtime.block_on(submit(
                &url,
                ProtocolVariant::TwoStep,
                &network,
                &storage,
                &mut view,
            ));

            let calls = network.calls();
            prop_assert_eq!(calls.len(), 1);
            prop_assert_eq!(calls[0].1.as_str(), url.trim());
            prop_assert_eq!(view.controls.last(), Some(&ControlState::idle()));
        }
    }
}
