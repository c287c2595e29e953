//! Copy-to-clipboard control shown next to every format

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::ports::ClipboardPort;

pub const COPY_LABEL: &str = "Copy Link";
pub const COPIED_LABEL: &str = "Copied!";
pub const COPY_FAILED_ALERT: &str = "Failed to copy link.";

/// How long "Copied!" stays before the label reverts
pub const REVERT_AFTER: Duration = Duration::from_secs(2);

/// Result of pressing the control
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum CopyOutcome {
    Copied,
    /// Hosts present `alert` as a blocking alert
    Failed { alert: String },
}

/// One copy control and its label
#[derive(Debug, Clone)]
pub struct CopyLinkButton {
    label: String,
    revert_after: Duration,
}

impl Default for CopyLinkButton {
    fn default() -> Self {
        Self::new()
    }
}

impl CopyLinkButton {
    pub fn new() -> Self {
        Self::with_revert_after(REVERT_AFTER)
    }

    pub fn with_revert_after(revert_after: Duration) -> Self {
        Self {
            label: COPY_LABEL.to_string(),
            revert_after,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn revert_after(&self) -> Duration {
        self.revert_after
    }

    /// Write `url` to the clipboard
    ///
    /// On success the label becomes "Copied!" until [`settle`](Self::settle)
    /// runs. On failure the label is left alone.
    pub fn press<C: ClipboardPort + ?Sized>(&mut self, clipboard: &mut C, url: &str) -> CopyOutcome {
        match clipboard.write_text(url) {
            Ok(()) => {
                self.label = COPIED_LABEL.to_string();
                CopyOutcome::Copied
            }
            Err(e) => {
                tracing::error!("failed to copy: {}", e);
                CopyOutcome::Failed {
                    alert: COPY_FAILED_ALERT.to_string(),
                }
            }
        }
    }

    /// Wait out the revert delay and restore the idle label
    pub async fn settle(&mut self) {
        if self.label != COPY_LABEL {
            tokio::time::sleep(self.revert_after).await;
            self.label = COPY_LABEL.to_string();
        }
    }
}
