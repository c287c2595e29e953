//! System clipboard adapter

use arboard::Clipboard;

use crate::error::{Result, VidgrabberError};
use crate::ports::ClipboardPort;

/// Clipboard of the desktop session
///
/// A fresh handle is opened per write; some platforms drop a handle's
/// contents when it goes away, so do not rely on this in headless sessions.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClipboard;

impl ClipboardPort for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<()> {
        let mut clipboard = Clipboard::new()
            .map_err(|e| VidgrabberError::Clipboard(format!("Failed to access clipboard: {}", e)))?;

        clipboard
            .set_text(text)
            .map_err(|e| VidgrabberError::Clipboard(format!("Failed to write clipboard: {}", e)))
    }
}
