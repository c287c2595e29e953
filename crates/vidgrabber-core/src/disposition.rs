//! Suggested filename extraction from `Content-Disposition`

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

/// Shown in place of the filename when the header gives none
pub const PLACEHOLDER_FILENAME: &str = "your video";

static FILENAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"filename[^;=\n]*=("[^"]*"|'[^']*'|[^;\n]*)"#)
        .expect("filename pattern is valid")
});

/// Extracts the suggested filename from an attachment disposition
///
/// Only headers mentioning `attachment` are considered. Every quote
/// character is removed from the matched value.
///
/// # Example
/// ```
/// use vidgrabber_core::disposition::attachment_filename;
/// let name = attachment_filename(r#"attachment; filename="clip.mp4""#);
/// assert_eq!(name.as_deref(), Some("clip.mp4"));
/// ```
pub fn attachment_filename(header_value: &str) -> Option<String> {
    if !header_value.contains("attachment") {
        return None;
    }

    let captures = FILENAME_RE.captures(header_value)?;
    let value = captures.get(1)?.as_str().replace(['"', '\''], "");
    let value = value.trim();

    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Name to show in the success message
pub fn display_filename(header_value: Option<&str>) -> String {
    header_value
        .and_then(attachment_filename)
        .unwrap_or_else(|| PLACEHOLDER_FILENAME.to_string())
}

/// Name safe to create inside the download directory
///
/// Strips any directory components the server may have sent.
pub fn local_filename(header_value: Option<&str>, fallback: &str) -> String {
    header_value
        .and_then(attachment_filename)
        .and_then(|name| {
            Path::new(&name)
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
        })
        .filter(|name| name != "." && name != "..")
        .unwrap_or_else(|| fallback.to_string())
}
