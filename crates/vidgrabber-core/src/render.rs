//! Results view rendering
//!
//! Turns the cached `VideoInfoResponse` into a view model. Rendering is a
//! pure function of the payload; only [`ResultsRenderer::render_cached`]
//! touches storage.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ports::StoragePort;
use crate::storage::VIDEO_DATA_KEY;
use crate::types::{VideoFormat, VideoInfoResponse, non_empty, non_zero};

pub const NO_DATA_NOTICE: &str = "No video data found.";
pub const UNREADABLE_NOTICE: &str = "Error displaying video data.";
pub const UNTITLED: &str = "Untitled Video";
pub const NO_FORMATS_NOTICE: &str =
    "No suitable downloadable formats found for this video, or there was an issue fetching them.";
pub const THUMBNAIL_ALT: &str = "Video Thumbnail";

/// What the results view shows
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum ResultsView {
    /// Nothing cached
    NoData,
    /// Cached payload could not be read or parsed
    Unreadable,
    /// Payload carries an `error` field
    Error { message: String },
    /// Normal rendering
    Video(VideoView),
}

impl ResultsView {
    /// The fixed notice for the non-video states
    pub fn notice(&self) -> Option<String> {
        match self {
            ResultsView::NoData => Some(NO_DATA_NOTICE.to_string()),
            ResultsView::Unreadable => Some(UNREADABLE_NOTICE.to_string()),
            ResultsView::Error { message } => Some(format!("Error: {}", message)),
            ResultsView::Video(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoView {
    pub title: String,
    pub thumbnail: Option<String>,
    /// `Uploader: <name>`
    pub uploader_line: Option<String>,
    /// `Duration: <duration>`
    pub duration_line: Option<String>,
    pub formats: FormatList,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "camelCase")]
pub enum FormatList {
    Items(Vec<FormatItem>),
    /// Single fixed list item
    Empty,
}

/// One rendered format entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormatItem {
    pub label: String,
    /// Target of both the download link and the copy control
    pub url: String,
}

/// Reads the cached payload and renders it
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultsRenderer;

impl ResultsRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Read `videoData` once from `storage` and render it
    ///
    /// Never fails: every problem maps to a notice state.
    pub fn render_cached<S: StoragePort + ?Sized>(&self, storage: &S) -> ResultsView {
        match storage.get(VIDEO_DATA_KEY) {
            Ok(Some(payload)) => self.render_payload(&payload),
            Ok(None) => ResultsView::NoData,
            Err(e) => {
                tracing::error!("error reading video data from storage: {}", e);
                ResultsView::Unreadable
            }
        }
    }

    /// Render a serialized payload
    pub fn render_payload(&self, payload: &str) -> ResultsView {
        match serde_json::from_str::<VideoInfoResponse>(payload) {
            Ok(info) => self.render(&info),
            Err(e) => {
                tracing::error!("error parsing cached video data: {}", e);
                ResultsView::Unreadable
            }
        }
    }

    /// Render a parsed payload
    pub fn render(&self, info: &VideoInfoResponse) -> ResultsView {
        if let Some(error) = info.application_error() {
            return ResultsView::Error { message: error };
        }

        let formats = match info.formats.as_deref() {
            Some(formats) if !formats.is_empty() => {
                FormatList::Items(formats.iter().map(format_item).collect())
            }
            _ => FormatList::Empty,
        };

        ResultsView::Video(VideoView {
            title: non_empty(info.title.as_deref())
                .unwrap_or(UNTITLED)
                .to_string(),
            thumbnail: non_empty(info.thumbnail.as_deref()).map(str::to_string),
            uploader_line: non_empty(info.uploader.as_deref()).map(|u| format!("Uploader: {}", u)),
            duration_line: non_empty(info.duration_string.as_deref())
                .map(|d| format!("Duration: {}", d)),
            formats,
        })
    }
}

fn format_item(format: &VideoFormat) -> FormatItem {
    FormatItem {
        label: format_label(format),
        url: format.url.clone(),
    }
}

/// Label for one format entry
///
/// `<name> (<ext>)`, then an approximate size or bitrate, then the audio
/// annotation.
///
/// # Example
/// ```
/// use vidgrabber_core::VideoFormat;
/// use vidgrabber_core::render::format_label;
/// let format = VideoFormat {
///     format_id: "18".to_string(),
///     ext: "mp4".to_string(),
///     acodec: Some("aac".to_string()),
///     ..Default::default()
/// };
/// assert_eq!(format_label(&format), "18 (mp4) (Audio: aac)");
/// ```
pub fn format_label(format: &VideoFormat) -> String {
    let mut label = format!("{} ({})", format_name(format), format.ext);

    if let Some(bytes) = non_zero(format.filesize_approx) {
        label.push_str(&format!(" - {} MB", two_decimals(bytes / 1024.0 / 1024.0)));
    } else if let Some(tbr) = non_zero(format.tbr) {
        label.push_str(&format!(" ~{} kbps", two_decimals(tbr)));
    }

    match non_empty(format.acodec.as_deref()) {
        None | Some("none") => label.push_str(" (Video Only, No Audio)"),
        Some(acodec) => label.push_str(&format!(" (Audio: {})", acodec)),
    }

    label
}

/// Two decimal places, exact halves rounded away from zero
///
/// `{:.2}` already rounds the exact binary value; only true ties (multiples
/// of 1/8 landing on a half hundredth) need to go up instead of to even.
fn two_decimals(value: f64) -> String {
    let hundredths = value * 100.0;
    if (value * 8.0).fract() == 0.0 && hundredths.fract().abs() == 0.5 {
        return format!("{:.2}", hundredths.round() / 100.0);
    }
    format!("{:.2}", value)
}

/// First usable of note, resolution, `WxH`, id
fn format_name(format: &VideoFormat) -> String {
    if let Some(note) = non_empty(format.format_note.as_deref()) {
        return note.to_string();
    }
    if let Some(resolution) = non_empty(format.resolution.as_deref()) {
        return resolution.to_string();
    }
    if let (Some(width), Some(height)) = (non_zero(format.width), non_zero(format.height)) {
        return format!("{}x{}", width, height);
    }
    format.format_id.clone()
}

impl fmt::Display for ResultsView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResultsView::Video(video) => fmt::Display::fmt(video, f),
            other => {
                let notice = other.notice().unwrap_or_default();
                writeln!(f, "{}", notice)
            }
        }
    }
}

impl fmt::Display for VideoView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        if let Some(thumbnail) = &self.thumbnail {
            writeln!(f, "[{}] {}", THUMBNAIL_ALT, thumbnail)?;
        }
        if let Some(line) = &self.uploader_line {
            writeln!(f, "{}", line)?;
        }
        if let Some(line) = &self.duration_line {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)?;
        match &self.formats {
            FormatList::Items(items) => {
                for (i, item) in items.iter().enumerate() {
                    writeln!(f, "{:>3}. {}", i + 1, item.label)?;
                    if !item.url.is_empty() {
                        writeln!(f, "     {}", item.url)?;
                    }
                }
            }
            FormatList::Empty => writeln!(f, "  - {}", NO_FORMATS_NOTICE)?,
        }
        Ok(())
    }
}
