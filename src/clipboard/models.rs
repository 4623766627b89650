//! Pasteboard - Clipboard content data models
//!
//! Defines pasted items, their display projection and the raw clipboard
//! entries exchanged with the host

use std::io::Cursor;

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ClipboardError;

/// Media kinds the board recognizes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum MediaKind {
    /// Plain text
    #[serde(rename = "text/plain")]
    TextPlain,
    /// PNG image bytes
    #[serde(rename = "image/png")]
    ImagePng,
}

impl MediaKind {
    /// Convert from a MIME type, `None` for anything unrecognized
    pub fn from_mime(s: &str) -> Option<Self> {
        match s {
            "text/plain" => Some(MediaKind::TextPlain),
            "image/png" => Some(MediaKind::ImagePng),
            _ => None,
        }
    }

    /// Convert to MIME type
    pub fn as_mime(&self) -> &'static str {
        match self {
            MediaKind::TextPlain => "text/plain",
            MediaKind::ImagePng => "image/png",
        }
    }
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_mime())
    }
}

/// One history entry
///
/// `value` holds the text itself for `text/plain` and an object URL for
/// `image/png`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PastedItem {
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub value: String,
    pub pasted_at: DateTime<Utc>,
}

impl PastedItem {
    /// Create new text item
    pub fn new_text(text: String) -> Self {
        Self {
            kind: MediaKind::TextPlain,
            value: text,
            pasted_at: Utc::now(),
        }
    }

    /// Create new image item from its object URL
    pub fn new_image(object_url: String) -> Self {
        Self {
            kind: MediaKind::ImagePng,
            value: object_url,
            pasted_at: Utc::now(),
        }
    }

    pub fn is_image(&self) -> bool {
        self.kind == MediaKind::ImagePng
    }
}

/// Simplified record for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PastedItemView {
    pub index: usize,
    #[serde(rename = "type")]
    pub kind: MediaKind,
    pub preview: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    pub pasted_at: DateTime<Utc>,
}

impl PastedItemView {
    /// Build the view of a history item
    ///
    /// `image_data` is the PNG payload behind an image item's object URL.
    pub fn new(
        index: usize,
        item: &PastedItem,
        preview_length: usize,
        image_data: Option<&[u8]>,
        thumbnail_size: u32,
    ) -> Self {
        let (preview, thumbnail) = match item.kind {
            MediaKind::TextPlain => (generate_preview(&item.value, preview_length), None),
            MediaKind::ImagePng => (
                "[Image]".to_string(),
                image_data.and_then(|png| match png_thumbnail(png, thumbnail_size) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        log::warn!("No thumbnail for {}: {}", item.value, e);
                        None
                    }
                }),
            ),
        };
        Self {
            index,
            kind: item.kind,
            preview,
            thumbnail,
            pasted_at: item.pasted_at,
        }
    }
}

/// Generate preview text
pub fn generate_preview(text: &str, max_len: usize) -> String {
    let text = text.trim();
    if text.chars().count() <= max_len {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_len).collect();
        format!("{}...", truncated)
    }
}

/// PNG data URL of the image scaled to fit `size` x `size`
fn png_thumbnail(png: &[u8], size: u32) -> image::ImageResult<String> {
    let scaled = image::load_from_memory_with_format(png, image::ImageFormat::Png)?
        .thumbnail(size, size);
    let mut encoded = Vec::new();
    scaled.write_to(&mut Cursor::new(&mut encoded), image::ImageFormat::Png)?;
    Ok(format!(
        "data:image/png;base64,{}",
        base64::engine::general_purpose::STANDARD.encode(&encoded)
    ))
}

/// A clipboard item as the host exposes it
///
/// Holds every representation in host order. Media type strings are kept
/// verbatim, including ones the board does not recognize.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClipboardEntry {
    representations: Vec<(String, Vec<u8>)>,
}

impl ClipboardEntry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entry with a single representation
    pub fn single(mime: impl Into<String>, data: Vec<u8>) -> Self {
        Self::new().with(mime, data)
    }

    /// Add a representation, replacing an existing one of the same type
    pub fn with(mut self, mime: impl Into<String>, data: Vec<u8>) -> Self {
        let mime = mime.into();
        match self.representations.iter_mut().find(|(m, _)| *m == mime) {
            Some((_, existing)) => *existing = data,
            None => self.representations.push((mime, data)),
        }
        self
    }

    /// Media types in host order
    pub fn types(&self) -> impl Iterator<Item = &str> {
        self.representations.iter().map(|(m, _)| m.as_str())
    }

    /// Payload for a media type
    pub fn get_type(&self, mime: &str) -> Result<&[u8], ClipboardError> {
        self.representations
            .iter()
            .find(|(m, _)| m == mime)
            .map(|(_, data)| data.as_slice())
            .ok_or_else(|| ClipboardError::MissingType(mime.to_string()))
    }

    pub fn is_empty(&self) -> bool {
        self.representations.is_empty()
    }
}
