//! Pasteboard - System clipboard adapter
//!
//! Implements [`ClipboardHost`] on the platform clipboard through arboard.
//! Platform calls block, so they run on tokio's blocking pool.

use std::borrow::Cow;
use std::io::Cursor;

use arboard::Clipboard;
use async_trait::async_trait;
use image::{ImageBuffer, Rgba};

use super::host::ClipboardHost;
use super::models::{ClipboardEntry, MediaKind};
use crate::errors::ClipboardError;

/// System clipboard
#[derive(Debug, Default, Clone, Copy)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }

    fn open() -> Result<Clipboard, ClipboardError> {
        Clipboard::new().map_err(map_arboard_error)
    }

    /// Read clipboard content into a single entry
    fn read_entry(clipboard: &mut Clipboard) -> Result<ClipboardEntry, ClipboardError> {
        let mut entry = ClipboardEntry::new();

        match clipboard.get_text() {
            Ok(text) => {
                log::debug!("[Clipboard] Detected text: {} bytes", text.len());
                entry = entry.with(MediaKind::TextPlain.as_mime(), text.into_bytes());
            }
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => return Err(map_arboard_error(e)),
        }

        match clipboard.get_image() {
            Ok(image) => {
                log::debug!("[Clipboard] Detected image: {}x{}", image.width, image.height);
                let png = rgba_to_png(&image)?;
                entry = entry.with(MediaKind::ImagePng.as_mime(), png);
            }
            Err(arboard::Error::ContentNotAvailable) => {}
            Err(e) => return Err(map_arboard_error(e)),
        }

        Ok(entry)
    }

    fn write_entry(clipboard: &mut Clipboard, entry: &ClipboardEntry) -> Result<(), ClipboardError> {
        for mime in entry.types() {
            let payload = entry.get_type(mime)?;
            match MediaKind::from_mime(mime) {
                Some(MediaKind::TextPlain) => {
                    let text = String::from_utf8_lossy(payload);
                    clipboard.set_text(text).map_err(map_arboard_error)?;
                }
                Some(MediaKind::ImagePng) => {
                    let img =
                        image::load_from_memory_with_format(payload, image::ImageFormat::Png)?
                            .into_rgba8();
                    let (width, height) = img.dimensions();
                    let image_data = arboard::ImageData {
                        width: width as usize,
                        height: height as usize,
                        bytes: Cow::Owned(img.into_raw()),
                    };
                    clipboard.set_image(image_data).map_err(map_arboard_error)?;
                }
                None => return Err(ClipboardError::UnsupportedType(mime.to_string())),
            }
        }
        Ok(())
    }
}

#[async_trait]
impl ClipboardHost for ArboardClipboard {
    fn is_available(&self) -> bool {
        match Clipboard::new() {
            Ok(_) => true,
            Err(e) => {
                log::warn!("[Clipboard] System clipboard unavailable: {}", e);
                false
            }
        }
    }

    async fn read(&self) -> Result<Vec<ClipboardEntry>, ClipboardError> {
        tokio::task::spawn_blocking(|| -> Result<Vec<ClipboardEntry>, ClipboardError> {
            let mut clipboard = Self::open()?;
            let entry = Self::read_entry(&mut clipboard)?;
            if entry.is_empty() {
                Ok(Vec::new())
            } else {
                Ok(vec![entry])
            }
        })
        .await?
    }

    async fn write(&self, entries: Vec<ClipboardEntry>) -> Result<(), ClipboardError> {
        tokio::task::spawn_blocking(move || -> Result<(), ClipboardError> {
            let mut clipboard = Self::open()?;
            for entry in &entries {
                Self::write_entry(&mut clipboard, entry)?;
            }
            Ok(())
        })
        .await?
    }
}

fn map_arboard_error(e: arboard::Error) -> ClipboardError {
    let message = e.to_string();
    match e {
        arboard::Error::ClipboardNotSupported => ClipboardError::Unavailable(message),
        _ => ClipboardError::Rejected(message),
    }
}

/// Convert RGBA image data to PNG
fn rgba_to_png(image: &arboard::ImageData) -> Result<Vec<u8>, ClipboardError> {
    let img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::from_raw(
        image.width as u32,
        image.height as u32,
        image.bytes.to_vec(),
    )
    .ok_or_else(|| ClipboardError::Rejected("Clipboard image has an invalid size".to_string()))?;

    let mut png_data = Vec::new();
    img.write_to(&mut Cursor::new(&mut png_data), image::ImageFormat::Png)?;
    log::debug!("[Clipboard] Converted to PNG: {} bytes", png_data.len());
    Ok(png_data)
}
