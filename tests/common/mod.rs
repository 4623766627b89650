//! Scripted clipboard host and recording notifier shared by the tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::io::Cursor;

use async_trait::async_trait;
use parking_lot::Mutex;

use pasteboard_lib::board::{Notifier, PasteView};
use pasteboard_lib::clipboard::{ClipboardEntry, ClipboardHost};
use pasteboard_lib::config::Settings;
use pasteboard_lib::errors::ClipboardError;
use pasteboard_lib::trigger::Trigger;

pub struct FakeClipboard {
    available: bool,
    reads: Mutex<VecDeque<Result<Vec<ClipboardEntry>, String>>>,
    writes: Mutex<Vec<Vec<ClipboardEntry>>>,
    write_failure: Mutex<Option<String>>,
}

impl FakeClipboard {
    pub fn new() -> Self {
        Self {
            available: true,
            reads: Mutex::new(VecDeque::new()),
            writes: Mutex::new(Vec::new()),
            write_failure: Mutex::new(None),
        }
    }

    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Queue the result of the next read
    pub fn push_read(&self, entries: Vec<ClipboardEntry>) {
        self.reads.lock().push_back(Ok(entries));
    }

    pub fn push_read_failure(&self, message: &str) {
        self.reads.lock().push_back(Err(message.to_string()));
    }

    pub fn fail_writes(&self, message: &str) {
        *self.write_failure.lock() = Some(message.to_string());
    }

    pub fn writes(&self) -> Vec<Vec<ClipboardEntry>> {
        self.writes.lock().clone()
    }
}

#[async_trait]
impl ClipboardHost for FakeClipboard {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn read(&self) -> Result<Vec<ClipboardEntry>, ClipboardError> {
        match self.reads.lock().pop_front() {
            Some(Ok(entries)) => Ok(entries),
            Some(Err(message)) => Err(ClipboardError::Rejected(message)),
            None => Ok(Vec::new()),
        }
    }

    async fn write(&self, entries: Vec<ClipboardEntry>) -> Result<(), ClipboardError> {
        if let Some(message) = self.write_failure.lock().clone() {
            return Err(ClipboardError::Rejected(message));
        }
        self.writes.lock().push(entries);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub successes: Mutex<Vec<String>>,
    pub errors: Mutex<Vec<String>>,
}

impl Notifier for RecordingNotifier {
    fn success(&self, message: &str) {
        self.successes.lock().push(message.to_string());
    }

    fn error(&self, message: &str) {
        self.errors.lock().push(message.to_string());
    }
}

pub type TestView = PasteView<FakeClipboard, RecordingNotifier>;

pub fn view_with(host: FakeClipboard, trigger: Trigger, settings: &Settings) -> TestView {
    PasteView::new(host, RecordingNotifier::default(), trigger, settings)
}

pub fn hotkey_view(host: FakeClipboard) -> TestView {
    view_with(host, Trigger::default_hotkeys(), &Settings::default())
}

pub fn text(value: &str) -> ClipboardEntry {
    ClipboardEntry::single("text/plain", value.as_bytes().to_vec())
}

pub fn png_entry(data: Vec<u8>) -> ClipboardEntry {
    ClipboardEntry::single("image/png", data)
}

pub fn tiny_png() -> Vec<u8> {
    let img = image::RgbaImage::from_pixel(3, 2, image::Rgba([0, 128, 255, 255]));
    let mut data = Vec::new();
    img.write_to(&mut Cursor::new(&mut data), image::ImageFormat::Png)
        .unwrap();
    data
}
