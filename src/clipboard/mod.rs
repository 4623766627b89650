//! Pasteboard - Clipboard module
//!
//! Provides the host clipboard port, the system adapter and content models

pub mod host;
pub mod models;
pub mod object_url;
pub mod system;

pub use host::ClipboardHost;
pub use models::{ClipboardEntry, MediaKind, PastedItem, PastedItemView};
pub use object_url::ObjectUrlStore;
pub use system::ArboardClipboard;
