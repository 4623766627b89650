//! Pasteboard - Error types

/// Clipboard operation error
///
/// `Unavailable` and `Rejected` display the bare host message so it can be
/// shown to the user unchanged.
#[derive(Debug, thiserror::Error)]
pub enum ClipboardError {
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Rejected(String),
    #[error("Clipboard item has no '{0}' representation")]
    MissingType(String),
    #[error("Unsupported media type: {0}")]
    UnsupportedType(String),
    #[error("Object URL not found: {0}")]
    UnknownObjectUrl(String),
    #[error("Item not found: {0}")]
    ItemNotFound(usize),
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Clipboard task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

/// Settings error type
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("No configuration directory available")]
    NoConfigDir,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Hotkey parsing error
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TriggerError {
    #[error("Empty shortcut")]
    Empty,
    #[error("Unknown modifier '{0}'")]
    UnknownModifier(String),
    #[error("Shortcut '{0}' has no key")]
    MissingKey(String),
}
