//! Pasteboard - Host clipboard port
//!
//! Abstracts the clipboard capability of the environment the board runs in

use async_trait::async_trait;

use super::models::ClipboardEntry;
use crate::errors::ClipboardError;

/// Host clipboard capability
///
/// Both operations suspend until the host resolves them. Failures such as a
/// denied permission surface as [`ClipboardError::Rejected`].
#[async_trait]
pub trait ClipboardHost: Send + Sync {
    /// Whether the host offers clipboard read access at all
    fn is_available(&self) -> bool;

    /// Read the current clipboard contents
    async fn read(&self) -> Result<Vec<ClipboardEntry>, ClipboardError>;

    /// Replace the clipboard contents
    async fn write(&self, entries: Vec<ClipboardEntry>) -> Result<(), ClipboardError>;
}
