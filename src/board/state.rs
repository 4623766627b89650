//! Pasteboard - Board state
//!
//! The paste history and error banner owned by the view

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::clipboard::PastedItem;

/// Message shown when the host has no clipboard capability
pub const UNAVAILABLE_MESSAGE: &str = "Clipboard API not available";
/// Help link shown with [`UNAVAILABLE_MESSAGE`]
pub const UNAVAILABLE_LINK: &str = "https://caniuse.com/clipboard";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    CapabilityUnavailable,
    OperationFailed,
}

/// Error banner
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorState {
    pub kind: ErrorKind,
    pub message: String,
    pub link: Option<String>,
}

impl ErrorState {
    pub fn unavailable() -> Self {
        Self {
            kind: ErrorKind::CapabilityUnavailable,
            message: UNAVAILABLE_MESSAGE.to_string(),
            link: Some(UNAVAILABLE_LINK.to_string()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            kind: ErrorKind::OperationFailed,
            message: message.into(),
            link: None,
        }
    }
}

/// Pasted items, newest first
#[derive(Debug, Clone, Default)]
pub struct PasteHistory {
    items: VecDeque<PastedItem>,
    limit: Option<usize>,
}

impl PasteHistory {
    pub fn new(limit: Option<usize>) -> Self {
        Self {
            items: VecDeque::new(),
            limit,
        }
    }

    /// Prepend an item, returns the items evicted by the limit
    pub fn push_front(&mut self, item: PastedItem) -> Vec<PastedItem> {
        self.items.push_front(item);
        match self.limit {
            Some(limit) if self.items.len() > limit => self.items.split_off(limit).into(),
            _ => Vec::new(),
        }
    }

    /// Change the limit, returns the items it evicts
    pub fn set_limit(&mut self, limit: Option<usize>) -> Vec<PastedItem> {
        self.limit = limit;
        match limit {
            Some(limit) if self.items.len() > limit => self.items.split_off(limit).into(),
            _ => Vec::new(),
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn get(&self, index: usize) -> Option<&PastedItem> {
        self.items.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PastedItem> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// State owned by the view; mutated only through these methods
#[derive(Debug, Clone, Default)]
pub struct BoardState {
    history: PasteHistory,
    error: Option<ErrorState>,
}

impl BoardState {
    pub fn new(history_limit: Option<usize>) -> Self {
        Self {
            history: PasteHistory::new(history_limit),
            error: None,
        }
    }

    /// Add a pasted item, returns evicted items
    pub fn add_paste(&mut self, item: PastedItem) -> Vec<PastedItem> {
        self.history.push_front(item)
    }

    pub fn set_history_limit(&mut self, limit: Option<usize>) -> Vec<PastedItem> {
        self.history.set_limit(limit)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Replace the current error
    pub fn set_error(&mut self, error: ErrorState) {
        self.error = Some(error);
    }

    pub fn history(&self) -> &PasteHistory {
        &self.history
    }

    pub fn error(&self) -> Option<&ErrorState> {
        self.error.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn history_is_newest_first() {
        let mut state = BoardState::new(None);
        state.add_paste(PastedItem::new_text("one".into()));
        state.add_paste(PastedItem::new_text("two".into()));
        let values: Vec<&str> = state.history().iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["two", "one"]);
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = PasteHistory::new(Some(2));
        assert!(history.push_front(PastedItem::new_text("a".into())).is_empty());
        assert!(history.push_front(PastedItem::new_text("b".into())).is_empty());
        let evicted = history.push_front(PastedItem::new_text("c".into()));
        assert_eq!(evicted.len(), 1);
        assert_eq!(evicted[0].value, "a");
        assert_eq!(history.len(), 2);
        assert_eq!(history.get(0).unwrap().value, "c");
    }

    #[test]
    fn lowering_limit_evicts_oldest() {
        let mut history = PasteHistory::new(None);
        for value in ["a", "b", "c"] {
            history.push_front(PastedItem::new_text(value.into()));
        }
        let evicted = history.set_limit(Some(1));
        let values: Vec<&str> = evicted.iter().map(|i| i.value.as_str()).collect();
        assert_eq!(values, vec!["b", "a"]);
        assert_eq!(history.get(0).unwrap().value, "c");
        assert!(history.set_limit(None).is_empty());
    }

    #[test]
    fn error_is_overwritten() {
        let mut state = BoardState::default();
        assert!(state.error().is_none());
        state.set_error(ErrorState::unavailable());
        state.set_error(ErrorState::failed("Permission denied"));
        assert_eq!(state.error(), Some(&ErrorState::failed("Permission denied")));
    }
}
