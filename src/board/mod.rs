//! Pasteboard - Board module
//!
//! The paste view, its state and the notification surface

pub mod notify;
pub mod state;
pub mod view;

pub use notify::{LogNotifier, Notifier};
pub use state::{BoardState, ErrorKind, ErrorState, PasteHistory};
pub use view::PasteView;
