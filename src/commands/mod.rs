//! Pasteboard - Commands module

pub mod handlers;

pub use handlers::*;
