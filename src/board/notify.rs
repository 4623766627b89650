//! Pasteboard - Notification surface

/// Transient user notifications, fire and forget
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Notifier writing to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn success(&self, message: &str) {
        log::info!("[Notify] {}", message);
    }

    fn error(&self, message: &str) {
        log::warn!("[Notify] {}", message);
    }
}
