//! Pasteboard - Command handlers
//!
//! Defines the commands a front end can run against the paste view

use serde::{Deserialize, Serialize};

use crate::board::{ErrorState, Notifier, PasteView};
use crate::clipboard::{ClipboardHost, PastedItem, PastedItemView};
use crate::config::{self, HistoryLimit, Settings, TriggerMode};
use crate::trigger::parse_hotkeys;

/// Command execution result
#[derive(Debug, Serialize)]
pub struct CommandResult<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Get paste history list, newest first
pub fn get_paste_history<H: ClipboardHost, N: Notifier>(
    view: &PasteView<H, N>,
    limit: Option<usize>,
) -> CommandResult<Vec<PastedItemView>> {
    let mut views = view.item_views();
    if let Some(n) = limit {
        views.truncate(n);
    }
    CommandResult::ok(views)
}

/// Get complete content of a single history item
pub fn get_paste_item<H: ClipboardHost, N: Notifier>(
    view: &PasteView<H, N>,
    index: usize,
) -> CommandResult<PastedItem> {
    match view.state().history().get(index) {
        Some(item) => CommandResult::ok(item.clone()),
        None => CommandResult::err(format!("Item not found: {}", index)),
    }
}

/// Get total item count
pub fn get_history_count<H: ClipboardHost, N: Notifier>(view: &PasteView<H, N>) -> CommandResult<usize> {
    CommandResult::ok(view.state().history().len())
}

/// Get the current error banner, if any
pub fn get_error_state<H: ClipboardHost, N: Notifier>(
    view: &PasteView<H, N>,
) -> CommandResult<Option<ErrorState>> {
    CommandResult::ok(view.state().error().cloned())
}

/// Copy a history item back to the system clipboard
pub async fn copy_item<H: ClipboardHost, N: Notifier>(
    view: &PasteView<H, N>,
    index: usize,
) -> CommandResult<bool> {
    match view.copy_item(index).await {
        Ok(()) => CommandResult::ok(true),
        Err(e) => CommandResult::err(format!("Failed to copy item: {}", e)),
    }
}

/// Get current settings
pub fn get_settings() -> CommandResult<Settings> {
    CommandResult::ok(config::get_settings())
}

/// Settings update request
#[derive(Debug, Default, Deserialize)]
pub struct SettingsUpdate {
    pub trigger_mode: Option<TriggerMode>,
    pub shortcut: Option<String>,
    pub history_limit: Option<i32>,
    pub preview_length: Option<usize>,
    pub thumbnail_size: Option<u32>,
}

impl SettingsUpdate {
    /// Single-field update from a `key value` pair
    pub fn from_pair(key: &str, value: &str) -> Result<Self, String> {
        let mut update = SettingsUpdate::default();
        let number = |what: &str| format!("'{}' is not a valid {}", value, what);
        match key {
            "trigger_mode" => {
                let mode = serde_json::from_value(serde_json::Value::String(value.to_string()))
                    .map_err(|_| format!("Unknown trigger mode: {}", value))?;
                update.trigger_mode = Some(mode);
            }
            "shortcut" => update.shortcut = Some(value.to_string()),
            "history_limit" => {
                update.history_limit = Some(value.parse().map_err(|_| number("history limit"))?)
            }
            "preview_length" => {
                update.preview_length = Some(value.parse().map_err(|_| number("preview length"))?)
            }
            "thumbnail_size" => {
                update.thumbnail_size = Some(value.parse().map_err(|_| number("thumbnail size"))?)
            }
            other => return Err(format!("Unknown setting: {}", other)),
        }
        Ok(update)
    }

    /// Apply to settings, rejecting an invalid shortcut
    pub fn apply(self, settings: &mut Settings) -> Result<(), String> {
        if let Some(mode) = self.trigger_mode {
            settings.trigger_mode = mode;
        }
        if let Some(shortcut) = self.shortcut {
            if let Err(e) = parse_hotkeys(&shortcut) {
                log::error!("Invalid shortcut format '{}': {}", shortcut, e);
                return Err(format!("Invalid shortcut format: {}", shortcut));
            }
            settings.shortcut = shortcut;
        }
        if let Some(limit) = self.history_limit {
            settings.history_limit = HistoryLimit::from_i32(limit);
        }
        if let Some(length) = self.preview_length {
            settings.preview_length = length;
        }
        if let Some(size) = self.thumbnail_size {
            settings.thumbnail_size = size;
        }
        Ok(())
    }
}

/// Update and persist settings
///
/// The caller applies the returned settings to its live view.
pub fn update_settings(updates: SettingsUpdate) -> CommandResult<Settings> {
    let mut settings = config::get_settings();
    if let Err(e) = updates.apply(&mut settings) {
        return CommandResult::err(e);
    }

    match config::update_settings(settings.clone()) {
        Ok(()) => CommandResult::ok(settings),
        Err(e) => CommandResult::err(format!("Failed to save settings: {}", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn update_applies_fields() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            trigger_mode: Some(TriggerMode::PasteEvent),
            history_limit: Some(200),
            ..SettingsUpdate::default()
        };
        update.apply(&mut settings).unwrap();
        assert_eq!(settings.trigger_mode, TriggerMode::PasteEvent);
        assert_eq!(settings.history_limit, HistoryLimit::Limit200);
        assert_eq!(settings.shortcut, "ctrl+v,command+v");
    }

    #[test]
    fn update_rejects_bad_shortcut() {
        let mut settings = Settings::default();
        let update = SettingsUpdate {
            shortcut: Some("hyper+v".into()),
            ..SettingsUpdate::default()
        };
        assert!(update.apply(&mut settings).is_err());
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn update_from_key_value_pair() {
        let update = SettingsUpdate::from_pair("trigger_mode", "paste_event").unwrap();
        assert_eq!(update.trigger_mode, Some(TriggerMode::PasteEvent));
        let update = SettingsUpdate::from_pair("history_limit", "500").unwrap();
        assert_eq!(update.history_limit, Some(500));
        assert!(SettingsUpdate::from_pair("history_limit", "lots").is_err());
        assert!(SettingsUpdate::from_pair("trigger_mode", "telepathy").is_err());
        assert!(SettingsUpdate::from_pair("theme", "dark").is_err());
    }

    #[test]
    fn command_result_serializes() {
        let value = serde_json::to_value(CommandResult::<u8>::err("boom".into())).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["error"], "boom");
        assert!(value["data"].is_null());
    }
}
