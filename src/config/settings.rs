//! Pasteboard - User settings module
//!
//! Manages application user configuration, persisted as JSON

use std::fs;
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::errors::{SettingsError, TriggerError};
use crate::trigger::{parse_hotkeys, Trigger};

/// Environment variable overriding the settings file location
pub const CONFIG_ENV: &str = "PASTEBOARD_CONFIG";

/// Global settings instance
static SETTINGS: Lazy<RwLock<Settings>> = Lazy::new(|| RwLock::new(Settings::default()));

/// How a paste is triggered
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TriggerMode {
    /// Global key combination
    #[default]
    Hotkey,
    /// Native paste event
    PasteEvent,
}

/// History limit options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HistoryLimit {
    /// 100 records
    Limit100,
    /// 200 records
    Limit200,
    /// 500 records
    Limit500,
    /// Unlimited
    #[default]
    Unlimited,
}

// Custom serialization: serialize as numeric value
impl Serialize for HistoryLimit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_i32(self.as_i32())
    }
}

// Custom deserialization: deserialize from numeric value
impl<'de> Deserialize<'de> for HistoryLimit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let value = i32::deserialize(deserializer)?;
        Ok(HistoryLimit::from_i32(value))
    }
}

impl HistoryLimit {
    /// Get numeric value (-1 means unlimited)
    pub fn as_i32(&self) -> i32 {
        match self {
            HistoryLimit::Limit100 => 100,
            HistoryLimit::Limit200 => 200,
            HistoryLimit::Limit500 => 500,
            HistoryLimit::Unlimited => -1,
        }
    }

    /// Create from numeric value
    pub fn from_i32(value: i32) -> Self {
        match value {
            100 => HistoryLimit::Limit100,
            200 => HistoryLimit::Limit200,
            500 => HistoryLimit::Limit500,
            _ => HistoryLimit::Unlimited,
        }
    }

    /// Maximum number of items, `None` when unlimited
    pub fn max_items(&self) -> Option<usize> {
        match self {
            HistoryLimit::Unlimited => None,
            limit => Some(limit.as_i32() as usize),
        }
    }
}

/// User settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Paste trigger
    pub trigger_mode: TriggerMode,
    /// Hotkeys used in hotkey mode
    pub shortcut: String,
    /// History limit
    pub history_limit: HistoryLimit,
    /// Preview text length
    pub preview_length: usize,
    /// Thumbnail edge length in pixels
    pub thumbnail_size: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trigger_mode: TriggerMode::Hotkey,
            shortcut: "ctrl+v,command+v".to_string(),
            history_limit: HistoryLimit::Unlimited,
            preview_length: 100,
            thumbnail_size: 64,
        }
    }
}

impl Settings {
    /// Load settings from a file, defaults when the file does not exist
    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        if !path.exists() {
            log::debug!("Settings file {:?} not found, using defaults", path);
            return Ok(Settings::default());
        }
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Save settings to a file
    pub fn save_to(&self, path: &Path) -> Result<(), SettingsError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Load settings from the default location
    pub fn load() -> Result<Self, SettingsError> {
        Self::load_from(&settings_path()?)
    }

    /// Save settings to the default location
    pub fn save(&self) -> Result<(), SettingsError> {
        self.save_to(&settings_path()?)
    }

    /// The paste trigger these settings describe
    pub fn trigger(&self) -> Result<Trigger, TriggerError> {
        match self.trigger_mode {
            TriggerMode::Hotkey => Ok(Trigger::Hotkey(parse_hotkeys(&self.shortcut)?)),
            TriggerMode::PasteEvent => Ok(Trigger::PasteEvent),
        }
    }
}

/// Settings file location
pub fn settings_path() -> Result<PathBuf, SettingsError> {
    if let Some(path) = std::env::var_os(CONFIG_ENV) {
        return Ok(PathBuf::from(path));
    }
    dirs::config_dir()
        .map(|dir| dir.join("pasteboard").join("settings.json"))
        .ok_or(SettingsError::NoConfigDir)
}

/// Get current settings
pub fn get_settings() -> Settings {
    SETTINGS.read().clone()
}

/// Update settings
pub fn update_settings(settings: Settings) -> Result<(), SettingsError> {
    settings.save()?;
    *SETTINGS.write() = settings;
    Ok(())
}

/// Initialize settings (load from file)
pub fn init_settings() {
    let settings = match Settings::load() {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings, using defaults: {}", e);
            Settings::default()
        }
    };
    *SETTINGS.write() = settings;
    log::info!("Settings initialized");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_hotkey_mode() {
        let settings = Settings::default();
        assert_eq!(settings.history_limit.max_items(), None);
        assert_eq!(
            settings.trigger().unwrap(),
            Trigger::Hotkey(parse_hotkeys("ctrl+v,command+v").unwrap())
        );
    }

    #[test]
    fn history_limit_serializes_as_number() {
        assert_eq!(serde_json::to_string(&HistoryLimit::Limit200).unwrap(), "200");
        let limit: HistoryLimit = serde_json::from_str("-1").unwrap();
        assert_eq!(limit, HistoryLimit::Unlimited);
        assert_eq!(HistoryLimit::from_i32(7), HistoryLimit::Unlimited);
        assert_eq!(HistoryLimit::Limit500.max_items(), Some(500));
    }

    #[test]
    fn partial_file_fills_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{"trigger_mode":"paste_event","history_limit":100}"#).unwrap();
        assert_eq!(settings.trigger_mode, TriggerMode::PasteEvent);
        assert_eq!(settings.history_limit, HistoryLimit::Limit100);
        assert_eq!(settings.preview_length, 100);
        assert_eq!(settings.trigger().unwrap(), Trigger::PasteEvent);
    }

    #[test]
    fn save_then_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("settings.json");
        assert_eq!(Settings::load_from(&path).unwrap(), Settings::default());

        let settings = Settings {
            shortcut: "ctrl+shift+v".into(),
            history_limit: HistoryLimit::Limit100,
            ..Settings::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
    }

    #[test]
    fn invalid_shortcut_is_reported() {
        let settings = Settings {
            shortcut: "".into(),
            ..Settings::default()
        };
        assert_eq!(settings.trigger(), Err(TriggerError::Empty));
    }
}
