//! Pasteboard - Paste trigger module
//!
//! Parses hotkeys, models input events and dispatches them to scoped
//! registrations

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, Weak};

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::errors::TriggerError;

/// Key combination such as `ctrl+v` or `command+v`
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
    /// Lowercase key name
    pub key: String,
}

impl KeyCombo {
    pub fn new(key: &str) -> Self {
        Self {
            key: key.to_lowercase(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }
}

impl FromStr for KeyCombo {
    type Err = TriggerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(TriggerError::Empty);
        }

        let parts: Vec<String> = s.split('+').map(|p| p.trim().to_lowercase()).collect();
        let (key, modifiers) = match parts.split_last() {
            Some((key, modifiers)) if !key.is_empty() => (key, modifiers),
            _ => return Err(TriggerError::MissingKey(s.to_string())),
        };

        let mut combo = KeyCombo::new(key);
        for modifier in modifiers {
            match modifier.as_str() {
                "ctrl" | "control" => combo.ctrl = true,
                "alt" | "option" => combo.alt = true,
                "shift" => combo.shift = true,
                "command" | "cmd" | "super" | "meta" | "win" => combo.meta = true,
                other => return Err(TriggerError::UnknownModifier(other.to_string())),
            }
        }
        Ok(combo)
    }
}

impl fmt::Display for KeyCombo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.ctrl {
            f.write_str("ctrl+")?;
        }
        if self.alt {
            f.write_str("alt+")?;
        }
        if self.shift {
            f.write_str("shift+")?;
        }
        if self.meta {
            f.write_str("command+")?;
        }
        f.write_str(&self.key)
    }
}

/// Parse a comma separated hotkey list, e.g. `ctrl+v,command+v`
pub fn parse_hotkeys(s: &str) -> Result<Vec<KeyCombo>, TriggerError> {
    if s.trim().is_empty() {
        return Err(TriggerError::Empty);
    }
    s.split(',').map(KeyCombo::from_str).collect()
}

/// What activates a paste
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    /// Any of the listed key combinations
    Hotkey(Vec<KeyCombo>),
    /// The native paste event
    PasteEvent,
}

impl Trigger {
    /// ctrl+v and command+v
    pub fn default_hotkeys() -> Self {
        Trigger::Hotkey(vec![KeyCombo::new("v").ctrl(), KeyCombo::new("v").meta()])
    }

    fn matches(&self, kind: &InputKind) -> bool {
        match (self, kind) {
            (Trigger::Hotkey(combos), InputKind::KeyDown(pressed)) => combos.contains(pressed),
            (Trigger::PasteEvent, InputKind::Paste) => true,
            _ => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputKind {
    KeyDown(KeyCombo),
    Paste,
}

/// Input event delivered by the surrounding front end
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    default_prevented: bool,
}

impl InputEvent {
    pub fn key_down(combo: KeyCombo) -> Self {
        Self {
            kind: InputKind::KeyDown(combo),
            default_prevented: false,
        }
    }

    pub fn paste() -> Self {
        Self {
            kind: InputKind::Paste,
            default_prevented: false,
        }
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Signal sent to a registration when its trigger fires
pub type Activations = mpsc::UnboundedReceiver<()>;

struct Binding {
    id: u64,
    trigger: Trigger,
    tx: mpsc::UnboundedSender<()>,
}

#[derive(Default)]
struct HubInner {
    next_id: u64,
    bindings: Vec<Binding>,
}

/// Dispatches input events to registered triggers
#[derive(Clone, Default)]
pub struct TriggerHub {
    inner: Arc<Mutex<HubInner>>,
}

impl TriggerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a trigger
    ///
    /// The binding lives as long as the returned registration.
    pub fn register(&self, trigger: Trigger) -> (TriggerRegistration, Activations) {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut inner = self.inner.lock();
        let id = inner.next_id;
        inner.next_id += 1;
        log::debug!("[Trigger] Registered #{}: {:?}", id, trigger);
        inner.bindings.push(Binding { id, trigger, tx });

        let registration = TriggerRegistration {
            id,
            hub: Arc::downgrade(&self.inner),
        };
        (registration, rx)
    }

    /// Deliver an event, returns the number of registrations signalled
    pub fn dispatch(&self, event: &mut InputEvent) -> usize {
        let inner = self.inner.lock();
        let mut fired = 0;
        for binding in inner.bindings.iter().filter(|b| b.trigger.matches(&event.kind)) {
            if binding.tx.send(()).is_ok() {
                fired += 1;
            }
        }
        if fired > 0 {
            event.prevent_default();
        }
        fired
    }

    /// Remove every registration
    pub fn unbind_all(&self) {
        self.inner.lock().bindings.clear();
    }

    pub fn registration_count(&self) -> usize {
        self.inner.lock().bindings.len()
    }
}

/// Scoped trigger registration, deregistered on drop
pub struct TriggerRegistration {
    id: u64,
    hub: Weak<Mutex<HubInner>>,
}

impl Drop for TriggerRegistration {
    fn drop(&mut self) {
        if let Some(hub) = self.hub.upgrade() {
            hub.lock().bindings.retain(|b| b.id != self.id);
            log::debug!("[Trigger] Deregistered #{}", self.id);
        }
    }
}
