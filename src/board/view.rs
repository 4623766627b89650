//! Pasteboard - Paste view
//!
//! Registers the paste trigger while mounted, turns clipboard reads into
//! history entries and copies entries back on request

use crate::clipboard::{
    ClipboardEntry, ClipboardHost, MediaKind, ObjectUrlStore, PastedItem, PastedItemView,
};
use crate::config::Settings;
use crate::errors::{ClipboardError, TriggerError};
use crate::trigger::{Activations, Trigger, TriggerHub, TriggerRegistration};

use super::notify::Notifier;
use super::state::{BoardState, ErrorState};

pub const COPY_SUCCESS_MESSAGE: &str = "Copied successfully";
pub const COPY_FAILURE_MESSAGE: &str = "Could not copy :(";

struct Mounted {
    _registration: TriggerRegistration,
    activations: Activations,
}

/// The paste board view
pub struct PasteView<H: ClipboardHost, N: Notifier> {
    host: H,
    notifier: N,
    trigger: Trigger,
    preview_length: usize,
    thumbnail_size: u32,
    state: BoardState,
    object_urls: ObjectUrlStore,
    mounted: Option<Mounted>,
}

impl<H: ClipboardHost, N: Notifier> PasteView<H, N> {
    pub fn new(host: H, notifier: N, trigger: Trigger, settings: &Settings) -> Self {
        Self {
            host,
            notifier,
            trigger,
            preview_length: settings.preview_length,
            thumbnail_size: settings.thumbnail_size,
            state: BoardState::new(settings.history_limit.max_items()),
            object_urls: ObjectUrlStore::new(),
            mounted: None,
        }
    }

    /// Register the paste trigger with the hub
    ///
    /// Without clipboard capability the unavailable banner is set and no
    /// trigger is registered.
    pub fn mount(&mut self, hub: &TriggerHub) {
        if self.mounted.is_some() {
            return;
        }
        if !self.host.is_available() {
            log::warn!("Clipboard capability unavailable, paste trigger not registered");
            self.state.set_error(ErrorState::unavailable());
            return;
        }

        let (registration, activations) = hub.register(self.trigger.clone());
        self.mounted = Some(Mounted {
            _registration: registration,
            activations,
        });
        log::info!("Paste view mounted");
    }

    /// Deregister the trigger and drop the history with its object URLs
    ///
    /// A later `mount` starts from an empty board.
    pub fn unmount(&mut self) {
        if self.mounted.take().is_some() {
            log::info!("Paste view unmounted");
        }
        self.state.clear_history();
        let revoked = self.object_urls.revoke_all();
        if revoked > 0 {
            log::debug!("Revoked {} object URLs", revoked);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted.is_some()
    }

    /// Apply changed settings to the live view
    ///
    /// A mounted view swaps its trigger registration; a smaller history
    /// limit evicts immediately.
    pub fn apply_settings(&mut self, settings: &Settings, hub: &TriggerHub) -> Result<(), TriggerError> {
        let trigger = settings.trigger()?;
        self.preview_length = settings.preview_length;
        self.thumbnail_size = settings.thumbnail_size;

        for evicted in self.state.set_history_limit(settings.history_limit.max_items()) {
            if evicted.is_image() {
                self.object_urls.revoke(&evicted.value);
            }
        }

        if trigger != self.trigger {
            self.trigger = trigger;
            if self.mounted.take().is_some() {
                self.mount(hub);
                log::info!("Paste trigger re-registered: {:?}", self.trigger);
            }
        }
        Ok(())
    }

    /// Handle every activation already delivered, returns how many ran
    pub async fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let fired = match self.mounted.as_mut() {
                Some(mounted) => mounted.activations.try_recv().is_ok(),
                None => false,
            };
            if !fired {
                return handled;
            }
            self.handle_clipboard().await;
            handled += 1;
        }
    }

    /// Wait for the next activation and handle it
    ///
    /// Returns `false` when the view is not mounted.
    pub async fn next_trigger(&mut self) -> bool {
        let fired = match self.mounted.as_mut() {
            Some(mounted) => mounted.activations.recv().await.is_some(),
            None => false,
        };
        if fired {
            self.handle_clipboard().await;
        }
        fired
    }

    /// Read the clipboard and record the outcome
    pub async fn handle_clipboard(&mut self) {
        match self.read_and_classify().await {
            Ok(added) => log::info!("Added {} pasted item(s)", added),
            Err(e) => {
                log::error!("Failed to read clipboard: {}", e);
                self.state.set_error(ErrorState::failed(e.to_string()));
            }
        }
    }

    async fn read_and_classify(&mut self) -> Result<usize, ClipboardError> {
        let entries = self.host.read().await?;
        let mut added = 0;

        for entry in &entries {
            for mime in entry.types() {
                let payload = entry.get_type(mime)?;
                match MediaKind::from_mime(mime) {
                    Some(MediaKind::TextPlain) => {
                        let text = String::from_utf8_lossy(payload);
                        if !text.is_empty() {
                            self.add_paste(PastedItem::new_text(text.into_owned()));
                            added += 1;
                        }
                    }
                    Some(MediaKind::ImagePng) => {
                        let url = self.object_urls.create(MediaKind::ImagePng, payload.to_vec());
                        self.add_paste(PastedItem::new_image(url));
                        added += 1;
                    }
                    None => log::debug!("Ignoring clipboard type {}", mime),
                }
            }
        }

        Ok(added)
    }

    fn add_paste(&mut self, item: PastedItem) {
        for evicted in self.state.add_paste(item) {
            if evicted.is_image() {
                self.object_urls.revoke(&evicted.value);
            }
        }
    }

    /// Copy a history entry back to the clipboard
    ///
    /// Notifies the user either way; history is never changed.
    pub async fn copy_item(&self, index: usize) -> Result<(), ClipboardError> {
        let item = self
            .state
            .history()
            .get(index)
            .ok_or(ClipboardError::ItemNotFound(index))?;

        match self.copy_to_clipboard(item).await {
            Ok(()) => {
                self.notifier.success(COPY_SUCCESS_MESSAGE);
                Ok(())
            }
            Err(e) => {
                log::error!("Failed to copy {} item: {}", item.kind, e);
                self.notifier.error(COPY_FAILURE_MESSAGE);
                Err(e)
            }
        }
    }

    async fn copy_to_clipboard(&self, item: &PastedItem) -> Result<(), ClipboardError> {
        let payload = match item.kind {
            MediaKind::TextPlain => item.value.as_bytes().to_vec(),
            MediaKind::ImagePng => self.object_urls.fetch(&item.value)?.1.to_vec(),
        };
        let entry = ClipboardEntry::single(item.kind.as_mime(), payload);
        self.host.write(vec![entry]).await
    }

    /// Display projection of the history
    pub fn item_views(&self) -> Vec<PastedItemView> {
        self.state
            .history()
            .iter()
            .enumerate()
            .map(|(index, item)| self.item_view(index, item))
            .collect()
    }

    fn item_view(&self, index: usize, item: &PastedItem) -> PastedItemView {
        let image_data = if item.is_image() {
            self.object_urls.fetch(&item.value).ok().map(|(_, bytes)| bytes)
        } else {
            None
        };
        PastedItemView::new(
            index,
            item,
            self.preview_length,
            image_data,
            self.thumbnail_size,
        )
    }

    pub fn state(&self) -> &BoardState {
        &self.state
    }

    pub fn object_urls(&self) -> &ObjectUrlStore {
        &self.object_urls
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }
}
