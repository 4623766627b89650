//! Pasteboard - Object URL store
//!
//! Keeps pasted image bytes in memory behind `blob:` URLs until revoked

use std::collections::HashMap;

use super::models::MediaKind;
use crate::errors::ClipboardError;

const URL_PREFIX: &str = "blob:pasteboard/";

#[derive(Debug)]
struct Blob {
    kind: MediaKind,
    bytes: Vec<u8>,
}

/// In-memory object URL registry
#[derive(Debug, Default)]
pub struct ObjectUrlStore {
    blobs: HashMap<String, Blob>,
}

impl ObjectUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store bytes and return the URL addressing them
    pub fn create(&mut self, kind: MediaKind, bytes: Vec<u8>) -> String {
        let url = format!("{}{}", URL_PREFIX, uuid::Uuid::new_v4());
        log::debug!("[ObjectUrl] Created {} ({}, {} bytes)", url, kind, bytes.len());
        self.blobs.insert(url.clone(), Blob { kind, bytes });
        url
    }

    /// Fetch the bytes behind a URL
    pub fn fetch(&self, url: &str) -> Result<(MediaKind, &[u8]), ClipboardError> {
        self.blobs
            .get(url)
            .map(|blob| (blob.kind, blob.bytes.as_slice()))
            .ok_or_else(|| ClipboardError::UnknownObjectUrl(url.to_string()))
    }

    /// Release a URL, returns whether it was live
    pub fn revoke(&mut self, url: &str) -> bool {
        let revoked = self.blobs.remove(url).is_some();
        if revoked {
            log::debug!("[ObjectUrl] Revoked {}", url);
        }
        revoked
    }

    /// Release every URL, returns how many were live
    pub fn revoke_all(&mut self) -> usize {
        let count = self.blobs.len();
        self.blobs.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }

    #[cfg(test)]
    fn is_object_url(value: &str) -> bool {
        value.starts_with(URL_PREFIX)
    }
}
