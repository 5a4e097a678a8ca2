//! # `localStorage` key-value store for browser-side persistence
//!
//! [`BrowserStorage`] is the [`KeyValueStore`] used on the **web platform**. It
//! wraps `window.localStorage` through [`web_sys`], so whatever the public pages
//! read survives reloads on the same browser profile.
//!
//! ## Handle management
//!
//! `BrowserStorage` is a zero-size struct that looks the storage object up on
//! every call. `web_sys::Storage` is not `Send`, and the lookup is a property
//! read the browser serves from cache.
//!
//! ## Error handling
//!
//! Reads that fail (storage disabled, private mode) behave like a missing key.
//! Writes that fail (quota exceeded) are logged and dropped: the adapter on top
//! already treats absent data as "use the defaults".

use crate::kv::KeyValueStore;

#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserStorage;

impl BrowserStorage {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Option<web_sys::Storage> {
        web_sys::window()?.local_storage().ok()?
    }
}

impl KeyValueStore for BrowserStorage {
    fn get_item(&self, key: &str) -> Option<String> {
        Self::storage()?.get_item(key).ok()?
    }

    fn set_item(&self, key: &str, value: &str) {
        let Some(storage) = Self::storage() else {
            tracing::warn!(key, "localStorage unavailable, value not saved");
            return;
        };
        if let Err(e) = storage.set_item(key, value) {
            tracing::warn!(key, error = ?e, "localStorage write failed");
        }
    }

    fn remove_item(&self, key: &str) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(key);
        }
    }
}
