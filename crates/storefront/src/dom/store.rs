use tracing::warn;
use web_sys::{Storage, Window};

use super::js_message;
use crate::error::{Result, UiError};
use crate::view::{MemoryStore, PreferenceStore};

/// Preference storage backed by `localStorage`, or by memory when the
/// browser refuses access to it.
pub enum BrowserStore {
    Local(Storage),
    Memory(MemoryStore),
}

impl BrowserStore {
    pub fn from_window(window: &Window) -> Self {
        match window.local_storage() {
            Ok(Some(storage)) => Self::Local(storage),
            Ok(None) => {
                warn!("localStorage unavailable; preferences will not persist");
                Self::Memory(MemoryStore::new())
            }
            Err(e) => {
                warn!(error = %js_message(&e), "localStorage access denied; preferences will not persist");
                Self::Memory(MemoryStore::new())
            }
        }
    }
}

impl PreferenceStore for BrowserStore {
    fn load(&self, key: &str) -> Option<String> {
        match self {
            Self::Local(storage) => storage.get_item(key).ok().flatten(),
            Self::Memory(store) => store.load(key),
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<()> {
        match self {
            Self::Local(storage) => storage
                .set_item(key, value)
                .map_err(|e| UiError::Storage(js_message(&e))),
            Self::Memory(store) => store.save(key, value),
        }
    }
}
