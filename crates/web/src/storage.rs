//! Browser `localStorage` store.

use trolley::storage::{KeyValueStore, StorageError};
use web_sys::{Storage, wasm_bindgen::JsValue};

/// Key-value store backed by the page's `localStorage`.
#[derive(Debug)]
pub struct BrowserStore {
    storage: Storage,
}

impl BrowserStore {
    /// Open the window's local storage.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Unavailable` if there is no window or storage is
    /// disabled.
    pub fn open() -> Result<Self, StorageError> {
        let window = web_sys::window()
            .ok_or_else(|| StorageError::Unavailable("no window".to_string()))?;

        let storage = window
            .local_storage()
            .map_err(js_error)?
            .ok_or_else(|| StorageError::Unavailable("localStorage is disabled".to_string()))?;

        Ok(Self { storage })
    }
}

impl KeyValueStore for BrowserStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(js_error)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(js_error)
    }
}

fn js_error(error: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{error:?}"))
}
