//! `localStorage` preference backend.

use wasm_bindgen::JsValue;

use crate::error::AdminError;
use crate::util::store::PreferenceBackend;

pub(super) struct LocalStorage {
    storage: Option<web_sys::Storage>,
}

impl LocalStorage {
    pub(super) fn new(window: &web_sys::Window) -> Self {
        // Throws when storage is disabled by the user agent.
        let storage = window.local_storage().unwrap_or(None);
        if storage.is_none() {
            log::warn!("localStorage unavailable; preferences will not persist");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&web_sys::Storage, AdminError> {
        self.storage
            .as_ref()
            .ok_or_else(|| AdminError::Storage("localStorage unavailable".to_owned()))
    }
}

fn storage_error(err: JsValue) -> AdminError {
    AdminError::Storage(format!("{err:?}"))
}

impl PreferenceBackend for LocalStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, AdminError> {
        self.storage()?.get_item(key).map_err(storage_error)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AdminError> {
        self.storage()?.set_item(key, value).map_err(storage_error)
    }
}
