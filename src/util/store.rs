//! Persisted preference store over an origin-scoped key-value backend.
//!
//! SYSTEM CONTEXT
//! ==============
//! The theme and accordion controllers both read and write flags here. In the
//! browser the backend is `localStorage`; tests use [`MemoryBackend`].
//!
//! TRADE-OFFS
//! ==========
//! Persistence is best-effort. A backend that refuses a write (quota, private
//! mode, storage disabled) is logged and ignored so the calling controller
//! keeps working with its in-memory state. Callers must not assume a write
//! landed.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use crate::error::AdminError;

/// Raw string key-value backend, `get(key): string | null` / `set(key, value)`.
pub trait PreferenceBackend {
    /// Read the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Storage`] when the backend cannot be read.
    fn get_item(&self, key: &str) -> Result<Option<String>, AdminError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Storage`] when the backend rejects the write.
    fn set_item(&self, key: &str, value: &str) -> Result<(), AdminError>;
}

/// In-memory backend. Can be switched to "unavailable" to mimic a browser
/// with storage disabled.
#[derive(Debug)]
pub struct MemoryBackend {
    items: RefCell<HashMap<String, String>>,
    available: Cell<bool>,
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryBackend {
    #[must_use]
    pub fn new() -> Self {
        Self { items: RefCell::new(HashMap::new()), available: Cell::new(true) }
    }

    /// A backend that rejects every read and write.
    #[must_use]
    pub fn unavailable() -> Self {
        let backend = Self::new();
        backend.available.set(false);
        backend
    }

    pub fn set_available(&self, available: bool) {
        self.available.set(available);
    }

    /// Raw stored value, bypassing availability.
    #[must_use]
    pub fn raw(&self, key: &str) -> Option<String> {
        self.items.borrow().get(key).cloned()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }
}

impl PreferenceBackend for MemoryBackend {
    fn get_item(&self, key: &str) -> Result<Option<String>, AdminError> {
        if !self.available.get() {
            return Err(AdminError::Storage("storage disabled".to_owned()));
        }
        Ok(self.items.borrow().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), AdminError> {
        if !self.available.get() {
            return Err(AdminError::Storage("storage disabled".to_owned()));
        }
        self.items.borrow_mut().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Typed, failure-swallowing view over a [`PreferenceBackend`].
#[derive(Clone)]
pub struct PreferenceStore {
    backend: Rc<dyn PreferenceBackend>,
}

impl PreferenceStore {
    pub fn new(backend: Rc<dyn PreferenceBackend>) -> Self {
        Self { backend }
    }

    /// Stored string for `key`. Missing keys and unreadable storage both
    /// yield `None`; callers supply their own default.
    pub fn get(&self, key: &str) -> Option<String> {
        match self.backend.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("preference read failed: key={key} err={err}");
                None
            }
        }
    }

    /// Store `value` under `key`. Failures are logged and dropped.
    pub fn set(&self, key: &str, value: &str) {
        if let Err(err) = self.backend.set_item(key, value) {
            log::warn!("preference write failed: key={key} err={err}");
        }
    }

    /// Boolean flag stored as `"true"` / `"false"`. Any other stored text
    /// reads as absent.
    pub fn get_flag(&self, key: &str) -> Option<bool> {
        match self.get(key).as_deref() {
            Some("true") => Some(true),
            Some("false") => Some(false),
            _ => None,
        }
    }

    pub fn set_flag(&self, key: &str, value: bool) {
        self.set(key, if value { "true" } else { "false" });
    }
}
