//! Runtime configuration embedded by the server-rendered page.
//!
//! The page may ship a `<script id="ponti-admin-config" type="application/json">`
//! block; every field is optional and falls back to the defaults below.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::Deserialize;

use crate::error::AdminError;

/// DOM id of the optional JSON configuration block.
pub const CONFIG_ELEMENT_ID: &str = "ponti-admin-config";

pub const DEFAULT_NARROW_VIEWPORT_MAX_PX: f64 = 1024.0;
pub const DEFAULT_NOTIFICATION_AUTO_DISMISS_MS: u32 = 5000;
pub const DEFAULT_NOTIFICATION_EXIT_MS: u32 = 300;
pub const DEFAULT_SUBMIT_LOADING_FALLBACK_MS: u32 = 10_000;
pub const DEFAULT_TEXTAREA_MIN_HEIGHT_PX: f64 = 100.0;
pub const DEFAULT_THEME_STORAGE_KEY: &str = "ponti-admin-theme";
pub const DEFAULT_ACCORDION_KEY_PREFIX: &str = "accordion-";
pub const DEFAULT_SLOW_PAGE_LOAD_MS: f64 = 3000.0;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AdminConfig {
    /// Widest viewport (inclusive) that still uses the modal sidebar.
    pub narrow_viewport_max_px: f64,
    pub notification_auto_dismiss_ms: u32,
    /// Length of the exit effect before a notification is detached.
    pub notification_exit_ms: u32,
    /// Submit buttons recover from the busy state after this long even if
    /// the page never navigates.
    pub submit_loading_fallback_ms: u32,
    pub textarea_min_height_px: f64,
    pub theme_storage_key: String,
    pub accordion_key_prefix: String,
    pub slow_page_load_ms: f64,
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            narrow_viewport_max_px: DEFAULT_NARROW_VIEWPORT_MAX_PX,
            notification_auto_dismiss_ms: DEFAULT_NOTIFICATION_AUTO_DISMISS_MS,
            notification_exit_ms: DEFAULT_NOTIFICATION_EXIT_MS,
            submit_loading_fallback_ms: DEFAULT_SUBMIT_LOADING_FALLBACK_MS,
            textarea_min_height_px: DEFAULT_TEXTAREA_MIN_HEIGHT_PX,
            theme_storage_key: DEFAULT_THEME_STORAGE_KEY.to_owned(),
            accordion_key_prefix: DEFAULT_ACCORDION_KEY_PREFIX.to_owned(),
            slow_page_load_ms: DEFAULT_SLOW_PAGE_LOAD_MS,
        }
    }
}

impl AdminConfig {
    /// Parse a configuration block. Absent fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`AdminError::Config`] when `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, AdminError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_json::from_str(raw).map_err(|e| AdminError::Config(e.to_string()))
    }
}
