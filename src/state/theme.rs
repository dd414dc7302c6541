//! Light/dark theme selection.
//!
//! Applies a `data-theme` attribute on `<html>`, persists the choice, and
//! keeps the header toggle icon pointing at the *other* theme (moon while
//! light, sun while dark).

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::util::store::PreferenceStore;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored theme name. Unknown names yield `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon class for the toggle button: the action available, not the
    /// current state.
    pub fn indicator_icon(self) -> &'static str {
        match self {
            Self::Light => "fas fa-moon",
            Self::Dark => "fas fa-sun",
        }
    }
}

pub trait ThemeSurface {
    /// Set the `data-theme` attribute on the document root.
    fn set_root_theme(&self, theme: Theme);
    /// Swap the header toggle icon's class list.
    fn set_indicator(&self, icon_class: &str);
}

pub struct ThemeController {
    surface: Rc<dyn ThemeSurface>,
    store: PreferenceStore,
    storage_key: String,
    current: Cell<Theme>,
}

impl ThemeController {
    pub fn new(surface: Rc<dyn ThemeSurface>, store: PreferenceStore, storage_key: impl Into<String>) -> Self {
        Self { surface, store, storage_key: storage_key.into(), current: Cell::new(Theme::default()) }
    }

    pub fn current(&self) -> Theme {
        self.current.get()
    }

    /// Apply the persisted theme, or light when nothing valid is stored.
    pub fn initialize(&self) -> Theme {
        let theme = self
            .store
            .get(&self.storage_key)
            .as_deref()
            .and_then(Theme::parse)
            .unwrap_or_default();
        self.apply(theme);
        theme
    }

    pub fn toggle(&self) -> Theme {
        let next = self.current.get().toggled();
        self.apply(next);
        next
    }

    pub fn apply(&self, theme: Theme) {
        self.current.set(theme);
        self.surface.set_root_theme(theme);
        self.store.set(&self.storage_key, theme.as_str());
        self.surface.set_indicator(theme.indicator_icon());
    }
}
