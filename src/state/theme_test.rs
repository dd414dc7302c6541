use std::cell::RefCell;

use super::*;
use crate::util::store::{MemoryBackend, PreferenceBackend};

#[derive(Default)]
struct RecordingTheme {
    root: Cell<Option<Theme>>,
    icon: RefCell<String>,
}

impl ThemeSurface for RecordingTheme {
    fn set_root_theme(&self, theme: Theme) {
        self.root.set(Some(theme));
    }

    fn set_indicator(&self, icon_class: &str) {
        *self.icon.borrow_mut() = icon_class.to_owned();
    }
}

fn setup(backend: Rc<MemoryBackend>) -> (Rc<RecordingTheme>, ThemeController) {
    let surface = Rc::new(RecordingTheme::default());
    let controller = ThemeController::new(surface.clone(), PreferenceStore::new(backend), "ponti-admin-theme");
    (surface, controller)
}

// =============================================================
// Theme
// =============================================================

#[test]
fn theme_default_is_light() {
    assert_eq!(Theme::default(), Theme::Light);
}

#[test]
fn parse_accepts_only_known_names() {
    assert_eq!(Theme::parse("light"), Some(Theme::Light));
    assert_eq!(Theme::parse("dark"), Some(Theme::Dark));
    assert_eq!(Theme::parse("Dark"), None);
    assert_eq!(Theme::parse(""), None);
}

#[test]
fn toggled_flips_and_indicator_shows_opposite() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled(), Theme::Light);
    assert_eq!(Theme::Light.indicator_icon(), "fas fa-moon");
    assert_eq!(Theme::Dark.indicator_icon(), "fas fa-sun");
}

// =============================================================
// ThemeController
// =============================================================

#[test]
fn initialize_defaults_to_light() {
    let backend = Rc::new(MemoryBackend::new());
    let (surface, theme) = setup(backend.clone());
    assert_eq!(theme.initialize(), Theme::Light);
    assert_eq!(surface.root.get(), Some(Theme::Light));
    assert_eq!(backend.raw("ponti-admin-theme").as_deref(), Some("light"));
}

#[test]
fn initialize_restores_persisted_dark() {
    let backend = Rc::new(MemoryBackend::new());
    backend.set_item("ponti-admin-theme", "dark").unwrap();
    let (surface, theme) = setup(backend);
    assert_eq!(theme.initialize(), Theme::Dark);
    assert_eq!(surface.root.get(), Some(Theme::Dark));
    assert_eq!(*surface.icon.borrow(), "fas fa-sun");
}

#[test]
fn initialize_ignores_garbage_value() {
    let backend = Rc::new(MemoryBackend::new());
    backend.set_item("ponti-admin-theme", "solarized").unwrap();
    let (_, theme) = setup(backend);
    assert_eq!(theme.initialize(), Theme::Light);
}

#[test]
fn toggle_round_trip_persists_and_swaps_icon() {
    let backend = Rc::new(MemoryBackend::new());
    let (surface, theme) = setup(backend.clone());
    theme.initialize();

    assert_eq!(theme.toggle(), Theme::Dark);
    assert_eq!(backend.raw("ponti-admin-theme").as_deref(), Some("dark"));
    assert_eq!(*surface.icon.borrow(), "fas fa-sun");

    assert_eq!(theme.toggle(), Theme::Light);
    assert_eq!(backend.raw("ponti-admin-theme").as_deref(), Some("light"));
    assert_eq!(*surface.icon.borrow(), "fas fa-moon");
}

#[test]
fn toggle_works_without_storage() {
    let (surface, theme) = setup(Rc::new(MemoryBackend::unavailable()));
    assert_eq!(theme.initialize(), Theme::Light);
    assert_eq!(theme.toggle(), Theme::Dark);
    assert_eq!(surface.root.get(), Some(Theme::Dark));
    assert_eq!(theme.current(), Theme::Dark);
}
