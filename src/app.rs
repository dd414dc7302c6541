//! Composition root: builds every controller once and routes input to them.
//!
//! The browser layer constructs one [`AdminApp`] at page readiness with its
//! DOM-backed surfaces; tests construct it with recording fakes.

#[cfg(test)]
#[path = "app_test.rs"]
mod app_test;

use std::rc::Rc;

use crate::config::AdminConfig;
use crate::state::accordion::{AccordionController, AccordionSurface};
use crate::state::notification::{NotificationCoordinator, NotificationKind, NotificationSurface, NotificationTiming};
use crate::state::panel::{PanelController, PanelSurface};
use crate::state::theme::{ThemeController, ThemeSurface};
use crate::util::keyboard::{Modifiers, Shortcut, resolve_shortcut};
use crate::util::store::{PreferenceBackend, PreferenceStore};
use crate::util::timer::Scheduler;
use crate::util::viewport::{Viewport, ViewportQuery};

pub const CLIPBOARD_OK_MESSAGE: &str = "Copiado para a área de transferência!";
pub const CLIPBOARD_FAILED_MESSAGE: &str = "Erro ao copiar para a área de transferência.";

/// Rendering surfaces, one per controller.
pub struct Surfaces {
    pub panel: Rc<dyn PanelSurface>,
    pub accordion: Rc<dyn AccordionSurface>,
    pub theme: Rc<dyn ThemeSurface>,
    pub notifications: Rc<dyn NotificationSurface>,
}

/// Environment the controllers run against.
pub struct Environment {
    pub storage: Rc<dyn PreferenceBackend>,
    pub viewport: Rc<dyn Viewport>,
    pub scheduler: Rc<dyn Scheduler>,
}

/// Load time in ms since navigation start. Prefers the navigation entry's
/// `loadEventEnd`; falls back to `now_ms` when the entry is missing or the
/// load event has not finished.
#[must_use]
pub fn page_load_ms(load_event_end: Option<f64>, now_ms: f64) -> f64 {
    load_event_end.filter(|end| *end > 0.0).unwrap_or(now_ms)
}

pub struct AdminApp {
    pub config: AdminConfig,
    pub viewport: ViewportQuery,
    pub scheduler: Rc<dyn Scheduler>,
    pub panel: PanelController,
    pub accordion: AccordionController,
    pub theme: ThemeController,
    pub notifications: NotificationCoordinator,
}

impl AdminApp {
    pub fn new(config: AdminConfig, env: Environment, surfaces: Surfaces) -> Self {
        let store = PreferenceStore::new(env.storage);
        let viewport = ViewportQuery::new(env.viewport, config.narrow_viewport_max_px);
        let timing = NotificationTiming {
            auto_dismiss_ms: config.notification_auto_dismiss_ms,
            exit_ms: config.notification_exit_ms,
        };

        Self {
            panel: PanelController::new(surfaces.panel, viewport.clone()),
            accordion: AccordionController::new(surfaces.accordion, store.clone(), config.accordion_key_prefix.clone()),
            theme: ThemeController::new(surfaces.theme, store, config.theme_storage_key.clone()),
            notifications: NotificationCoordinator::new(surfaces.notifications, Rc::clone(&env.scheduler), timing),
            viewport,
            scheduler: env.scheduler,
            config,
        }
    }

    /// One-time setup at page readiness: restore persisted accordion and
    /// theme state.
    pub fn start(&self) {
        let restored = self.accordion.restore_sections();
        let theme = self.theme.initialize();
        log::info!("admin ui ready: theme={} restored_sections={restored}", theme.as_str());
    }

    /// Dispatch a key event. Returns `true` when the event was consumed and
    /// its default action should be prevented.
    pub fn handle_key(&self, key: &str, mods: Modifiers) -> bool {
        match resolve_shortcut(key, mods) {
            Some(Shortcut::TogglePanel) => {
                self.panel.toggle();
                true
            }
            Some(Shortcut::ToggleTheme) => {
                self.theme.toggle();
                true
            }
            Some(Shortcut::DismissPanel) => {
                self.panel.dismiss();
                false
            }
            None => false,
        }
    }

    /// Tell the user whether a clipboard write worked.
    pub fn report_clipboard(&self, copied: bool) {
        if copied {
            self.notifications.show(NotificationKind::Success, CLIPBOARD_OK_MESSAGE);
        } else {
            self.notifications.show(NotificationKind::Error, CLIPBOARD_FAILED_MESSAGE);
        }
    }

    /// Log the page load time. Returns `true` when it counts as slow.
    pub fn report_page_load(&self, load_ms: f64) -> bool {
        log::info!("Página carregada em {load_ms:.0}ms");
        let slow = load_ms > self.config.slow_page_load_ms;
        if slow {
            log::warn!("Página carregou lentamente");
        }
        slow
    }
}
