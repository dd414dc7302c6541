#![allow(clippy::float_cmp)]

use std::cell::{Cell, RefCell};

use super::*;
use crate::state::accordion::{AccordionState, Reveal, SectionId, SectionSlot};
use crate::state::notification::NotificationId;
use crate::state::theme::Theme;
use crate::util::store::MemoryBackend;
use crate::util::timer::ManualScheduler;
use crate::util::viewport::FixedViewport;

const SECTIONS: [&str; 2] = ["projetos", "equipe"];

#[derive(Default)]
struct FakeDom {
    panel_open: Cell<bool>,
    scroll_locked: Cell<bool>,
    root_theme: Cell<Option<Theme>>,
    icon: RefCell<String>,
    expanded: RefCell<Vec<String>>,
    mounted: RefCell<Vec<(NotificationKind, String)>>,
    detached: RefCell<Vec<u64>>,
}

impl PanelSurface for FakeDom {
    fn set_open(&self, open: bool) {
        self.panel_open.set(open);
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }
}

impl AccordionSurface for FakeDom {
    fn section_count(&self) -> usize {
        SECTIONS.len()
    }

    fn section_id(&self, slot: SectionSlot) -> Option<SectionId> {
        SECTIONS.get(slot.0).map(|id| SectionId::new(*id))
    }

    fn is_expanded(&self, _slot: SectionSlot) -> bool {
        false
    }

    fn natural_height(&self, _slot: SectionSlot) -> f64 {
        120.0
    }

    fn render(&self, slot: SectionSlot, state: AccordionState, _reveal: Reveal) {
        let Some(id) = SECTIONS.get(slot.0) else {
            return;
        };
        let mut expanded = self.expanded.borrow_mut();
        expanded.retain(|e| e != id);
        if state.expanded {
            expanded.push((*id).to_owned());
        }
    }
}

impl ThemeSurface for FakeDom {
    fn set_root_theme(&self, theme: Theme) {
        self.root_theme.set(Some(theme));
    }

    fn set_indicator(&self, icon_class: &str) {
        *self.icon.borrow_mut() = icon_class.to_owned();
    }
}

impl NotificationSurface for FakeDom {
    fn ensure_container(&self) {}

    fn mount(&self, _id: NotificationId, kind: NotificationKind, text: &str) {
        self.mounted.borrow_mut().push((kind, text.to_owned()));
    }

    fn begin_exit(&self, _id: NotificationId) {}

    fn detach(&self, id: NotificationId) {
        self.detached.borrow_mut().push(id.0);
    }
}

struct Harness {
    dom: Rc<FakeDom>,
    storage: Rc<MemoryBackend>,
    viewport: Rc<FixedViewport>,
    sched: ManualScheduler,
    app: AdminApp,
}

fn harness(width: f64, storage: MemoryBackend) -> Harness {
    let dom = Rc::new(FakeDom::default());
    let storage = Rc::new(storage);
    let viewport = Rc::new(FixedViewport::new(width));
    let sched = ManualScheduler::new();
    let app = AdminApp::new(
        AdminConfig::default(),
        Environment { storage: storage.clone(), viewport: viewport.clone(), scheduler: Rc::new(sched.clone()) },
        Surfaces { panel: dom.clone(), accordion: dom.clone(), theme: dom.clone(), notifications: dom.clone() },
    );
    Harness { dom, storage, viewport, sched, app }
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

// =============================================================
// Startup
// =============================================================

#[test]
fn start_restores_accordion_and_theme() {
    let storage = MemoryBackend::new();
    storage.set_item("accordion-equipe", "true").unwrap();
    storage.set_item("ponti-admin-theme", "dark").unwrap();
    let h = harness(1280.0, storage);

    h.app.start();
    assert_eq!(*h.dom.expanded.borrow(), vec!["equipe".to_owned()]);
    assert_eq!(h.dom.root_theme.get(), Some(Theme::Dark));
    assert_eq!(*h.dom.icon.borrow(), "fas fa-sun");
}

#[test]
fn start_without_storage_uses_defaults() {
    let h = harness(1280.0, MemoryBackend::unavailable());
    h.app.start();
    assert!(h.dom.expanded.borrow().is_empty());
    assert_eq!(h.app.theme.current(), Theme::Light);
}

// =============================================================
// Keyboard
// =============================================================

#[test]
fn ctrl_slash_toggles_panel_on_narrow_viewport() {
    let h = harness(800.0, MemoryBackend::new());
    assert!(h.app.handle_key("/", ctrl()));
    assert!(h.app.panel.is_open());
    assert!(h.dom.scroll_locked.get());
}

#[test]
fn ctrl_slash_on_wide_viewport_is_consumed_but_inert() {
    let h = harness(1280.0, MemoryBackend::new());
    assert!(h.app.handle_key("/", ctrl()));
    assert!(!h.app.panel.is_open());
    assert!(!h.dom.panel_open.get());
}

#[test]
fn ctrl_shift_d_toggles_and_persists_theme() {
    let h = harness(1280.0, MemoryBackend::new());
    h.app.start();
    assert!(h.app.handle_key("D", Modifiers { ctrl: true, shift: true, ..Default::default() }));
    assert_eq!(h.app.theme.current(), Theme::Dark);
    assert_eq!(h.storage.raw("ponti-admin-theme").as_deref(), Some("dark"));
}

#[test]
fn escape_closes_open_panel_without_consuming_event() {
    let h = harness(800.0, MemoryBackend::new());
    h.app.panel.toggle();
    assert!(!h.app.handle_key("Escape", Modifiers::default()));
    assert!(!h.app.panel.is_open());
    assert!(!h.dom.scroll_locked.get());
}

#[test]
fn resize_to_wide_clears_stuck_overlay() {
    let h = harness(800.0, MemoryBackend::new());
    h.app.handle_key("/", ctrl());
    h.viewport.set_width(1440.0);
    h.app.panel.handle_resize();
    assert!(!h.app.panel.is_open());
    assert!(!h.dom.panel_open.get());
    assert!(!h.dom.scroll_locked.get());
}

// =============================================================
// Feedback
// =============================================================

#[test]
fn clipboard_feedback_uses_matching_kinds() {
    let h = harness(1280.0, MemoryBackend::new());
    h.app.report_clipboard(true);
    h.app.report_clipboard(false);
    assert_eq!(
        *h.dom.mounted.borrow(),
        vec![
            (NotificationKind::Success, CLIPBOARD_OK_MESSAGE.to_owned()),
            (NotificationKind::Error, CLIPBOARD_FAILED_MESSAGE.to_owned()),
        ]
    );

    h.sched.advance(5300);
    assert_eq!(h.dom.detached.borrow().len(), 2);
}

#[test]
fn slow_page_load_threshold() {
    let h = harness(1280.0, MemoryBackend::new());
    assert!(!h.app.report_page_load(1200.0));
    assert!(!h.app.report_page_load(3000.0));
    assert!(h.app.report_page_load(3000.5));
}

#[test]
fn load_time_prefers_navigation_entry() {
    assert_eq!(page_load_ms(Some(1840.0), 1900.0), 1840.0);
    assert_eq!(page_load_ms(Some(0.0), 1900.0), 1900.0);
    assert_eq!(page_load_ms(None, 1900.0), 1900.0);
}
