use std::cell::RefCell;

use super::*;
use crate::util::viewport::FixedViewport;

#[derive(Default)]
struct RecordingPanel {
    open: Cell<bool>,
    scroll_locked: Cell<bool>,
    calls: RefCell<Vec<&'static str>>,
}

impl PanelSurface for RecordingPanel {
    fn set_open(&self, open: bool) {
        self.open.set(open);
        self.calls.borrow_mut().push(if open { "open" } else { "close" });
    }

    fn set_scroll_locked(&self, locked: bool) {
        self.scroll_locked.set(locked);
    }
}

fn panel_at(width: f64) -> (Rc<RecordingPanel>, Rc<FixedViewport>, PanelController) {
    let surface = Rc::new(RecordingPanel::default());
    let viewport = Rc::new(FixedViewport::new(width));
    let controller = PanelController::new(surface.clone(), ViewportQuery::new(viewport.clone(), 1024.0));
    (surface, viewport, controller)
}

// =============================================================
// toggle
// =============================================================

#[test]
fn narrow_toggle_opens_and_locks_scroll() {
    let (surface, _, panel) = panel_at(800.0);
    assert_eq!(panel.toggle(), PanelToggle::Opened);
    assert!(panel.is_open());
    assert!(surface.open.get());
    assert!(surface.scroll_locked.get());
}

#[test]
fn double_toggle_returns_to_closed_unlocked() {
    let (surface, _, panel) = panel_at(800.0);
    panel.toggle();
    assert_eq!(panel.toggle(), PanelToggle::Closed);
    assert!(!panel.is_open());
    assert!(!surface.open.get());
    assert!(!surface.scroll_locked.get());
}

#[test]
fn wide_toggle_is_noop() {
    let (surface, _, panel) = panel_at(1280.0);
    assert_eq!(panel.toggle(), PanelToggle::WideViewportNoop);
    assert!(!panel.is_open());
    assert!(surface.calls.borrow().is_empty());
}

#[test]
fn threshold_width_counts_as_narrow() {
    let (_, _, panel) = panel_at(1024.0);
    assert_eq!(panel.toggle(), PanelToggle::Opened);
}

// =============================================================
// outside click
// =============================================================

#[test]
fn outside_click_closes_open_panel() {
    let (surface, _, panel) = panel_at(800.0);
    panel.toggle();
    assert!(panel.handle_outside_click(PointerTarget::Outside));
    assert!(!panel.is_open());
    assert!(!surface.scroll_locked.get());
}

#[test]
fn clicks_on_panel_or_trigger_keep_it_open() {
    let (_, _, panel) = panel_at(800.0);
    panel.toggle();
    assert!(!panel.handle_outside_click(PointerTarget::Panel));
    assert!(!panel.handle_outside_click(PointerTarget::Trigger));
    assert!(panel.is_open());
}

#[test]
fn outside_click_on_closed_panel_does_nothing() {
    let (surface, _, panel) = panel_at(800.0);
    assert!(!panel.handle_outside_click(PointerTarget::Outside));
    assert!(surface.calls.borrow().is_empty());
}

// =============================================================
// resize
// =============================================================

#[test]
fn widening_resets_open_panel() {
    let (surface, viewport, panel) = panel_at(800.0);
    panel.toggle();
    viewport.set_width(1280.0);
    panel.handle_resize();
    assert!(!panel.is_open());
    assert!(!surface.open.get());
    assert!(!surface.scroll_locked.get());
}

#[test]
fn widening_is_idempotent_from_any_state() {
    let (surface, viewport, panel) = panel_at(1280.0);
    panel.handle_resize();
    panel.handle_resize();
    assert!(!panel.is_open());
    assert!(!surface.scroll_locked.get());

    viewport.set_width(600.0);
    panel.toggle();
    viewport.set_width(2000.0);
    panel.handle_resize();
    panel.handle_resize();
    assert!(!panel.is_open());
    assert!(!surface.scroll_locked.get());
}

#[test]
fn narrow_resize_keeps_panel_state() {
    let (_, viewport, panel) = panel_at(800.0);
    panel.toggle();
    viewport.set_width(700.0);
    panel.handle_resize();
    assert!(panel.is_open());
}

// =============================================================
// dismiss (Escape)
// =============================================================

#[test]
fn dismiss_closes_only_open_narrow_panel() {
    let (_, viewport, panel) = panel_at(800.0);
    assert!(!panel.dismiss());

    panel.toggle();
    assert!(panel.dismiss());
    assert!(!panel.is_open());

    viewport.set_width(1280.0);
    assert!(!panel.dismiss());
}
