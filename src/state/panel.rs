//! Navigation sidebar visibility.
//!
//! DESIGN
//! ======
//! On narrow viewports the sidebar is a modal overlay: opening it activates
//! the backdrop and locks page scroll, and a click anywhere outside the
//! sidebar or its trigger closes it. On wide viewports the sidebar is always
//! visible and the open flag has no meaning, so widening the window forces
//! it back to closed.

#[cfg(test)]
#[path = "panel_test.rs"]
mod panel_test;

use std::cell::Cell;
use std::rc::Rc;

use crate::util::viewport::ViewportQuery;

/// Rendering side of the sidebar: `open` class on the panel, `active` on the
/// overlay, and `overflow: hidden` on the page body.
pub trait PanelSurface {
    /// Show or hide the sidebar together with its overlay.
    fn set_open(&self, open: bool);
    fn set_scroll_locked(&self, locked: bool);
}

/// Where a pointer event landed relative to the sidebar.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    /// Inside the sidebar itself.
    Panel,
    /// On (or inside) the control that toggles the sidebar.
    Trigger,
    Outside,
}

/// Result of a toggle request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelToggle {
    Opened,
    Closed,
    /// Wide viewport: the request is accepted and does nothing. A desktop
    /// collapse mode would hook in here.
    WideViewportNoop,
}

pub struct PanelController {
    surface: Rc<dyn PanelSurface>,
    viewport: ViewportQuery,
    open: Cell<bool>,
}

impl PanelController {
    pub fn new(surface: Rc<dyn PanelSurface>, viewport: ViewportQuery) -> Self {
        Self { surface, viewport, open: Cell::new(false) }
    }

    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Flip the sidebar on narrow viewports.
    pub fn toggle(&self) -> PanelToggle {
        if !self.viewport.is_narrow() {
            log::debug!("sidebar toggle ignored on wide viewport ({}px)", self.viewport.width());
            return PanelToggle::WideViewportNoop;
        }
        let next = !self.open.get();
        self.apply(next);
        if next { PanelToggle::Opened } else { PanelToggle::Closed }
    }

    /// Close the sidebar when a click lands outside it and its trigger.
    /// Returns `true` if the click closed the panel.
    pub fn handle_outside_click(&self, target: PointerTarget) -> bool {
        if target != PointerTarget::Outside || !self.open.get() || !self.viewport.is_narrow() {
            return false;
        }
        self.toggle() == PanelToggle::Closed
    }

    /// Re-evaluate after a viewport resize. Any wide viewport resets the
    /// panel to closed with scroll unlocked; repeated calls are harmless.
    pub fn handle_resize(&self) {
        if !self.viewport.is_narrow() {
            self.apply(false);
        }
    }

    /// Close the panel if it is open on a narrow viewport (Escape key).
    pub fn dismiss(&self) -> bool {
        if self.viewport.is_narrow() && self.open.get() {
            return self.toggle() == PanelToggle::Closed;
        }
        false
    }

    fn apply(&self, open: bool) {
        self.open.set(open);
        self.surface.set_open(open);
        self.surface.set_scroll_locked(open);
    }
}
