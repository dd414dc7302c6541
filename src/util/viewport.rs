//! Viewport width source and the shared "is narrow" predicate.
//!
//! Every consumer that branches on mobile vs desktop layout (panel toggle,
//! outside-click, resize, Escape) asks [`ViewportQuery::is_narrow`] so the
//! threshold lives in exactly one place.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::cell::Cell;
use std::rc::Rc;

/// Narrow viewports (inclusive of the threshold) use the modal sidebar.
#[must_use]
pub fn is_narrow(width: f64, max_narrow_px: f64) -> bool {
    width <= max_narrow_px
}

/// Source of the current viewport width in CSS pixels.
pub trait Viewport {
    fn width(&self) -> f64;
}

/// Viewport whose width is set explicitly. Used by tests and hosts that
/// already track their own layout width.
#[derive(Debug)]
pub struct FixedViewport {
    width: Cell<f64>,
}

impl FixedViewport {
    #[must_use]
    pub fn new(width: f64) -> Self {
        Self { width: Cell::new(width) }
    }

    pub fn set_width(&self, width: f64) {
        self.width.set(width);
    }
}

impl Viewport for FixedViewport {
    fn width(&self) -> f64 {
        self.width.get()
    }
}

/// Viewport source bound to its breakpoint.
#[derive(Clone)]
pub struct ViewportQuery {
    source: Rc<dyn Viewport>,
    max_narrow_px: f64,
}

impl ViewportQuery {
    pub fn new(source: Rc<dyn Viewport>, max_narrow_px: f64) -> Self {
        Self { source, max_narrow_px }
    }

    pub fn width(&self) -> f64 {
        self.source.width()
    }

    pub fn is_narrow(&self) -> bool {
        is_narrow(self.source.width(), self.max_narrow_px)
    }
}
