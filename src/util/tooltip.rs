//! Tooltip placement geometry.

#[cfg(test)]
#[path = "tooltip_test.rs"]
mod tooltip_test;

/// Gap between the anchor and the tooltip, and minimum margin to the
/// viewport edge.
pub const TOOLTIP_GAP_PX: f64 = 8.0;

/// Viewport-relative box, as returned by `getBoundingClientRect`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }
}

/// Document-relative tooltip position.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPlacement {
    pub top: f64,
    pub left: f64,
    /// Flipped under the anchor because there was no room above.
    pub below: bool,
}

/// Centre the tooltip above `anchor`, flipping below when it would leave the
/// top of the viewport and clamping it inside the horizontal edges.
#[must_use]
pub fn place_tooltip(anchor: Rect, tip_width: f64, tip_height: f64, viewport_width: f64, scroll_y: f64) -> TooltipPlacement {
    let mut top = anchor.top - tip_height - TOOLTIP_GAP_PX;
    let mut left = anchor.left + anchor.width / 2.0 - tip_width / 2.0;
    let mut below = false;

    if top < 0.0 {
        top = anchor.bottom() + TOOLTIP_GAP_PX;
        below = true;
    }

    if left < 0.0 {
        left = TOOLTIP_GAP_PX;
    } else if left + tip_width > viewport_width {
        left = viewport_width - tip_width - TOOLTIP_GAP_PX;
    }

    TooltipPlacement { top: top + scroll_y, left, below }
}
