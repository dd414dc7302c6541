//! Trailing-edge debounce.

#[cfg(test)]
#[path = "debounce_test.rs"]
mod debounce_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::util::timer::{Scheduler, TimerHandle};

/// Delays a call until `wait_ms` have passed with no newer call. Each call
/// replaces (and so cancels) the previous pending one.
pub struct Debouncer {
    scheduler: Rc<dyn Scheduler>,
    wait_ms: u32,
    pending: RefCell<Option<TimerHandle>>,
}

impl Debouncer {
    pub fn new(scheduler: Rc<dyn Scheduler>, wait_ms: u32) -> Self {
        Self { scheduler, wait_ms, pending: RefCell::new(None) }
    }

    pub fn call(&self, f: impl FnOnce() + 'static) {
        let next = self.scheduler.schedule(self.wait_ms, Box::new(f));
        let previous = self.pending.borrow_mut().replace(next);
        drop(previous);
    }

    /// Drop the pending call, if any.
    pub fn cancel(&self) {
        if let Some(pending) = self.pending.borrow_mut().take() {
            pending.cancel();
        }
    }
}

/// Debounce interval from a page-supplied millisecond value. Negative,
/// non-finite, or missing values mean "next tick".
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn wait_ms_from(raw: Option<f64>) -> u32 {
    match raw {
        Some(ms) if ms.is_finite() && ms > 0.0 => ms.min(f64::from(u32::MAX)).round() as u32,
        _ => 0,
    }
}
