//! One-shot timers as owned, cancellable handles.
//!
//! DESIGN
//! ======
//! Controllers never call `setTimeout` directly. They ask a [`Scheduler`] for
//! a timer and keep the returned [`TimerHandle`]. Dropping (or calling
//! [`TimerHandle::cancel`] on) a handle clears the timer if it has not fired
//! yet; [`TimerHandle::forget`] lets it run unconditionally. This mirrors
//! `gloo_timers::callback::Timeout`, which backs the browser scheduler.
//!
//! [`ManualScheduler`] drives the same contract from a virtual clock so
//! timer-dependent behavior can be tested deterministically.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Deferred work scheduled on the UI thread.
pub type Task = Box<dyn FnOnce()>;

/// Source of one-shot timers.
pub trait Scheduler {
    /// Run `task` after `delay_ms` milliseconds.
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle;
}

/// How a [`TimerHandle`] lets go of its timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Release {
    /// Clear the timer so it never fires.
    Cancel,
    /// Keep the timer armed without an owner.
    Detach,
}

/// Owned reference to a pending timer. Dropping it cancels the timer.
#[must_use = "dropping a TimerHandle cancels the timer; call `forget` to let it run"]
pub struct TimerHandle {
    release: Option<Box<dyn FnOnce(Release)>>,
}

impl TimerHandle {
    /// Wrap the scheduler-specific release routine. It runs exactly once,
    /// with [`Release::Cancel`] on drop or `cancel` and [`Release::Detach`]
    /// on `forget`.
    pub fn new(release: impl FnOnce(Release) + 'static) -> Self {
        Self { release: Some(Box::new(release)) }
    }

    /// Clear the timer. No-op if it already fired.
    pub fn cancel(mut self) {
        self.release_with(Release::Cancel);
    }

    /// Detach the handle; the timer fires regardless of this value's lifetime.
    pub fn forget(mut self) {
        self.release_with(Release::Detach);
    }

    fn release_with(&mut self, how: Release) {
        if let Some(release) = self.release.take() {
            release(how);
        }
    }
}

impl Drop for TimerHandle {
    fn drop(&mut self) {
        self.release_with(Release::Cancel);
    }
}

impl std::fmt::Debug for TimerHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimerHandle").field("armed", &self.release.is_some()).finish()
    }
}

struct PendingTask {
    due_ms: u64,
    seq: u64,
    cancelled: Rc<Cell<bool>>,
    task: Task,
}

#[derive(Default)]
struct ManualClock {
    now_ms: u64,
    next_seq: u64,
    pending: Vec<PendingTask>,
}

/// Virtual-clock scheduler. Time moves only through [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<ManualClock>>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Virtual milliseconds elapsed since construction.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.clock.borrow().now_ms
    }

    /// Timers that are armed and have not fired.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.clock
            .borrow()
            .pending
            .iter()
            .filter(|p| !p.cancelled.get())
            .count()
    }

    /// Move the clock forward by `ms`, firing every due timer in deadline
    /// order (ties in scheduling order). Timers scheduled by a firing task
    /// run in the same call if they fall due before the new time.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now_ms + ms;
        while let Some(next) = self.pop_due(target) {
            (next.task)();
        }
        self.clock.borrow_mut().now_ms = target;
    }

    fn pop_due(&self, target: u64) -> Option<PendingTask> {
        let mut clock = self.clock.borrow_mut();
        clock.pending.retain(|p| !p.cancelled.get());
        let idx = clock
            .pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= target)
            .min_by_key(|(_, p)| (p.due_ms, p.seq))
            .map(|(idx, _)| idx)?;
        let next = clock.pending.swap_remove(idx);
        clock.now_ms = next.due_ms;
        Some(next)
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let cancelled = Rc::new(Cell::new(false));
        {
            let mut clock = self.clock.borrow_mut();
            let seq = clock.next_seq;
            clock.next_seq += 1;
            let due_ms = clock.now_ms + u64::from(delay_ms);
            clock.pending.push(PendingTask { due_ms, seq, cancelled: Rc::clone(&cancelled), task });
        }
        TimerHandle::new(move |release| {
            if release == Release::Cancel {
                cancelled.set(true);
            }
        })
    }
}
