//! [`Scheduler`] backed by `setTimeout` through `gloo-timers`.

use gloo_timers::callback::Timeout;

use crate::util::timer::{Release, Scheduler, Task, TimerHandle};

pub(super) struct GlooScheduler;

impl Scheduler for GlooScheduler {
    fn schedule(&self, delay_ms: u32, task: Task) -> TimerHandle {
        let timeout = Timeout::new(delay_ms, task);
        TimerHandle::new(move |release| match release {
            // Dropping a gloo `Timeout` clears it.
            Release::Cancel => drop(timeout),
            Release::Detach => {
                timeout.forget();
            }
        })
    }
}
