//! Transient status messages ("notifications").
//!
//! LIFECYCLE
//! =========
//! `Visible -> Dismissing -> Removed`. [`NotificationCoordinator::show`]
//! mounts a message and arms an auto-dismiss timer. Dismissal (automatic or
//! manual) starts the exit effect and arms a second, shorter timer that
//! detaches the element. Each notification owns at most one pending
//! [`TimerHandle`]; moving to the next phase drops the previous handle, so a
//! manual dismiss cancels the auto-dismiss and no element is ever detached
//! twice.

#[cfg(test)]
#[path = "notification_test.rs"]
mod notification_test;

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use crate::util::timer::{Scheduler, TimerHandle};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Warning,
    Error,
    #[default]
    Info,
}

impl NotificationKind {
    /// Parse a kind name; anything unrecognized is `Info`.
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "success" => Self::Success,
            "warning" => Self::Warning,
            "error" => Self::Error,
            _ => Self::Info,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Info => "info",
        }
    }

    /// Font Awesome icon name (without the `fa-` prefix).
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Warning => "exclamation-triangle",
            Self::Error => "exclamation-circle",
            Self::Info => "info-circle",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NotificationId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NotificationPhase {
    Visible,
    Dismissing,
    Removed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NotificationTiming {
    pub auto_dismiss_ms: u32,
    pub exit_ms: u32,
}

impl Default for NotificationTiming {
    fn default() -> Self {
        Self { auto_dismiss_ms: 5000, exit_ms: 300 }
    }
}

/// Rendering side of the coordinator.
pub trait NotificationSurface {
    /// Create the message container if the page does not have one yet.
    fn ensure_container(&self);
    fn mount(&self, id: NotificationId, kind: NotificationKind, text: &str);
    /// Start the exit effect (fade and slide up).
    fn begin_exit(&self, id: NotificationId);
    fn detach(&self, id: NotificationId);
}

struct Entry {
    kind: NotificationKind,
    phase: NotificationPhase,
    timer: Option<TimerHandle>,
}

#[derive(Default)]
struct Registry {
    next_id: u64,
    container_ready: bool,
    entries: BTreeMap<NotificationId, Entry>,
}

struct Shared {
    surface: Rc<dyn NotificationSurface>,
    scheduler: Rc<dyn Scheduler>,
    timing: NotificationTiming,
    registry: RefCell<Registry>,
}

/// Owns every live notification. Cheap to clone; clones share state.
#[derive(Clone)]
pub struct NotificationCoordinator {
    shared: Rc<Shared>,
}

impl NotificationCoordinator {
    pub fn new(surface: Rc<dyn NotificationSurface>, scheduler: Rc<dyn Scheduler>, timing: NotificationTiming) -> Self {
        Self {
            shared: Rc::new(Shared { surface, scheduler, timing, registry: RefCell::new(Registry::default()) }),
        }
    }

    /// Mount a new message and arm its auto-dismiss timer.
    pub fn show(&self, kind: NotificationKind, text: &str) -> NotificationId {
        let (id, needs_container) = {
            let mut registry = self.shared.registry.borrow_mut();
            let needs_container = !registry.container_ready;
            registry.container_ready = true;
            (Self::register(&mut registry, kind), needs_container)
        };
        if needs_container {
            self.shared.surface.ensure_container();
        }
        self.shared.surface.mount(id, kind, text);
        log::debug!("notification {} shown: kind={}", id.0, kind.as_str());
        self.arm_auto_dismiss(id);
        id
    }

    /// Track a message that the server already rendered. Nothing is mounted;
    /// the caller binds the existing element to the returned id.
    pub fn adopt(&self, kind: NotificationKind) -> NotificationId {
        let id = {
            let mut registry = self.shared.registry.borrow_mut();
            registry.container_ready = true;
            Self::register(&mut registry, kind)
        };
        self.arm_auto_dismiss(id);
        id
    }

    /// Begin removing a visible notification. Returns `false` (and does
    /// nothing) if it is already dismissing or gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        let previous_timer = {
            let mut registry = self.shared.registry.borrow_mut();
            let Some(entry) = registry.entries.get_mut(&id) else {
                return false;
            };
            if entry.phase != NotificationPhase::Visible {
                return false;
            }
            entry.phase = NotificationPhase::Dismissing;
            entry.timer.take()
        };
        // Cancels a pending auto-dismiss.
        drop(previous_timer);

        self.shared.surface.begin_exit(id);
        let weak = Rc::downgrade(&self.shared);
        let handle = self
            .shared
            .scheduler
            .schedule(self.shared.timing.exit_ms, Box::new(move || Self::with_shared(&weak, |c| c.finish_removal(id))));
        if let Some(entry) = self.shared.registry.borrow_mut().entries.get_mut(&id) {
            entry.timer = Some(handle);
        }
        true
    }

    pub fn phase(&self, id: NotificationId) -> Option<NotificationPhase> {
        let registry = self.shared.registry.borrow();
        match registry.entries.get(&id) {
            Some(entry) => Some(entry.phase),
            None if id.0 < registry.next_id => Some(NotificationPhase::Removed),
            None => None,
        }
    }

    pub fn kind(&self, id: NotificationId) -> Option<NotificationKind> {
        self.shared.registry.borrow().entries.get(&id).map(|e| e.kind)
    }

    /// Ids of notifications not yet removed, oldest first.
    pub fn live_ids(&self) -> Vec<NotificationId> {
        self.shared.registry.borrow().entries.keys().copied().collect()
    }

    fn register(registry: &mut Registry, kind: NotificationKind) -> NotificationId {
        let id = NotificationId(registry.next_id);
        registry.next_id += 1;
        registry.entries.insert(id, Entry { kind, phase: NotificationPhase::Visible, timer: None });
        id
    }

    fn arm_auto_dismiss(&self, id: NotificationId) {
        let weak = Rc::downgrade(&self.shared);
        let handle = self.shared.scheduler.schedule(
            self.shared.timing.auto_dismiss_ms,
            Box::new(move || Self::with_shared(&weak, |c| c.auto_dismiss(id))),
        );
        if let Some(entry) = self.shared.registry.borrow_mut().entries.get_mut(&id) {
            entry.timer = Some(handle);
        }
    }

    fn auto_dismiss(&self, id: NotificationId) {
        self.release_fired_timer(id);
        self.dismiss(id);
    }

    fn finish_removal(&self, id: NotificationId) {
        let removed = self.shared.registry.borrow_mut().entries.remove(&id);
        if let Some(mut entry) = removed {
            if let Some(timer) = entry.timer.take() {
                timer.forget();
            }
            self.shared.surface.detach(id);
            log::debug!("notification {} removed", id.0);
        }
    }

    /// The timer that is currently firing must not be cancelled from inside
    /// its own callback.
    fn release_fired_timer(&self, id: NotificationId) {
        let fired = self
            .shared
            .registry
            .borrow_mut()
            .entries
            .get_mut(&id)
            .and_then(|e| e.timer.take());
        if let Some(timer) = fired {
            timer.forget();
        }
    }

    fn with_shared(weak: &Weak<Shared>, f: impl FnOnce(&Self)) {
        if let Some(shared) = weak.upgrade() {
            f(&Self { shared });
        }
    }
}
