use super::*;

fn recorder() -> (Rc<RefCell<Vec<&'static str>>>, impl Fn(&'static str) -> Task) {
    let log = Rc::new(RefCell::new(Vec::new()));
    let log_for_task = Rc::clone(&log);
    let make = move |name: &'static str| -> Task {
        let log = Rc::clone(&log_for_task);
        Box::new(move || log.borrow_mut().push(name))
    };
    (log, make)
}

// =============================================================
// ManualScheduler
// =============================================================

#[test]
fn timer_fires_only_once_due() {
    let sched = ManualScheduler::new();
    let (log, task) = recorder();
    sched.schedule(100, task("a")).forget();

    sched.advance(99);
    assert!(log.borrow().is_empty());
    assert_eq!(sched.pending_count(), 1);

    sched.advance(1);
    assert_eq!(*log.borrow(), vec!["a"]);
    assert_eq!(sched.pending_count(), 0);
    assert_eq!(sched.now_ms(), 100);
}

#[test]
fn timers_fire_in_deadline_then_schedule_order() {
    let sched = ManualScheduler::new();
    let (log, task) = recorder();
    sched.schedule(300, task("late")).forget();
    sched.schedule(100, task("first")).forget();
    sched.schedule(100, task("second")).forget();

    sched.advance(1000);
    assert_eq!(*log.borrow(), vec!["first", "second", "late"]);
}

#[test]
fn dropping_handle_cancels() {
    let sched = ManualScheduler::new();
    let (log, task) = recorder();
    let handle = sched.schedule(10, task("a"));
    drop(handle);

    sched.advance(50);
    assert!(log.borrow().is_empty());
    assert_eq!(sched.pending_count(), 0);
}

#[test]
fn explicit_cancel_after_fire_is_noop() {
    let sched = ManualScheduler::new();
    let (log, task) = recorder();
    let handle = sched.schedule(10, task("a"));
    sched.advance(10);
    handle.cancel();
    assert_eq!(*log.borrow(), vec!["a"]);
}

#[test]
fn task_can_schedule_follow_up_within_same_advance() {
    let sched = ManualScheduler::new();
    let log = Rc::new(RefCell::new(Vec::new()));

    let inner_sched = sched.clone();
    let inner_log = Rc::clone(&log);
    sched
        .schedule(
            100,
            Box::new(move || {
                inner_log.borrow_mut().push(inner_sched.now_ms());
                let follow_log = Rc::clone(&inner_log);
                let follow_sched = inner_sched.clone();
                inner_sched
                    .schedule(50, Box::new(move || follow_log.borrow_mut().push(follow_sched.now_ms())))
                    .forget();
            }),
        )
        .forget();

    sched.advance(200);
    assert_eq!(*log.borrow(), vec![100, 150]);
    assert_eq!(sched.now_ms(), 200);
}

#[test]
fn debug_shows_armed_state() {
    let sched = ManualScheduler::new();
    let handle = sched.schedule(1, Box::new(|| {}));
    assert_eq!(format!("{handle:?}"), "TimerHandle { armed: true }");
    handle.forget();
}

// =============================================================
// TimerHandle release
// =============================================================

fn recording_handle() -> (Rc<RefCell<Vec<Release>>>, TimerHandle) {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let for_handle = Rc::clone(&seen);
    (seen, TimerHandle::new(move |release| for_handle.borrow_mut().push(release)))
}

#[test]
fn forget_detaches_instead_of_cancelling() {
    let (seen, handle) = recording_handle();
    handle.forget();
    assert_eq!(*seen.borrow(), vec![Release::Detach]);
}

#[test]
fn drop_and_cancel_both_cancel_once() {
    let (seen, handle) = recording_handle();
    drop(handle);
    assert_eq!(*seen.borrow(), vec![Release::Cancel]);

    let (seen, handle) = recording_handle();
    handle.cancel();
    assert_eq!(*seen.borrow(), vec![Release::Cancel]);
}

#[test]
fn forgotten_manual_timer_still_fires() {
    let sched = ManualScheduler::new();
    let (log, task) = recorder();
    sched.schedule(20, task("kept")).forget();
    sched.advance(20);
    assert_eq!(*log.borrow(), vec!["kept"]);
}
