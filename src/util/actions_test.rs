use std::cell::{Cell, RefCell};

use super::*;

#[test]
fn declined_confirmation_skips_action() {
    let ran = Cell::new(false);
    assert!(!confirm_and_run(|_| false, "Excluir?", || ran.set(true)));
    assert!(!ran.get());
}

#[test]
fn accepted_confirmation_runs_action_with_message_shown() {
    let ran = Cell::new(false);
    let seen = RefCell::new(String::new());
    assert!(confirm_and_run(
        |msg| {
            *seen.borrow_mut() = msg.to_owned();
            true
        },
        "Excluir este projeto?",
        || ran.set(true),
    ));
    assert!(ran.get());
    assert_eq!(*seen.borrow(), "Excluir este projeto?");
}
