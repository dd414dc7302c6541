//! One-shot user actions exposed to page markup.

#[cfg(test)]
#[path = "actions_test.rs"]
mod actions_test;

/// Run `action` only if `confirm` approves `message`. Returns whether the
/// action ran.
pub fn confirm_and_run(confirm: impl FnOnce(&str) -> bool, message: &str, action: impl FnOnce()) -> bool {
    if confirm(message) {
        action();
        return true;
    }
    false
}
