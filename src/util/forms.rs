//! Per-field form affordances: submit busy state, textarea growth, and
//! file-input labels. Fields share no state with each other.

#[cfg(test)]
#[path = "forms_test.rs"]
mod forms_test;

use std::cell::RefCell;
use std::rc::Rc;

use crate::util::timer::{Scheduler, TimerHandle};

/// Label shown on a submit button while the form is being sent.
pub const BUSY_LABEL_HTML: &str = r#"<i class="fas fa-spinner fa-spin"></i> Processando..."#;
/// File-input label before any file is chosen.
pub const CHOOSE_FILE_LABEL: &str = "Escolher arquivo";
pub const NO_FILE_SELECTED_LABEL: &str = "Nenhum arquivo selecionado";

/// Rendered height for an auto-growing textarea.
#[must_use]
pub fn textarea_height(scroll_height: f64, min_height: f64) -> f64 {
    scroll_height.max(min_height)
}

/// Text for a file input's label after a change event.
#[must_use]
pub fn file_label(selected: Option<&str>) -> &str {
    selected.filter(|name| !name.is_empty()).unwrap_or(NO_FILE_SELECTED_LABEL)
}

/// A submit control whose label and enabled state can be swapped.
pub trait SubmitControl {
    fn label_html(&self) -> String;
    fn set_label_html(&self, html: &str);
    fn set_disabled(&self, disabled: bool);
}

/// Busy state for one submit button. While busy the button is disabled and
/// shows a spinner; it recovers on its own after the fallback interval in
/// case the submission never navigates away.
pub struct SubmitBusy {
    control: Rc<dyn SubmitControl>,
    scheduler: Rc<dyn Scheduler>,
    fallback_ms: u32,
    restore: Rc<RefCell<Option<TimerHandle>>>,
}

impl SubmitBusy {
    pub fn new(control: Rc<dyn SubmitControl>, scheduler: Rc<dyn Scheduler>, fallback_ms: u32) -> Self {
        Self { control, scheduler, fallback_ms, restore: Rc::new(RefCell::new(None)) }
    }

    pub fn is_busy(&self) -> bool {
        self.restore.borrow().is_some()
    }

    /// Enter the busy state. Returns `false` if the button is already busy,
    /// so a double submit does not capture the spinner as the original label.
    pub fn begin(&self) -> bool {
        if self.is_busy() {
            return false;
        }
        let original = self.control.label_html();
        self.control.set_disabled(true);
        self.control.set_label_html(BUSY_LABEL_HTML);

        let control = Rc::clone(&self.control);
        let slot = Rc::downgrade(&self.restore);
        let handle = self.scheduler.schedule(
            self.fallback_ms,
            Box::new(move || {
                control.set_disabled(false);
                control.set_label_html(&original);
                if let Some(slot) = slot.upgrade()
                    && let Some(fired) = slot.borrow_mut().take()
                {
                    fired.forget();
                }
            }),
        );
        *self.restore.borrow_mut() = Some(handle);
        true
    }
}
