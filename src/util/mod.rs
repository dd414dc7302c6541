//! Utility helpers shared by the controllers and the browser layer.
//!
//! SYSTEM CONTEXT
//! ==============
//! Utility modules isolate browser/environment concerns (storage, timers,
//! viewport width) behind small traits so controller logic stays testable.

pub mod actions;
pub mod debounce;
pub mod format;
pub mod forms;
pub mod keyboard;
pub mod store;
pub mod timer;
pub mod tooltip;
pub mod viewport;
