//! Controllers that own on-screen state.
//!
//! DESIGN
//! ======
//! Each controller holds only the collaborators it needs (a rendering
//! surface, the preference store, the scheduler) and is constructed once by
//! [`crate::app::AdminApp`]. None of them touch the DOM directly, so the same
//! logic runs in the browser and under `cargo test`.

pub mod accordion;
pub mod notification;
pub mod panel;
pub mod theme;
