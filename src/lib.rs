//! Client-side behavior for the Ponti admin panel.
//!
//! This crate is compiled to WebAssembly and runs on server-rendered admin
//! pages. The server owns the markup; this crate owns the interactive layer
//! on top of it: the off-canvas navigation panel, persisted accordion and
//! theme preferences, transient notifications, form affordances, tooltips,
//! keyboard shortcuts, a CSRF-aware JSON request helper, and a small bar
//! chart renderer. Page scripts reach it through `window.PontiAdmin`.
//!
//! Everything outside [`browser`] is plain Rust driven through small surface
//! traits, so it builds and tests natively without a DOM.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`app`] | Composition root; builds every controller once |
//! | [`state`] | Panel, accordion, theme, and notification controllers |
//! | [`util`] | Storage, viewport, timers, forms, tooltips, keyboard, formatting |
//! | [`net`] | JSON request helper with CSRF headers and failure reporting |
//! | [`chart`] | Bar chart layout and `Canvas2D` drawing |
//! | [`config`] | Page-supplied tunables |
//! | [`error`] | Crate error type |
//! | `browser` | DOM surfaces and event wiring (`hydrate` feature only) |

pub mod app;
pub mod chart;
pub mod config;
pub mod error;
pub mod net;
pub mod state;
pub mod util;

#[cfg(feature = "hydrate")]
pub mod browser;
