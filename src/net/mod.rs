//! Network helpers for server-rendered admin pages.

pub mod request;
