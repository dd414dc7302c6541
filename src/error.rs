//! Crate-wide error type.
//!
//! ERROR HANDLING
//! ==============
//! Storage errors never reach callers of the controllers; the preference
//! store logs and drops them. Network errors are surfaced to the user as an
//! `error` notification and then returned, so inline page scripts can still
//! react to them.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AdminError {
    /// The origin-scoped key-value store rejected a read or write.
    #[error("storage unavailable: {0}")]
    Storage(String),
    /// The server answered with a non-2xx status.
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },
    /// The request never produced a response.
    #[error("request failed: {0}")]
    Transport(String),
    /// The response or a caller-supplied payload was not valid JSON.
    #[error("invalid payload: {0}")]
    Decode(String),
    /// The embedded configuration block could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
    /// A required element is not present in the document.
    #[error("element not found: {0}")]
    MissingElement(String),
}

impl AdminError {
    /// Whether this error came from the network helper.
    #[must_use]
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Transport(_) | Self::Decode(_))
    }
}

impl From<serde_json::Error> for AdminError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode(err.to_string())
    }
}
