//! Commerce error types.
//!
//! Only failures of external collaborators are errors. Cart constraint
//! violations are clamped and checkout precondition failures are states.

use thiserror::Error;

/// Errors reported by the collaborators the engines depend on.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// The request never produced a response.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The remote API answered with a non-success status.
    #[error("HTTP {status}: {message}")]
    Http { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// No response within the allotted time.
    #[error("Request timed out")]
    Timeout,

    /// The session task has shut down.
    #[error("Session closed")]
    SessionClosed,
}

impl CommerceError {
    /// Check if this error came from a bounded wait expiring.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CommerceError::Timeout)
    }
}

impl From<serde_json::Error> for CommerceError {
    fn from(e: serde_json::Error) -> Self {
        CommerceError::Decode(e.to_string())
    }
}
