//! HTTP client error types.

use shop_commerce::CommerceError;
use thiserror::Error;

/// Errors that can occur when talking to the storefront API.
#[derive(Error, Debug)]
pub enum FetchError {
    /// Failed to send the request.
    #[error("Request failed: {0}")]
    RequestError(String),

    /// Invalid URL or header value.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP error response.
    #[error("HTTP {status}: {message}")]
    HttpError { status: u16, message: String },

    /// Failed to parse response body.
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("Request timed out")]
    Timeout,
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            FetchError::Timeout
        } else if e.is_decode() {
            FetchError::ParseError(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidRequest(e.to_string())
        } else {
            FetchError::RequestError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::ParseError(e.to_string())
    }
}

impl From<FetchError> for CommerceError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::RequestError(message) | FetchError::InvalidRequest(message) => {
                CommerceError::Transport(message)
            }
            FetchError::HttpError { status, message } => CommerceError::Http { status, message },
            FetchError::ParseError(message) => CommerceError::Decode(message),
            FetchError::Timeout => CommerceError::Timeout,
        }
    }
}
