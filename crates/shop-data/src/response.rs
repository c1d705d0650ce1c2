//! Buffered API responses.

use crate::FetchError;
use serde::de::DeserializeOwned;

/// Longest error body carried into an error message.
const MAX_ERROR_BODY: usize = 200;

/// A fully read API response.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// The HTTP status code.
    pub status: u16,
    /// The response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    pub fn new(status: u16, body: Vec<u8>) -> Self {
        Self { status, body }
    }

    /// Read the whole body of a `reqwest` response.
    pub async fn read(response: reqwest::Response) -> Result<Self, FetchError> {
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(Self::new(status, body))
    }

    /// Check if the response was successful (2xx status).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Get the response body as text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Parse the response body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        Ok(serde_json::from_slice(&self.body)?)
    }

    /// Convert to a Result, returning an error for non-2xx status codes.
    ///
    /// The error message is the body, shortened, or the status reason when
    /// the body is empty.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            return Ok(self);
        }

        let body = String::from_utf8_lossy(&self.body);
        let body = body.trim();
        let message = if body.is_empty() {
            reqwest::StatusCode::from_u16(self.status)
                .ok()
                .and_then(|s| s.canonical_reason())
                .unwrap_or("Unknown error")
                .to_string()
        } else {
            body.chars().take(MAX_ERROR_BODY).collect()
        };

        Err(FetchError::HttpError {
            status: self.status,
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_response_is_success() {
        assert!(ApiResponse::new(200, vec![]).is_success());
        assert!(ApiResponse::new(204, vec![]).is_success());
        assert!(!ApiResponse::new(302, vec![]).is_success());
        assert!(!ApiResponse::new(500, vec![]).is_success());
    }

    #[test]
    fn test_response_json() {
        let resp = ApiResponse::new(200, br#"[{"id": 1}, {"id": 2}]"#.to_vec());
        let ids: Vec<serde_json::Value> = resp.json().unwrap();
        assert_eq!(ids.len(), 2);
    }

    #[test]
    fn test_response_json_invalid() {
        let resp = ApiResponse::new(200, b"<html>".to_vec());
        let result: Result<Vec<u8>, _> = resp.json();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_response_text_invalid_utf8() {
        assert!(ApiResponse::new(200, vec![0xff, 0xfe]).text().is_err());
    }

    #[test]
    fn test_error_for_status_uses_body() {
        let err = ApiResponse::new(400, b"  Email is required \n".to_vec())
            .error_for_status()
            .unwrap_err();
        match err {
            FetchError::HttpError { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Email is required");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_error_for_status_empty_body_uses_reason() {
        let err = ApiResponse::new(503, Vec::new()).error_for_status().unwrap_err();
        assert_eq!(err.to_string(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn test_error_for_status_truncates_long_body() {
        let err = ApiResponse::new(500, vec![b'x'; 1_000])
            .error_for_status()
            .unwrap_err();
        match err {
            FetchError::HttpError { message, .. } => assert_eq!(message.len(), MAX_ERROR_BODY),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
