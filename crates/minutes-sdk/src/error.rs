//! Error types for the Minutes SDK.

use serde::Deserialize;
use thiserror::Error;

/// SDK operation errors
#[derive(Debug, Error)]
pub enum SdkError {
    /// Connection error (network, DNS, refused)
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The server rejected the input (HTTP 400)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Transcript or action item does not exist (HTTP 404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Any other non-success response
    #[error("Server error (HTTP {status}): {message}{}", suffix(.details))]
    ServerError {
        /// HTTP status code
        status: u16,
        /// `error` field of the response body
        message: String,
        /// `details` field of the response body, if any
        details: Option<String>,
    },

    /// Response body did not have the expected shape
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// The server URL or an ID could not be used
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

fn suffix(details: &Option<String>) -> String {
    details
        .as_ref()
        .map(|d| format!(" ({})", d))
        .unwrap_or_default()
}

/// Error body returned by the service
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
    #[serde(default)]
    pub details: Option<String>,
}

impl SdkError {
    /// Map a non-success status and its body to an error
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let (message, details) = match serde_json::from_str::<ErrorBody>(body) {
            Ok(parsed) => (parsed.error, parsed.details),
            Err(_) => (body.trim().to_string(), None),
        };

        match status {
            400 | 422 => SdkError::InvalidInput(message),
            404 => SdkError::NotFound(message),
            _ => SdkError::ServerError {
                status,
                message,
                details,
            },
        }
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            SdkError::ConnectionError(e.to_string())
        } else if e.is_decode() {
            SdkError::InvalidResponse(e.to_string())
        } else if e.is_builder() {
            SdkError::InvalidArgument(e.to_string())
        } else {
            SdkError::ConnectionError(e.to_string())
        }
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(e: serde_json::Error) -> Self {
        SdkError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
