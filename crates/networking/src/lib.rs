//! Networking utilities for the Plant Disease app
//!
//! This crate provides HTTP client functionality with retry logic
//! and timeout handling.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod client;
pub mod retry;

pub use client::{HttpClient, HttpClientConfig, HttpResponse};
pub use retry::RetryPolicy;

/// Result type for network operations
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Error types for network operations
#[derive(Debug, thiserror::Error)]
pub enum NetworkError {
    /// The request could not be sent or the connection failed
    #[error("Request failed: {0}")]
    Request(String),

    /// No response within the configured timeout
    #[error("Request timed out")]
    Timeout,

    /// The server answered with a non-success status
    #[error("HTTP {status}: {body}")]
    Status {
        /// HTTP status code
        status: u16,
        /// Response body (possibly empty)
        body: String,
    },

    /// The response body was not the expected JSON
    #[error("Failed to decode response: {0}")]
    Decode(String),

    /// The request body could not be serialized
    #[error("Failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    /// The HTTP client could not be constructed
    #[error("Client configuration error: {0}")]
    Config(String),
}

impl NetworkError {
    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            NetworkError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Whether the failure is transient and the request may be retried
    ///
    /// Transport failures, timeouts, and these statuses are transient:
    /// 408, 425, 429, 500, 502, 503, 504, 522, 524.
    pub fn is_retryable(&self) -> bool {
        match self {
            NetworkError::Request(_) | NetworkError::Timeout => true,
            NetworkError::Status { status, .. } => matches!(
                status,
                408 | 425 | 429 | 500 | 502 | 503 | 504 | 522 | 524
            ),
            NetworkError::Decode(_) | NetworkError::Encode(_) | NetworkError::Config(_) => false,
        }
    }
}

impl From<reqwest::Error> for NetworkError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            NetworkError::Timeout
        } else if err.is_decode() {
            NetworkError::Decode(err.to_string())
        } else {
            NetworkError::Request(err.to_string())
        }
    }
}
