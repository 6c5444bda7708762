use reqwest::StatusCode;
use thiserror::Error;

use crate::domain::ports::ChatError;

/// Errors that can occur when talking to the chat-completion endpoint
#[derive(Error, Debug)]
pub enum LlmApiError {
    /// Invalid request parameters (HTTP 400)
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Invalid or missing API key (HTTP 401, 403)
    #[error("Authentication failed: {0}")]
    AuthenticationFailed(String),

    /// Model or endpoint not found (HTTP 404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Rate limit exceeded (HTTP 429)
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Server error (HTTP 5xx)
    #[error("Server error ({0}): {1}")]
    ServerError(StatusCode, String),

    /// Network or connection error
    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unknown or unexpected status
    #[error("Unknown error ({0}): {1}")]
    UnknownError(StatusCode, String),
}

impl LlmApiError {
    /// Map an HTTP status and response body to an error variant
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status.as_u16() {
            400 => Self::InvalidRequest(body),
            401 | 403 => Self::AuthenticationFailed(body),
            404 => Self::NotFound(body),
            429 => Self::RateLimitExceeded,
            500..=599 => Self::ServerError(status, body),
            _ => Self::UnknownError(status, body),
        }
    }

    /// HTTP status carried by the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::InvalidRequest(_) => Some(400),
            Self::AuthenticationFailed(_) => Some(401),
            Self::NotFound(_) => Some(404),
            Self::RateLimitExceeded => Some(429),
            Self::ServerError(status, _) | Self::UnknownError(status, _) => Some(status.as_u16()),
            Self::NetworkError(e) => e.status().map(|s| s.as_u16()),
            Self::JsonError(_) => None,
        }
    }
}

impl From<LlmApiError> for ChatError {
    fn from(err: LlmApiError) -> Self {
        match err {
            LlmApiError::NetworkError(e) if e.is_timeout() => Self::Timeout,
            LlmApiError::NetworkError(e) => Self::Transport(e.to_string()),
            LlmApiError::JsonError(e) => Self::InvalidResponse(e.to_string()),
            other => {
                let status = other.status().unwrap_or_default();
                Self::Api {
                    status,
                    message: other.to_string(),
                }
            }
        }
    }
}
