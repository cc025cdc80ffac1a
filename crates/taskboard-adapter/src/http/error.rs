/*
[INPUT]:  Error sources (HTTP, API status, serialization, auth)
[OUTPUT]: Structured error types with context
[POS]:    Error handling layer - unified error types for entire crate
[UPDATE]: When adding new error sources or improving error messages
*/

use reqwest::StatusCode;
use thiserror::Error;

/// Main error type for the task API adapter
#[derive(Error, Debug)]
pub enum TaskApiError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response
    #[error("API error (code {code}): {message}")]
    Api { code: i32, message: String },

    /// Authentication failed
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Serialization/deserialization failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// URL parsing failed
    #[error("Invalid URL: {0}")]
    UrlParse(#[from] url::ParseError),

    /// Source unavailable for a reason reported verbatim (offline, fixture failures)
    #[error("{0}")]
    Unavailable(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after}s")]
    RateLimit { retry_after: u64 },
}

impl TaskApiError {
    /// Check if error indicates authentication failure
    pub fn is_auth_error(&self) -> bool {
        matches!(self, TaskApiError::Authentication { .. })
    }

    /// Create an API error from status code and message
    pub fn api_error(status: StatusCode, message: impl Into<String>) -> Self {
        TaskApiError::Api {
            code: status.as_u16() as i32,
            message: message.into(),
        }
    }
}

/// Result type alias for task API operations
pub type Result<T> = std::result::Result<T, TaskApiError>;
