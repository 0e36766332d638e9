// Error handling module
// Defines the error taxonomy surfaced by every client operation

use thiserror::Error;

/// Longest response excerpt kept on a decode error
const BODY_EXCERPT_LEN: usize = 512;

/// Errors that can occur while talking to the gift card API
#[derive(Error, Debug)]
pub enum ApiError {
    /// Token endpoint rejected the request or returned an unusable body
    #[error("Authentication failed: {0}")]
    AuthError(String),

    /// Client id or secret unusable
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// The HTTP call did not complete
    #[error("HTTP transport error: {0}")]
    TransportError(#[from] reqwest::Error),

    /// Response body was not valid JSON
    #[error("Failed to decode response from {url} (status {status}): {source}")]
    DecodeError {
        url: String,
        status: u16,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Request parameter validation error
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl ApiError {
    /// Build a decode error, keeping only the head of the offending body
    pub(crate) fn decode(url: &str, status: u16, body: &str, source: serde_json::Error) -> Self {
        ApiError::DecodeError {
            url: url.to_string(),
            status,
            body: body_excerpt(body),
            source,
        }
    }

    /// Short machine-readable kind, used in log fields
    pub fn kind(&self) -> &'static str {
        match self {
            ApiError::AuthError(_) => "auth_error",
            ApiError::InvalidCredentials(_) => "invalid_credentials",
            ApiError::TransportError(_) => "transport_error",
            ApiError::DecodeError { .. } => "decode_error",
            ApiError::ConfigError(_) => "config_error",
            ApiError::ValidationError(_) => "validation_error",
        }
    }
}

/// Head of a response body, for error messages and logs
pub(crate) fn body_excerpt(body: &str) -> String {
    match body.char_indices().nth(BODY_EXCERPT_LEN) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ApiError>;
