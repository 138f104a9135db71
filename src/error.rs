//! Error types for the boxfs library.

use thiserror::Error;

use crate::api::ApiErrorCode;

/// Main error type for boxfs operations.
#[derive(Error, Debug)]
pub enum BoxError {
    /// Network request error.
    #[error("Request error: {0}")]
    RequestError(#[from] reqwest::Error),

    /// JSON parsing error.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Box API returned a non-success status.
    #[error("API error ({status}): {code:?} - {message}")]
    ApiError {
        status: u16,
        code: ApiErrorCode,
        message: String,
    },

    /// The path does not resolve to an entry of the requested kind.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The path cannot be used for this operation (e.g. the root).
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// The operation is not supported by Box.
    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),

    /// Invalid or unexpected response from server.
    #[error("Invalid response from server")]
    InvalidResponse,

    /// A download kept redirecting past the configured limit.
    #[error("Too many redirects")]
    TooManyRedirects,

    /// Custom error message.
    #[error("{0}")]
    Custom(String),
}

impl BoxError {
    /// Whether this error means "nothing there", either locally or remotely.
    pub fn is_not_found(&self) -> bool {
        match self {
            BoxError::NotFound(_) => true,
            BoxError::ApiError { status, code, .. } => {
                *status == 404 || *code == ApiErrorCode::NotFound
            }
            _ => false,
        }
    }
}

/// Result type alias for boxfs operations.
pub type Result<T> = std::result::Result<T, BoxError>;
