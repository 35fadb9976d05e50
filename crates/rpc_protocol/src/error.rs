//! Error body returned by every failing endpoint.

use serde::{Deserialize, Serialize};

/// Machine-readable error codes.
pub mod error_codes {
    /// The request body or a field in it is invalid.
    pub const INVALID_REQUEST: &str = "INVALID_REQUEST";
    /// The addressed lead does not exist.
    pub const RESOURCE_NOT_FOUND: &str = "RESOURCE_NOT_FOUND";
    /// The document store could not be reached.
    pub const STORE_UNAVAILABLE: &str = "STORE_UNAVAILABLE";
    /// Anything else.
    pub const INTERNAL_ERROR: &str = "INTERNAL_ERROR";
}

/// Error details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// One of [`error_codes`].
    pub code: String,
    /// Human readable message
    pub message: String,
}

/// Envelope around [`ApiError`]: `{"error": {"code": .., "message": ..}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ApiError,
}

impl ErrorBody {
    /// Creates a new error body
    pub fn new(code: &str, message: impl Into<String>) -> Self {
        Self {
            error: ApiError {
                code: code.to_string(),
                message: message.into(),
            },
        }
    }
}

impl std::fmt::Display for ErrorBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.error.code, self.error.message)
    }
}
