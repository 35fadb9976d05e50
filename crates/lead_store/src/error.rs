//! Lead store error types.

use thiserror::Error;

/// Errors that can occur during lead store operations.
#[derive(Debug, Error)]
pub enum LeadStoreError {
    /// The document store is unreachable or misconfigured.
    #[error("Connection error: {0}")]
    Connection(String),

    /// A required field is missing or malformed. Raised before any store call.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Other error.
    #[error("{0}")]
    Other(String),
}

impl LeadStoreError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type,
            id: id.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Returns true if the error means the store could not be reached,
    /// including driver failures that surface mid-operation.
    pub fn is_connection(&self) -> bool {
        match self {
            Self::Connection(_) => true,
            Self::Database(e) => matches!(
                e,
                sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed
            ),
            _ => false,
        }
    }
}

/// Result type for lead store operations.
pub type LeadStoreResult<T> = Result<T, LeadStoreError>;
