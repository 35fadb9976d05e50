//! Server error types.

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use lead_store::LeadStoreError;
use rpc_protocol::{ErrorBody, error_codes};

/// Server error type.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// Invalid request parameters.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Lead store error. The store's error kind decides the status code.
    #[error(transparent)]
    Store(#[from] LeadStoreError),
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError::InvalidRequest(rejection.body_text())
    }
}

impl ServerError {
    fn status_and_code(&self) -> (StatusCode, &'static str) {
        match self {
            ServerError::InvalidRequest(_) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST)
            }
            ServerError::Store(LeadStoreError::Validation(_)) => {
                (StatusCode::BAD_REQUEST, error_codes::INVALID_REQUEST)
            }
            ServerError::Store(LeadStoreError::NotFound { .. }) => {
                (StatusCode::NOT_FOUND, error_codes::RESOURCE_NOT_FOUND)
            }
            ServerError::Store(e) if e.is_connection() => {
                (StatusCode::SERVICE_UNAVAILABLE, error_codes::STORE_UNAVAILABLE)
            }
            ServerError::Store(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error_codes::INTERNAL_ERROR)
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, code) = self.status_and_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(status = %status, error = %message, "Request failed");
        } else {
            tracing::warn!(status = %status, error = %message, "Request rejected");
        }

        (status, Json(ErrorBody::new(code, message))).into_response()
    }
}

/// Result type alias for server operations.
pub type ServerResult<T> = Result<T, ServerError>;
