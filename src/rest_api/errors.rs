//! # REST API Errors
//!
//! Error types for the user endpoints and their HTTP status mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::registry::{RegistryError, UserId};

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;

/// REST API errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// Path id is not an integer
    #[error("Invalid user id: '{0}'")]
    InvalidId(String),

    /// Request body could not be decoded as a user
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Decoded user failed validation
    #[error("Invalid user: {0}")]
    Validation(String),

    /// No user stored at the id
    #[error("User not found: {0}")]
    NotFound(UserId),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// Registry fault
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            // 400 Bad Request
            RestError::InvalidId(_) => StatusCode::BAD_REQUEST,
            RestError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            RestError::Validation(_) => StatusCode::BAD_REQUEST,

            // 404 Not Found
            RestError::NotFound(_) => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.status_code().is_client_error()
    }
}

impl From<RegistryError> for RestError {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Validation(msg) => RestError::Validation(msg),
            other @ RegistryError::LockPoisoned => RestError::Internal(other.to_string()),
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}
