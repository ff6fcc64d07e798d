//! Error types for the file server
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// == Server Error Enum ==
/// Unified error type for the file server.
///
/// A cache miss is not an error; lookups return `Option`.
#[derive(Error, Debug)]
pub enum ServerError {
    /// Copying a payload into the cache could not be allocated
    #[error("Out of memory caching {0} bytes")]
    OutOfMemory(usize),

    /// Requested path escapes the server root
    #[error("Forbidden path: {0}")]
    Forbidden(String),

    /// Method not supported on this resource
    #[error("Method not allowed: {0}")]
    MethodNotAllowed(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServerError::OutOfMemory(_) => StatusCode::SERVICE_UNAVAILABLE,
            ServerError::Forbidden(_) => StatusCode::FORBIDDEN,
            ServerError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ServerError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "error": self.to_string()
        }));

        (self.status_code(), body).into_response()
    }
}

impl From<std::io::Error> for ServerError {
    fn from(err: std::io::Error) -> Self {
        ServerError::Internal(err.to_string())
    }
}

// == Result Type Alias ==
/// Convenience Result type for the file server.
pub type Result<T> = std::result::Result<T, ServerError>;
