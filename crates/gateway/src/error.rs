//! Gateway error types with HTTP response mapping.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use thiserror::Error;

/// The closed error taxonomy the gateway exposes to clients.
///
/// Every backend failure is translated into one of these kinds; nothing
/// backend-specific crosses the gateway boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Malformed, missing, or out-of-range input. Never retried.
    InvalidParameter,
    /// A referenced entity does not exist.
    NotFound,
    /// A duplicate unique key.
    AlreadyExists,
    /// Storage, network, or unexpected failure. Clients get a generic
    /// message; the detail is logged server-side only.
    Internal,
}

/// Client-facing gateway error.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct GatewayError {
    pub kind: ErrorKind,
    pub message: String,
}

impl GatewayError {
    /// Creates a gateway error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Creates an `InvalidParameter` error.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidParameter, message)
    }

    /// Creates an `Internal` error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let status = match self.kind {
            ErrorKind::InvalidParameter => StatusCode::BAD_REQUEST,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::AlreadyExists => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = if self.kind == ErrorKind::Internal {
            tracing::error!(error = %self.message, "internal gateway error");
            "internal error".to_string()
        } else {
            self.message
        };

        let body = serde_json::json!({ "kind": self.kind, "error": message });
        (status, axum::Json(body)).into_response()
    }
}
