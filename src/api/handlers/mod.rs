//! HTTP handlers and the shared error body.

mod system;
mod users;


use axum::{Json, http::StatusCode};
use serde::Serialize;
use tracing::error;
use utoipa::ToSchema;

use crate::service::ServiceError;
use crate::validation::FieldViolation;

pub use system::*;
pub use users::*;

/// Error response body
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message
    #[schema(example = "User not found")]
    pub error: String,
    /// Per-field violations, present only for validation failures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<FieldViolation>>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            details: None,
        }
    }
}

/// Error half of every handler's return type.
pub type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Map a service error to its status code and public body.
pub(crate) fn service_error(err: ServiceError) -> HandlerError {
    let status = match &err {
        ServiceError::Invalid { .. } | ServiceError::InvalidFormat { .. } => {
            StatusCode::BAD_REQUEST
        }
        ServiceError::Conflict(_) => StatusCode::CONFLICT,
        ServiceError::NotFound { .. } => StatusCode::NOT_FOUND,
        ServiceError::Internal { source, .. } => {
            error!(error = %source, "{}", err);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    let body = match err {
        ServiceError::Invalid { details } => ErrorResponse {
            error: "Validation failed".to_string(),
            details: Some(details),
        },
        other => ErrorResponse::new(other.to_string()),
    };

    (status, Json(body))
}
