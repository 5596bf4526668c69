//! API error types with IntoResponse
//!
//! Every error body is `{"detail": ...}`: a fixed message for business
//! errors, a list of field errors for validation failures.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::db::DbError;
use crate::models::{ValidationDetail, ValidationError};

/// API error type with automatic HTTP status mapping
#[derive(Debug)]
pub enum ApiError {
    /// Request failed shape/type validation (422)
    Validation(Vec<ValidationError>),

    /// Email belongs to an existing user (400)
    DuplicateEmail,

    /// No user with the requested id (404)
    UserNotFound,

    /// Framework rejection passed through unchanged (e.g. 415)
    Rejection { status: StatusCode, message: String },

    /// Database error (500, logged)
    Database(DbError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            Self::Validation(errors) => {
                let detail: Vec<ValidationDetail> =
                    errors.iter().map(ValidationError::detail).collect();
                (StatusCode::UNPROCESSABLE_ENTITY, json!({ "detail": detail }))
            }
            Self::DuplicateEmail => (
                StatusCode::BAD_REQUEST,
                json!({ "detail": "Email already registered" }),
            ),
            Self::UserNotFound => (
                StatusCode::NOT_FOUND,
                json!({ "detail": "User not found" }),
            ),
            Self::Rejection { status, message } => (*status, json!({ "detail": message })),
            Self::Database(e) => {
                // Log the actual error, return generic message
                tracing::error!("Database error: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "detail": "Internal server error" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        Self::Validation(vec![e])
    }
}

impl From<Vec<ValidationError>> for ApiError {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::Validation(errors)
    }
}

impl From<DbError> for ApiError {
    fn from(e: DbError) -> Self {
        Self::Database(e)
    }
}
