use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use cocktails_types::ports::RepoError;
use serde_json::json;
use thiserror::Error;

use crate::application::password::HashingError;
use crate::validation::FieldError;

pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{} field(s) failed validation", .0.len())]
    Validation(Vec<FieldError>),

    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Unknown email and wrong password are indistinguishable on purpose.
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Password hashing failed: {0}")]
    Hashing(#[from] HashingError),

    #[error("Internal error")]
    Internal(#[from] anyhow::Error),
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::Constraint(m) => AppError::Conflict(m),
            RepoError::Db(m) => AppError::Store(m),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (code, body) = match self {
            AppError::Validation(errors) => (StatusCode::BAD_REQUEST, json!({ "errors": errors })),
            AppError::BadRequest(m) => (StatusCode::BAD_REQUEST, json!({ "error": m })),
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                json!({ "message": INVALID_CREDENTIALS }),
            ),
            AppError::Conflict(m) => (StatusCode::CONFLICT, json!({ "error": m })),
            AppError::Store(m) => {
                tracing::error!(error = %m, "store failure");
                (StatusCode::INTERNAL_SERVER_ERROR, json!({ "error": m }))
            }
            AppError::Hashing(e) => {
                tracing::error!(error = %e, "password hashing failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "password hashing failed" }),
                )
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "message": "Server error" }),
                )
            }
        };
        (code, Json(body)).into_response()
    }
}
