use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity a lookup failed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Poll,
    Option,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::Poll => write!(f, "Poll"),
            Entity::Option => write!(f, "Option"),
        }
    }
}

/// Failures of the poll/vote core. Handlers translate these into [`AppError`].
#[derive(Debug, thiserror::Error)]
pub enum PollError {
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0} not found")]
    NotFound(Entity),

    #[error("storage unavailable: {0}")]
    StorageUnavailable(String),
}

pub type PollResult<T> = Result<T, PollError>;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug)]
pub enum AppError {
    StorageError(String),
    ValidationError(String),
    NotFound(String),
    BadRequest(String),
    InternalError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::StorageError(msg) => write!(f, "Storage error: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation error: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not found: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad request: {}", msg),
            AppError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            AppError::StorageError(msg) => {
                tracing::error!(error = %msg, "storage error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "STORAGE_ERROR",
                    "Storage operation failed".to_string(),
                )
            }
            AppError::ValidationError(msg) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg,
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg,
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                "BAD_REQUEST",
                msg,
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let error_response = ErrorResponse {
            error: error_type.to_string(),
            message,
            details: None,
        };

        (status, Json(error_response)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

impl From<PollError> for AppError {
    fn from(err: PollError) -> Self {
        match err {
            PollError::InvalidInput(msg) => AppError::ValidationError(msg),
            PollError::NotFound(entity) => AppError::NotFound(format!("{} not found", entity)),
            PollError::StorageUnavailable(msg) => AppError::StorageError(msg),
        }
    }
}

impl From<serde_json::Error> for PollError {
    fn from(err: serde_json::Error) -> Self {
        PollError::StorageUnavailable(format!("malformed document: {}", err))
    }
}

impl From<std::io::Error> for PollError {
    fn from(err: std::io::Error) -> Self {
        PollError::StorageUnavailable(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn poll_errors_map_to_distinct_statuses() {
        let cases = [
            (PollError::InvalidInput("bad".into()), StatusCode::BAD_REQUEST),
            (PollError::NotFound(Entity::Poll), StatusCode::NOT_FOUND),
            (PollError::NotFound(Entity::Option), StatusCode::NOT_FOUND),
            (
                PollError::StorageUnavailable("/srv/db.json: denied".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, status) in cases {
            let response = AppError::from(err).into_response();
            assert_eq!(response.status(), status);
        }
    }

    #[test]
    fn not_found_names_the_entity() {
        match AppError::from(PollError::NotFound(Entity::Option)) {
            AppError::NotFound(msg) => assert_eq!(msg, "Option not found"),
            other => panic!("unexpected {other:?}"),
        }
    }
}
