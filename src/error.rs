//! Typed errors and HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::registry::EntityKind;

/// Message shared by every lookup that misses on the handler's own entity.
pub const RECORD_NOT_FOUND: &str = "Record with such id does not exist";

/// Message shared by the required-field and allowlist checks.
pub const FIELDS_SHOULD_EXIST: &str = "Inputted fields should exist";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing environment variable {0}")]
    Missing(&'static str),
    #[error("invalid value for {name}: '{value}'")]
    Invalid { name: &'static str, value: String },
}

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("{kind} {id} not found")]
    NotFound { kind: EntityKind, id: i64 },
    #[error("integrity violation: {0}")]
    Integrity(String),
    #[error("database: {0}")]
    Db(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        // SQLSTATE class 23: integrity constraint violation.
        if let sqlx::Error::Database(db) = &e {
            if db.code().map(|c| c.starts_with("23")).unwrap_or(false) {
                return StoreError::Integrity(db.message().to_string());
            }
        }
        StoreError::Db(e)
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    MissingFields(String),
    #[error("{}", FIELDS_SHOULD_EXIST)]
    UnknownField(String),
    #[error("{0}")]
    InvalidFormat(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    BadKeySet(String),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    PayloadTooLarge(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MissingFields(_)
            | AppError::UnknownField(_)
            | AppError::InvalidFormat(_)
            | AppError::NotFound(_)
            | AppError::BadKeySet(_)
            | AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::PayloadTooLarge(_) => (StatusCode::PAYLOAD_TOO_LARGE, self.to_string()),
            AppError::Store(StoreError::NotFound { .. }) => {
                (StatusCode::BAD_REQUEST, RECORD_NOT_FOUND.to_string())
            }
            AppError::Store(e) => {
                tracing::error!(error = %e, "store operation failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        if status.is_client_error() {
            tracing::debug!(error = ?self, "rejected request");
        }
        (status, Json(ErrorBody { error: message })).into_response()
    }
}
