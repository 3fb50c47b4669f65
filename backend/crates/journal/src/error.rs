//! Journal Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldError},
    kind::ErrorKind,
};
use thiserror::Error;

pub type JournalResult<T> = Result<T, JournalError>;

#[derive(Debug, Error)]
pub enum JournalError {
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Malformed query parameter or date range
    #[error("{0}")]
    InvalidQuery(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl JournalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JournalError::Validation(_) | JournalError::InvalidQuery(_) => ErrorKind::BadRequest,
            JournalError::NotFound(_) => ErrorKind::NotFound,
            JournalError::Database(_) | JournalError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            JournalError::Validation(errors) => AppError::validation(errors.clone()),
            JournalError::Database(_) | JournalError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            JournalError::Database(e) => tracing::error!(error = %e, "Journal database error"),
            JournalError::Internal(msg) => tracing::error!(message = %msg, "Journal internal error"),
            _ => tracing::debug!(error = %self, "Journal request rejected"),
        }
    }
}

impl IntoResponse for JournalError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<JournalError> for AppError {
    fn from(err: JournalError) -> Self {
        err.to_app_error()
    }
}
