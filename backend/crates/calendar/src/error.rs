//! Calendar Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type CalendarResult<T> = Result<T, CalendarError>;

#[derive(Debug, Error)]
pub enum CalendarError {
    /// title, eventDate, timeSlot or category absent on create
    #[error("Missing required fields")]
    MissingFields,

    #[error("Date is required")]
    DateRequired,

    #[error("{0}")]
    InvalidField(String),

    #[error("Event not found")]
    NotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CalendarError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalendarError::MissingFields
            | CalendarError::DateRequired
            | CalendarError::InvalidField(_) => ErrorKind::BadRequest,
            CalendarError::NotFound => ErrorKind::NotFound,
            CalendarError::Database(_) | CalendarError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CalendarError::Database(_) | CalendarError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CalendarError::Database(e) => tracing::error!(error = %e, "Calendar database error"),
            CalendarError::Internal(msg) => {
                tracing::error!(message = %msg, "Calendar internal error")
            }
            _ => tracing::debug!(error = %self, "Calendar request rejected"),
        }
    }
}

impl IntoResponse for CalendarError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<CalendarError> for AppError {
    fn from(err: CalendarError) -> Self {
        err.to_app_error()
    }
}
