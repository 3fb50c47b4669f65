//! Auth Error Types
//!
//! Auth-specific error variants that render through the unified
//! `kernel::error::AppError` body.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::{AppError, FieldError},
    kind::ErrorKind,
};
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Request body failed field validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// A single field carries an unusable value
    #[error("{0}")]
    InvalidField(String),

    #[error("Email already registered")]
    EmailTaken,

    /// Unknown email or wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Missing refresh token")]
    MissingRefreshToken,

    /// Bad signature, expired, or the user is gone
    #[error("Invalid refresh token")]
    InvalidRefreshToken,

    /// No identity could be resolved for a protected route
    #[error("Unauthorized")]
    Unauthorized,

    /// Identity resolved but the user row does not exist
    #[error("User not found")]
    UnknownUser,

    /// Profile lookup for an authenticated user found nothing
    #[error("User not found")]
    UserNotFound,

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get the ErrorKind for this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_) | AuthError::InvalidField(_) => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials
            | AuthError::MissingRefreshToken
            | AuthError::InvalidRefreshToken
            | AuthError::Unauthorized
            | AuthError::UnknownUser => ErrorKind::Unauthorized,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                ErrorKind::InternalServerError
            }
        }
    }

    /// Convert to AppError
    ///
    /// Server-side failures never leak their details to the client.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Validation(errors) => AppError::validation(errors.clone()),
            AuthError::Token(_) | AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Token(e) => {
                tracing::error!(error = %e, "Auth token encoding error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidRefreshToken => {
                tracing::warn!("Invalid refresh token presented");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        err.to_app_error()
    }
}
