//! AI Error Types

use axum::http::{HeaderValue, header};
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use std::time::Duration;
use thiserror::Error;

pub type AiResult<T> = Result<T, AiError>;

#[derive(Debug, Error)]
pub enum AiError {
    #[error("{0}")]
    InvalidImage(String),

    #[error("{0}")]
    InvalidRequest(String),

    /// Our own per-client limit
    #[error("Too many requests, please try again later")]
    RateLimited { retry_after: Duration },

    /// Upstream answered 429
    #[error("AI service is busy, please retry shortly")]
    UpstreamBusy,

    /// Upstream failed or answered with something unusable
    #[error("AI service error: {0}")]
    Upstream(String),

    #[error("AI service timed out")]
    Timeout,

    #[error("Image not found")]
    ImageNotFound,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AiError::InvalidImage(_) | AiError::InvalidRequest(_) => ErrorKind::BadRequest,
            AiError::RateLimited { .. } | AiError::UpstreamBusy => ErrorKind::TooManyRequests,
            AiError::Upstream(_) => ErrorKind::BadGateway,
            AiError::Timeout => ErrorKind::GatewayTimeout,
            AiError::ImageNotFound => ErrorKind::NotFound,
            AiError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            AiError::Upstream(_) => AppError::bad_gateway("AI service returned an unusable response"),
            AiError::Internal(_) => AppError::internal("Internal server error"),
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AiError::Internal(msg) => tracing::error!(message = %msg, "AI internal error"),
            AiError::Upstream(msg) => tracing::warn!(detail = %msg, "AI upstream failure"),
            AiError::UpstreamBusy | AiError::Timeout => tracing::warn!(error = %self, "AI upstream unavailable"),
            _ => tracing::debug!(error = %self, "AI request rejected"),
        }
    }
}

impl IntoResponse for AiError {
    fn into_response(self) -> Response {
        self.log();
        let mut response = self.to_app_error().into_response();
        if let AiError::RateLimited { retry_after } = &self {
            let secs = (retry_after.as_secs() + u64::from(retry_after.subsec_nanos() > 0)).max(1);
            if let Ok(value) = HeaderValue::from_str(&secs.to_string()) {
                response.headers_mut().insert(header::RETRY_AFTER, value);
            }
        }
        response
    }
}

impl From<AiError> for AppError {
    fn from(err: AiError) -> Self {
        err.to_app_error()
    }
}
