//! Error conversions - From implementations for common error types

use super::app_error::AppError;

impl From<std::num::ParseIntError> for AppError {
    fn from(err: std::num::ParseIntError) -> Self {
        AppError::bad_request("Invalid integer format").with_source(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_syntax() || err.is_data() {
            AppError::bad_request(format!("JSON parse error: {}", err)).with_source(err)
        } else {
            AppError::internal("JSON serialization error").with_source(err)
        }
    }
}

// ============================================================================
// SQLx conversions (feature-gated)
// ============================================================================

#[cfg(feature = "sqlx")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::not_found("Record not found").with_source(err),
            sqlx::Error::PoolTimedOut => {
                AppError::service_unavailable("Database connection pool exhausted").with_source(err)
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                let app_err = match db_err.code().as_deref() {
                    Some("23505") => AppError::conflict("Duplicate key value"),
                    Some("23503") => AppError::conflict("Foreign key violation"),
                    Some("23502") => AppError::bad_request("Required field is null"),
                    Some("23514") => AppError::bad_request("Check constraint violation"),
                    Some("53000" | "53100" | "53200" | "53300") => {
                        AppError::service_unavailable("Database resource exhausted")
                    }
                    Some("57000" | "57014" | "57P01" | "57P02" | "57P03") => {
                        AppError::service_unavailable("Database unavailable")
                    }
                    _ => AppError::internal("Database error"),
                };
                app_err.with_source(err)
            }
            sqlx::Error::Io(_) => {
                AppError::service_unavailable("Database connection error").with_source(err)
            }
            _ => AppError::internal("Database error").with_source(err),
        }
    }
}

// ============================================================================
// Axum conversions (feature-gated)
// ============================================================================

#[cfg(feature = "axum")]
mod rejections {
    use super::AppError;
    use crate::error::kind::ErrorKind;
    use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
    use axum::http::StatusCode;

    impl From<JsonRejection> for AppError {
        fn from(rejection: JsonRejection) -> Self {
            let error = match &rejection {
                _ if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                    AppError::new(ErrorKind::PayloadTooLarge, "Request body too large")
                }
                JsonRejection::JsonSyntaxError(_) => AppError::bad_request("Malformed JSON body"),
                JsonRejection::MissingJsonContentType(_) => {
                    AppError::bad_request("Expected Content-Type: application/json")
                }
                _ if rejection.status().is_server_error() => {
                    AppError::internal("Failed to read request body")
                }
                _ => AppError::bad_request(rejection.body_text()),
            };
            error.with_source(rejection)
        }
    }

    impl From<PathRejection> for AppError {
        fn from(rejection: PathRejection) -> Self {
            let error = if rejection.status().is_server_error() {
                AppError::internal("Failed to read path parameters")
            } else {
                AppError::bad_request("Invalid path parameter")
            };
            error.with_source(rejection)
        }
    }

    impl From<QueryRejection> for AppError {
        fn from(rejection: QueryRejection) -> Self {
            AppError::bad_request(rejection.body_text()).with_source(rejection)
        }
    }
}

#[cfg(feature = "axum")]
impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        use axum::Json;
        use axum::http::StatusCode;

        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(self.body())).into_response()
    }
}
