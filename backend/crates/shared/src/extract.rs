//! Request extractors
//!
//! Drop-in replacements for `axum::Json`, `Path` and `Query` whose
//! rejections render as [`AppError`], so malformed input still gets the
//! `{"error": ...}` body.

use axum::extract::{FromRequest, FromRequestParts};

use crate::error::app_error::AppError;

/// JSON request body
#[derive(Debug, Clone, Copy, Default, FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct AppJson<T>(pub T);

/// Path parameters
#[derive(Debug, Clone, Copy, FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct AppPath<T>(pub T);

/// Query string
#[derive(Debug, Clone, Copy, Default, FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(AppError))]
pub struct AppQuery<T>(pub T);
