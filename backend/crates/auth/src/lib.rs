//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - User entity, health metrics, repository trait
//! - `application/` - Use cases, JWT token service, configuration
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router, middleware
//!
//! ## Features
//! - Register / login with email + password
//! - Short-lived access JWT plus long-lived refresh JWT (also set as an
//!   HttpOnly cookie)
//! - Profile and body measurement updates
//!
//! ## Identity resolution
//! `attach_user_if_present` decodes a bearer token on every request and
//! never rejects. `require_auth` turns the attached identity into a
//! [`presentation::middleware::CurrentUser`], falling back to the
//! configured default user when guest mode is enabled.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::postgres::PgUserRepository;
pub use presentation::middleware::{
    AuthMiddlewareState, CurrentUser, UserOrDefault, attach_user_if_present, require_auth,
};
pub use presentation::router::auth_router;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
