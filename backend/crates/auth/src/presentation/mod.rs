//! Presentation Layer
//!
//! HTTP handlers, DTOs, router, and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AuthAppState;
pub use middleware::{
    AttachedUser, AuthMiddlewareState, CurrentUser, UserOrDefault, attach_user_if_present,
    require_auth,
};
pub use router::auth_router;
