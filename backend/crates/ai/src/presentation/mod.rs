//! Presentation Layer
//!
//! HTTP handlers, DTOs, rate limiting, and routers.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;

pub use handlers::AiAppState;
pub use middleware::RateLimitState;
