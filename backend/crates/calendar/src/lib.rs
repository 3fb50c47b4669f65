//! Calendar Backend Module
//!
//! Per-user calendar events (meals, activities, appointments) with a
//! date and a free-text time slot.
//!
//! Clean Architecture structure:
//! - `domain/` - Event entity, category, repository trait
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{CalendarError, CalendarResult};
pub use infra::postgres::PgCalendarRepository;
pub use presentation::router::calendar_router;
