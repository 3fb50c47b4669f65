//! Journal Backend Module
//!
//! Daily tracking data owned by a user:
//! - food log entries (meals with macros)
//! - workout log entries
//! - body measurements (one row per user per UTC day)
//! - statistics aggregated per UTC day from the two logs
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, date ranges, aggregation, repository traits
//! - `application/` - Use cases
//! - `infra/` - Database implementations
//! - `presentation/` - HTTP handlers, DTOs, routers

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use error::{JournalError, JournalResult};
pub use infra::postgres::PgJournalRepository;
pub use presentation::router::{
    body_measurement_router, food_log_router, statistics_router, workout_log_router,
};
