//! Infrastructure Layer
//!
//! Database implementations.

pub mod postgres;

#[cfg(any(test, feature = "test-util"))]
pub mod memory;

pub use postgres::PgUserRepository;
