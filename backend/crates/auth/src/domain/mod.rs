//! Domain Layer
//!
//! Core business logic and domain models.

pub mod entity;
pub mod health_metrics;
pub mod repository;
pub mod value_object;
