//! Domain Layer

pub mod entity;
pub mod repository;
pub mod statistics;
pub mod value_object;
