//! Domain Entities

pub mod body_measurement;
pub mod food_log;
pub mod workout_log;
