//! Application Layer
//!
//! Use cases for the journal domain.

pub mod body_measurement;
pub mod food_log;
pub mod statistics;
pub mod workout_log;

pub use body_measurement::BodyMeasurementUseCase;
pub use food_log::FoodLogUseCase;
pub use statistics::StatisticsUseCase;
pub use workout_log::WorkoutLogUseCase;
