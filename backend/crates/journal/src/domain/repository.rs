//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.

use kernel::id::{FoodLogId, UserId, WorkoutLogId};

use crate::domain::entity::{
    body_measurement::{BodyMeasurement, NewBodyMeasurement},
    food_log::{FoodLog, NewFoodLog},
    workout_log::{NewWorkoutLog, WorkoutLog},
};
use crate::domain::value_object::date_range::TimeWindow;
use crate::error::JournalResult;

/// Food log repository trait
#[trait_variant::make(FoodLogRepository: Send)]
pub trait LocalFoodLogRepository {
    async fn create_food_log(&self, entry: &NewFoodLog) -> JournalResult<FoodLog>;

    /// Entries eaten inside `window`, newest first
    async fn list_food_logs(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<FoodLog>>;

    /// Delete an entry owned by `user_id`; false when nothing matched
    async fn delete_food_log(&self, user_id: UserId, id: FoodLogId) -> JournalResult<bool>;
}

/// Workout log repository trait
#[trait_variant::make(WorkoutLogRepository: Send)]
pub trait LocalWorkoutLogRepository {
    async fn create_workout_log(&self, entry: &NewWorkoutLog) -> JournalResult<WorkoutLog>;

    /// Entries completed inside `window`, newest first
    async fn list_workout_logs(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<WorkoutLog>>;

    async fn delete_workout_log(&self, user_id: UserId, id: WorkoutLogId)
    -> JournalResult<bool>;
}

/// Body measurement repository trait
#[trait_variant::make(BodyMeasurementRepository: Send)]
pub trait LocalBodyMeasurementRepository {
    /// Insert or replace the row for `(user_id, measured_on)`
    async fn upsert_measurement(
        &self,
        entry: &NewBodyMeasurement,
    ) -> JournalResult<BodyMeasurement>;

    /// All rows for the user, newest day first
    async fn list_measurements(&self, user_id: UserId) -> JournalResult<Vec<BodyMeasurement>>;
}
