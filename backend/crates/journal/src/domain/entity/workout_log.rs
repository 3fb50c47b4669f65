//! Workout Log Entity

use chrono::{DateTime, Utc};
use kernel::error::app_error::FieldError;
use kernel::id::{UserId, WorkoutLogId};

/// Name used when the client sends none
pub const DEFAULT_EXERCISE_NAME: &str = "Workout";

#[derive(Debug, Clone, PartialEq)]
pub struct WorkoutLog {
    pub id: WorkoutLogId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    pub exercise_name: String,
    pub duration_minutes: i32,
    pub calories_burned_estimated: f64,
    pub is_ai_suggested: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorkoutLog {
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    pub exercise_name: String,
    pub duration_minutes: i32,
    pub calories_burned_estimated: f64,
    pub is_ai_suggested: bool,
}

impl NewWorkoutLog {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.duration_minutes < 0 {
            errors.push(FieldError::new(
                "durationMinutes",
                "durationMinutes must not be negative",
            ));
        }
        if self.calories_burned_estimated < 0.0 {
            errors.push(FieldError::new(
                "caloriesBurnedEstimated",
                "caloriesBurnedEstimated must not be negative",
            ));
        }
        errors
    }
}
