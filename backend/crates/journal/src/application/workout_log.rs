//! Workout Log Use Cases

use std::sync::Arc;

use kernel::id::{UserId, WorkoutLogId};

use crate::domain::entity::workout_log::{NewWorkoutLog, WorkoutLog};
use crate::domain::repository::WorkoutLogRepository;
use crate::domain::value_object::date_range::TimeWindow;
use crate::error::{JournalError, JournalResult};

pub struct WorkoutLogUseCase<R>
where
    R: WorkoutLogRepository,
{
    repo: Arc<R>,
}

impl<R> WorkoutLogUseCase<R>
where
    R: WorkoutLogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<WorkoutLog>> {
        self.repo.list_workout_logs(user_id, window).await
    }

    pub async fn create(&self, entry: NewWorkoutLog) -> JournalResult<WorkoutLog> {
        let errors = entry.validate();
        if !errors.is_empty() {
            return Err(JournalError::Validation(errors));
        }

        let created = self.repo.create_workout_log(&entry).await?;

        tracing::info!(
            user_id = %created.user_id,
            workout_log_id = %created.id,
            duration_minutes = created.duration_minutes,
            "Workout logged"
        );
        Ok(created)
    }

    pub async fn delete(&self, user_id: UserId, id: WorkoutLogId) -> JournalResult<()> {
        if !self.repo.delete_workout_log(user_id, id).await? {
            return Err(JournalError::NotFound("Workout log"));
        }
        tracing::info!(user_id = %user_id, workout_log_id = %id, "Workout log deleted");
        Ok(())
    }
}
