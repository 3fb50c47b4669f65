//! Food Log Use Cases

use std::sync::Arc;

use kernel::id::{FoodLogId, UserId};

use crate::domain::entity::food_log::{FoodLog, NewFoodLog};
use crate::domain::repository::FoodLogRepository;
use crate::domain::value_object::date_range::TimeWindow;
use crate::error::{JournalError, JournalResult};

pub struct FoodLogUseCase<R>
where
    R: FoodLogRepository,
{
    repo: Arc<R>,
}

impl<R> FoodLogUseCase<R>
where
    R: FoodLogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn list(&self, user_id: UserId, window: TimeWindow) -> JournalResult<Vec<FoodLog>> {
        self.repo.list_food_logs(user_id, window).await
    }

    pub async fn create(&self, mut entry: NewFoodLog) -> JournalResult<FoodLog> {
        let errors = entry.validate();
        if !errors.is_empty() {
            return Err(JournalError::Validation(errors));
        }
        entry.food_name = entry.food_name.trim().to_string();

        let created = self.repo.create_food_log(&entry).await?;

        tracing::info!(
            user_id = %created.user_id,
            food_log_id = %created.id,
            meal_type = %created.meal_type,
            "Food logged"
        );
        Ok(created)
    }

    pub async fn delete(&self, user_id: UserId, id: FoodLogId) -> JournalResult<()> {
        if !self.repo.delete_food_log(user_id, id).await? {
            return Err(JournalError::NotFound("Food log"));
        }
        tracing::info!(user_id = %user_id, food_log_id = %id, "Food log deleted");
        Ok(())
    }
}
