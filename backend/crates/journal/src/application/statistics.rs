//! Statistics Use Case
//!
//! Fetches both logs for a day range and hands them to the pure aggregator.

use std::sync::Arc;

use chrono::NaiveDate;
use kernel::id::UserId;

use crate::domain::repository::{FoodLogRepository, WorkoutLogRepository};
use crate::domain::statistics::{DailyStatistics, aggregate};
use crate::domain::value_object::date_range::DateRange;
use crate::error::{JournalError, JournalResult};

pub struct StatisticsUseCase<R>
where
    R: FoodLogRepository + WorkoutLogRepository,
{
    repo: Arc<R>,
}

impl<R> StatisticsUseCase<R>
where
    R: FoodLogRepository + WorkoutLogRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn range(
        &self,
        user_id: UserId,
        range: DateRange,
    ) -> JournalResult<Vec<DailyStatistics>> {
        let window = range.window();
        let foods = self.repo.list_food_logs(user_id, window).await?;
        let workouts = self.repo.list_workout_logs(user_id, window).await?;

        Ok(aggregate(&range, &foods, &workouts))
    }

    pub async fn daily(&self, user_id: UserId, day: NaiveDate) -> JournalResult<DailyStatistics> {
        self.range(user_id, DateRange::single(day))
            .await?
            .pop()
            .ok_or_else(|| JournalError::Internal("empty single-day aggregate".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::food_log::NewFoodLog;
    use crate::domain::entity::workout_log::NewWorkoutLog;
    use crate::domain::value_object::date_range::parse_day;
    use crate::domain::value_object::meal_type::MealType;
    use crate::infra::memory::InMemoryJournalRepository;

    #[tokio::test]
    async fn test_daily_statistics_only_counts_own_entries() {
        let repo = Arc::new(InMemoryJournalRepository::default());
        for (user, calories) in [(1, 400.0), (1, 250.0), (2, 999.0)] {
            repo.create_food_log(&NewFoodLog {
                user_id: UserId::from_raw(user),
                eaten_at: "2024-03-10T12:00:00Z".parse().unwrap(),
                meal_type: MealType::Lunch,
                food_name: "Bún chả".into(),
                calories,
                protein: 20.0,
                carbs: 50.0,
                fat: 12.0,
                sugar: None,
                amount: None,
                health_consideration: None,
                is_corrected: false,
                image_url: None,
            })
            .await
            .unwrap();
        }
        repo.create_workout_log(&NewWorkoutLog {
            user_id: UserId::from_raw(1),
            completed_at: "2024-03-10T06:30:00Z".parse().unwrap(),
            exercise_name: "Swim".into(),
            duration_minutes: 40,
            calories_burned_estimated: 300.0,
            is_ai_suggested: true,
        })
        .await
        .unwrap();

        let stats = StatisticsUseCase::new(repo)
            .daily(UserId::from_raw(1), parse_day("2024-03-10").unwrap())
            .await
            .unwrap();

        assert_eq!(stats.total_calories, 650.0);
        assert_eq!(stats.meals_count, 2);
        assert_eq!(stats.calories_burned, 300.0);
        assert_eq!(stats.exercise_duration, 40);
    }
}
