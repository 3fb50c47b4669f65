//! In-memory journal repository for unit tests

use std::sync::Mutex;

use chrono::Utc;
use kernel::id::{BodyMeasurementId, FoodLogId, UserId, WorkoutLogId};

use crate::domain::entity::{
    body_measurement::{BodyMeasurement, NewBodyMeasurement},
    food_log::{FoodLog, NewFoodLog},
    workout_log::{NewWorkoutLog, WorkoutLog},
};
use crate::domain::repository::{
    BodyMeasurementRepository, FoodLogRepository, WorkoutLogRepository,
};
use crate::domain::value_object::date_range::TimeWindow;
use crate::error::JournalResult;

#[derive(Default)]
pub struct InMemoryJournalRepository {
    foods: Mutex<Vec<FoodLog>>,
    workouts: Mutex<Vec<WorkoutLog>>,
    measurements: Mutex<Vec<BodyMeasurement>>,
}

impl FoodLogRepository for InMemoryJournalRepository {
    async fn create_food_log(&self, e: &NewFoodLog) -> JournalResult<FoodLog> {
        let mut foods = self.foods.lock().unwrap();
        let created = FoodLog {
            id: FoodLogId::from_raw(foods.iter().map(|f| f.id.value()).max().unwrap_or(0) + 1),
            user_id: e.user_id,
            eaten_at: e.eaten_at,
            meal_type: e.meal_type,
            food_name: e.food_name.clone(),
            calories: e.calories,
            protein: e.protein,
            carbs: e.carbs,
            fat: e.fat,
            sugar: e.sugar,
            amount: e.amount.clone(),
            health_consideration: e.health_consideration.clone(),
            is_corrected: e.is_corrected,
            image_url: e.image_url.clone(),
            created_at: Utc::now(),
        };
        foods.push(created.clone());
        Ok(created)
    }

    async fn list_food_logs(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<FoodLog>> {
        let mut list: Vec<_> = self
            .foods
            .lock()
            .unwrap()
            .iter()
            .filter(|f| f.user_id == user_id && window.contains(f.eaten_at))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.eaten_at.cmp(&a.eaten_at));
        Ok(list)
    }

    async fn delete_food_log(&self, user_id: UserId, id: FoodLogId) -> JournalResult<bool> {
        let mut foods = self.foods.lock().unwrap();
        let before = foods.len();
        foods.retain(|f| !(f.id == id && f.user_id == user_id));
        Ok(foods.len() < before)
    }
}

impl WorkoutLogRepository for InMemoryJournalRepository {
    async fn create_workout_log(&self, e: &NewWorkoutLog) -> JournalResult<WorkoutLog> {
        let mut workouts = self.workouts.lock().unwrap();
        let created = WorkoutLog {
            id: WorkoutLogId::from_raw(
                workouts.iter().map(|w| w.id.value()).max().unwrap_or(0) + 1,
            ),
            user_id: e.user_id,
            completed_at: e.completed_at,
            exercise_name: e.exercise_name.clone(),
            duration_minutes: e.duration_minutes,
            calories_burned_estimated: e.calories_burned_estimated,
            is_ai_suggested: e.is_ai_suggested,
        };
        workouts.push(created.clone());
        Ok(created)
    }

    async fn list_workout_logs(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<WorkoutLog>> {
        let mut list: Vec<_> = self
            .workouts
            .lock()
            .unwrap()
            .iter()
            .filter(|w| w.user_id == user_id && window.contains(w.completed_at))
            .cloned()
            .collect();
        list.sort_by(|a, b| b.completed_at.cmp(&a.completed_at));
        Ok(list)
    }

    async fn delete_workout_log(&self, user_id: UserId, id: WorkoutLogId) -> JournalResult<bool> {
        let mut workouts = self.workouts.lock().unwrap();
        let before = workouts.len();
        workouts.retain(|w| !(w.id == id && w.user_id == user_id));
        Ok(workouts.len() < before)
    }
}

impl BodyMeasurementRepository for InMemoryJournalRepository {
    async fn upsert_measurement(&self, e: &NewBodyMeasurement) -> JournalResult<BodyMeasurement> {
        let mut rows = self.measurements.lock().unwrap();
        let existing = rows
            .iter()
            .position(|m| m.user_id == e.user_id && m.measured_on == e.measured_on);

        let previous = existing.map(|i| rows[i].clone());
        let row = BodyMeasurement {
            id: previous.as_ref().map_or(
                BodyMeasurementId::from_raw(rows.len() as i64 + 1),
                |p| p.id,
            ),
            user_id: e.user_id,
            measured_on: e.measured_on,
            weight_kg: e.weight_kg.unwrap_or_default(),
            neck_cm: e.neck_cm.or(previous.as_ref().and_then(|p| p.neck_cm)),
            waist_cm: e.waist_cm.or(previous.as_ref().and_then(|p| p.waist_cm)),
            hip_cm: e.hip_cm.or(previous.as_ref().and_then(|p| p.hip_cm)),
            biceps_cm: e.biceps_cm.or(previous.as_ref().and_then(|p| p.biceps_cm)),
            thigh_cm: e.thigh_cm.or(previous.as_ref().and_then(|p| p.thigh_cm)),
            created_at: previous.as_ref().map_or_else(Utc::now, |p| p.created_at),
        };

        match existing {
            Some(i) => rows[i] = row.clone(),
            None => rows.push(row.clone()),
        }
        Ok(row)
    }

    async fn list_measurements(&self, user_id: UserId) -> JournalResult<Vec<BodyMeasurement>> {
        let mut list: Vec<_> = self
            .measurements
            .lock()
            .unwrap()
            .iter()
            .filter(|m| m.user_id == user_id)
            .cloned()
            .collect();
        list.sort_by(|a, b| b.measured_on.cmp(&a.measured_on));
        Ok(list)
    }
}
