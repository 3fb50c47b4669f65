//! PostgreSQL Repository Implementations

use chrono::{DateTime, NaiveDate, Utc};
use kernel::id::{BodyMeasurementId, FoodLogId, UserId, WorkoutLogId};
use sqlx::PgPool;

use crate::domain::entity::{
    body_measurement::{BodyMeasurement, NewBodyMeasurement},
    food_log::{FoodLog, NewFoodLog},
    workout_log::{NewWorkoutLog, WorkoutLog},
};
use crate::domain::repository::{
    BodyMeasurementRepository, FoodLogRepository, WorkoutLogRepository,
};
use crate::domain::value_object::date_range::TimeWindow;
use crate::domain::value_object::meal_type::MealType;
use crate::error::{JournalError, JournalResult};

/// PostgreSQL-backed journal repository
#[derive(Clone)]
pub struct PgJournalRepository {
    pool: PgPool,
}

impl PgJournalRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Food Log Repository Implementation
// ============================================================================

const FOOD_LOG_COLUMNS: &str = r#"
    food_log_id,
    user_id,
    eaten_at,
    meal_type,
    food_name,
    calories,
    protein,
    carbs,
    fat,
    sugar,
    amount,
    health_consideration,
    is_corrected,
    image_url,
    created_at
"#;

impl FoodLogRepository for PgJournalRepository {
    async fn create_food_log(&self, entry: &NewFoodLog) -> JournalResult<FoodLog> {
        let sql = format!(
            r#"
            INSERT INTO food_logs (
                user_id,
                eaten_at,
                meal_type,
                food_name,
                calories,
                protein,
                carbs,
                fat,
                sugar,
                amount,
                health_consideration,
                is_corrected,
                image_url
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {FOOD_LOG_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, FoodLogRow>(&sql)
            .bind(entry.user_id.value())
            .bind(entry.eaten_at)
            .bind(entry.meal_type.as_str())
            .bind(&entry.food_name)
            .bind(entry.calories)
            .bind(entry.protein)
            .bind(entry.carbs)
            .bind(entry.fat)
            .bind(entry.sugar)
            .bind(&entry.amount)
            .bind(&entry.health_consideration)
            .bind(entry.is_corrected)
            .bind(&entry.image_url)
            .fetch_one(&self.pool)
            .await?;

        row.into_entity()
    }

    async fn list_food_logs(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<FoodLog>> {
        let sql = format!(
            r#"
            SELECT {FOOD_LOG_COLUMNS}
            FROM food_logs
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR eaten_at >= $2)
              AND ($3::timestamptz IS NULL OR eaten_at < $3)
            ORDER BY eaten_at DESC, food_log_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, FoodLogRow>(&sql)
            .bind(user_id.value())
            .bind(window.from)
            .bind(window.until)
            .fetch_all(&self.pool)
            .await?;

        rows.into_iter().map(FoodLogRow::into_entity).collect()
    }

    async fn delete_food_log(&self, user_id: UserId, id: FoodLogId) -> JournalResult<bool> {
        let deleted = sqlx::query("DELETE FROM food_logs WHERE food_log_id = $1 AND user_id = $2")
            .bind(id.value())
            .bind(user_id.value())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Workout Log Repository Implementation
// ============================================================================

const WORKOUT_LOG_COLUMNS: &str = r#"
    workout_log_id,
    user_id,
    completed_at,
    exercise_name,
    duration_minutes,
    calories_burned_estimated,
    is_ai_suggested
"#;

impl WorkoutLogRepository for PgJournalRepository {
    async fn create_workout_log(&self, entry: &NewWorkoutLog) -> JournalResult<WorkoutLog> {
        let sql = format!(
            r#"
            INSERT INTO workout_logs (
                user_id,
                completed_at,
                exercise_name,
                duration_minutes,
                calories_burned_estimated,
                is_ai_suggested
            ) VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING {WORKOUT_LOG_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, WorkoutLogRow>(&sql)
            .bind(entry.user_id.value())
            .bind(entry.completed_at)
            .bind(&entry.exercise_name)
            .bind(entry.duration_minutes)
            .bind(entry.calories_burned_estimated)
            .bind(entry.is_ai_suggested)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn list_workout_logs(
        &self,
        user_id: UserId,
        window: TimeWindow,
    ) -> JournalResult<Vec<WorkoutLog>> {
        let sql = format!(
            r#"
            SELECT {WORKOUT_LOG_COLUMNS}
            FROM workout_logs
            WHERE user_id = $1
              AND ($2::timestamptz IS NULL OR completed_at >= $2)
              AND ($3::timestamptz IS NULL OR completed_at < $3)
            ORDER BY completed_at DESC, workout_log_id DESC
            "#
        );

        let rows = sqlx::query_as::<_, WorkoutLogRow>(&sql)
            .bind(user_id.value())
            .bind(window.from)
            .bind(window.until)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn delete_workout_log(
        &self,
        user_id: UserId,
        id: WorkoutLogId,
    ) -> JournalResult<bool> {
        let deleted =
            sqlx::query("DELETE FROM workout_logs WHERE workout_log_id = $1 AND user_id = $2")
                .bind(id.value())
                .bind(user_id.value())
                .execute(&self.pool)
                .await?
                .rows_affected();

        Ok(deleted > 0)
    }
}

// ============================================================================
// Body Measurement Repository Implementation
// ============================================================================

const MEASUREMENT_COLUMNS: &str = r#"
    body_measurement_id,
    user_id,
    measured_on,
    weight_kg,
    neck_cm,
    waist_cm,
    hip_cm,
    biceps_cm,
    thigh_cm,
    created_at
"#;

impl BodyMeasurementRepository for PgJournalRepository {
    async fn upsert_measurement(
        &self,
        entry: &NewBodyMeasurement,
    ) -> JournalResult<BodyMeasurement> {
        let weight_kg = entry
            .weight_kg
            .ok_or_else(|| JournalError::Internal("weight_kg missing after validation".into()))?;

        let sql = format!(
            r#"
            INSERT INTO body_measurements (
                user_id,
                measured_on,
                weight_kg,
                neck_cm,
                waist_cm,
                hip_cm,
                biceps_cm,
                thigh_cm
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (user_id, measured_on) DO UPDATE SET
                weight_kg = EXCLUDED.weight_kg,
                neck_cm = COALESCE(EXCLUDED.neck_cm, body_measurements.neck_cm),
                waist_cm = COALESCE(EXCLUDED.waist_cm, body_measurements.waist_cm),
                hip_cm = COALESCE(EXCLUDED.hip_cm, body_measurements.hip_cm),
                biceps_cm = COALESCE(EXCLUDED.biceps_cm, body_measurements.biceps_cm),
                thigh_cm = COALESCE(EXCLUDED.thigh_cm, body_measurements.thigh_cm)
            RETURNING {MEASUREMENT_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, BodyMeasurementRow>(&sql)
            .bind(entry.user_id.value())
            .bind(entry.measured_on)
            .bind(weight_kg)
            .bind(entry.neck_cm)
            .bind(entry.waist_cm)
            .bind(entry.hip_cm)
            .bind(entry.biceps_cm)
            .bind(entry.thigh_cm)
            .fetch_one(&self.pool)
            .await?;

        Ok(row.into())
    }

    async fn list_measurements(&self, user_id: UserId) -> JournalResult<Vec<BodyMeasurement>> {
        let sql = format!(
            r#"
            SELECT {MEASUREMENT_COLUMNS}
            FROM body_measurements
            WHERE user_id = $1
            ORDER BY measured_on DESC
            "#
        );

        let rows = sqlx::query_as::<_, BodyMeasurementRow>(&sql)
            .bind(user_id.value())
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(Into::into).collect())
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct FoodLogRow {
    food_log_id: i64,
    user_id: i64,
    eaten_at: DateTime<Utc>,
    meal_type: String,
    food_name: String,
    calories: f64,
    protein: f64,
    carbs: f64,
    fat: f64,
    sugar: Option<f64>,
    amount: Option<String>,
    health_consideration: Option<String>,
    is_corrected: bool,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl FoodLogRow {
    fn into_entity(self) -> JournalResult<FoodLog> {
        let meal_type = self
            .meal_type
            .parse::<MealType>()
            .map_err(|e| JournalError::Internal(format!("Invalid meal_type: {}", e)))?;

        Ok(FoodLog {
            id: FoodLogId::from_raw(self.food_log_id),
            user_id: UserId::from_raw(self.user_id),
            eaten_at: self.eaten_at,
            meal_type,
            food_name: self.food_name,
            calories: self.calories,
            protein: self.protein,
            carbs: self.carbs,
            fat: self.fat,
            sugar: self.sugar,
            amount: self.amount,
            health_consideration: self.health_consideration,
            is_corrected: self.is_corrected,
            image_url: self.image_url,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct WorkoutLogRow {
    workout_log_id: i64,
    user_id: i64,
    completed_at: DateTime<Utc>,
    exercise_name: String,
    duration_minutes: i32,
    calories_burned_estimated: f64,
    is_ai_suggested: bool,
}

impl From<WorkoutLogRow> for WorkoutLog {
    fn from(row: WorkoutLogRow) -> Self {
        Self {
            id: WorkoutLogId::from_raw(row.workout_log_id),
            user_id: UserId::from_raw(row.user_id),
            completed_at: row.completed_at,
            exercise_name: row.exercise_name,
            duration_minutes: row.duration_minutes,
            calories_burned_estimated: row.calories_burned_estimated,
            is_ai_suggested: row.is_ai_suggested,
        }
    }
}

#[derive(sqlx::FromRow)]
struct BodyMeasurementRow {
    body_measurement_id: i64,
    user_id: i64,
    measured_on: NaiveDate,
    weight_kg: f64,
    neck_cm: Option<f64>,
    waist_cm: Option<f64>,
    hip_cm: Option<f64>,
    biceps_cm: Option<f64>,
    thigh_cm: Option<f64>,
    created_at: DateTime<Utc>,
}

impl From<BodyMeasurementRow> for BodyMeasurement {
    fn from(row: BodyMeasurementRow) -> Self {
        Self {
            id: BodyMeasurementId::from_raw(row.body_measurement_id),
            user_id: UserId::from_raw(row.user_id),
            measured_on: row.measured_on,
            weight_kg: row.weight_kg,
            neck_cm: row.neck_cm,
            waist_cm: row.waist_cm,
            hip_cm: row.hip_cm,
            biceps_cm: row.biceps_cm,
            thigh_cm: row.thigh_cm,
            created_at: row.created_at,
        }
    }
}
