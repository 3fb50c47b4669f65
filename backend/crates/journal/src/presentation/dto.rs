//! API DTOs (Data Transfer Objects)
//!
//! Request bodies accept camelCase plus the snake_case names older clients
//! send. Responses are camelCase.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::app_error::FieldError;
use kernel::id::{BodyMeasurementId, FoodLogId, UserId, WorkoutLogId};
use kernel::time::parse_instant;
use serde::{Deserialize, Serialize};

use crate::domain::entity::{
    body_measurement::{BodyMeasurement, NewBodyMeasurement},
    food_log::{FoodLog, NewFoodLog},
    workout_log::{DEFAULT_EXERCISE_NAME, NewWorkoutLog, WorkoutLog},
};
use crate::domain::value_object::meal_type::MealType;

/// Parse an optional client timestamp, defaulting to now
fn instant_or_now(
    field: &'static str,
    value: Option<&str>,
    errors: &mut Vec<FieldError>,
) -> DateTime<Utc> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Utc::now(),
        Some(v) => parse_instant(v).unwrap_or_else(|| {
            errors.push(FieldError::new(field, format!("{field} is not a valid date")));
            Utc::now()
        }),
    }
}

// ============================================================================
// Queries
// ============================================================================

/// `?start=YYYY-MM-DD&end=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// `?date=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DailyQuery {
    pub date: Option<String>,
}

/// `?startDate=YYYY-MM-DD&endDate=YYYY-MM-DD`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RangeQuery {
    #[serde(alias = "start_date")]
    pub start_date: Option<String>,
    #[serde(alias = "end_date")]
    pub end_date: Option<String>,
}

// ============================================================================
// Food Log
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateFoodLogRequest {
    #[serde(default, alias = "food_name")]
    pub food_name: Option<String>,
    #[serde(default, deserialize_with = "kernel::serde_ext::opt_f64")]
    pub calories: Option<f64>,
    #[serde(default, alias = "protein_g", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub protein: Option<f64>,
    #[serde(default, alias = "carbs_g", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub carbs: Option<f64>,
    #[serde(default, alias = "fat_g", alias = "fats", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub fat: Option<f64>,
    #[serde(default, deserialize_with = "kernel::serde_ext::opt_f64")]
    pub sugar: Option<f64>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default, alias = "meal_type")]
    pub meal_type: Option<String>,
    #[serde(default, alias = "eaten_at")]
    pub eaten_at: Option<String>,
    #[serde(default, alias = "health_consideration")]
    pub health_consideration: Option<String>,
    #[serde(default, alias = "is_corrected")]
    pub is_corrected: Option<bool>,
    #[serde(default, alias = "image_url")]
    pub image_url: Option<String>,
}

impl CreateFoodLogRequest {
    /// Apply defaults; parse errors are reported as field errors
    pub fn into_new(self, user_id: UserId) -> Result<NewFoodLog, Vec<FieldError>> {
        let mut errors = Vec::new();

        let meal_type = match self.meal_type.as_deref().map(str::trim) {
            None | Some("") => MealType::default(),
            Some(raw) => raw.parse::<MealType>().unwrap_or_else(|msg| {
                errors.push(FieldError::new("mealType", msg));
                MealType::default()
            }),
        };
        let eaten_at = instant_or_now("eatenAt", self.eaten_at.as_deref(), &mut errors);

        let entry = NewFoodLog {
            user_id,
            eaten_at,
            meal_type,
            food_name: self.food_name.unwrap_or_default(),
            calories: self.calories.unwrap_or(0.0),
            protein: self.protein.unwrap_or(0.0),
            carbs: self.carbs.unwrap_or(0.0),
            fat: self.fat.unwrap_or(0.0),
            sugar: self.sugar,
            amount: non_blank(self.amount),
            health_consideration: non_blank(self.health_consideration),
            is_corrected: self.is_corrected.unwrap_or(false),
            image_url: non_blank(self.image_url),
        };

        errors.extend(entry.validate());
        if errors.is_empty() { Ok(entry) } else { Err(errors) }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|s| s.trim().to_string()).filter(|s| !s.is_empty())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodLogResponse {
    pub id: FoodLogId,
    pub user_id: UserId,
    pub eaten_at: DateTime<Utc>,
    pub meal_type: MealType,
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fat: f64,
    pub sugar: Option<f64>,
    pub amount: Option<String>,
    pub health_consideration: Option<String>,
    pub is_corrected: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<FoodLog> for FoodLogResponse {
    fn from(f: FoodLog) -> Self {
        Self {
            id: f.id,
            user_id: f.user_id,
            eaten_at: f.eaten_at,
            meal_type: f.meal_type,
            food_name: f.food_name,
            calories: f.calories,
            protein: f.protein,
            carbs: f.carbs,
            fat: f.fat,
            sugar: f.sugar,
            amount: f.amount,
            health_consideration: f.health_consideration,
            is_corrected: f.is_corrected,
            image_url: f.image_url,
            created_at: f.created_at,
        }
    }
}

// ============================================================================
// Workout Log
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkoutLogRequest {
    #[serde(default, alias = "exercise_name")]
    pub exercise_name: Option<String>,
    #[serde(default, alias = "duration_minutes", deserialize_with = "kernel::serde_ext::opt_i32")]
    pub duration_minutes: Option<i32>,
    #[serde(
        default,
        alias = "calories_burned_estimated",
        deserialize_with = "kernel::serde_ext::opt_f64"
    )]
    pub calories_burned_estimated: Option<f64>,
    #[serde(default, alias = "completed_at")]
    pub completed_at: Option<String>,
    #[serde(default, alias = "is_ai_suggested")]
    pub is_ai_suggested: Option<bool>,
}

impl CreateWorkoutLogRequest {
    pub fn into_new(self, user_id: UserId) -> Result<NewWorkoutLog, Vec<FieldError>> {
        let mut errors = Vec::new();
        let completed_at =
            instant_or_now("completedAt", self.completed_at.as_deref(), &mut errors);

        let entry = NewWorkoutLog {
            user_id,
            completed_at,
            exercise_name: non_blank(self.exercise_name)
                .unwrap_or_else(|| DEFAULT_EXERCISE_NAME.to_string()),
            duration_minutes: self.duration_minutes.unwrap_or(0),
            calories_burned_estimated: self.calories_burned_estimated.unwrap_or(0.0),
            is_ai_suggested: self.is_ai_suggested.unwrap_or(false),
        };

        errors.extend(entry.validate());
        if errors.is_empty() { Ok(entry) } else { Err(errors) }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutLogResponse {
    pub id: WorkoutLogId,
    pub user_id: UserId,
    pub completed_at: DateTime<Utc>,
    pub exercise_name: String,
    pub duration_minutes: i32,
    pub calories_burned_estimated: f64,
    pub is_ai_suggested: bool,
}

impl From<WorkoutLog> for WorkoutLogResponse {
    fn from(w: WorkoutLog) -> Self {
        Self {
            id: w.id,
            user_id: w.user_id,
            completed_at: w.completed_at,
            exercise_name: w.exercise_name,
            duration_minutes: w.duration_minutes,
            calories_burned_estimated: w.calories_burned_estimated,
            is_ai_suggested: w.is_ai_suggested,
        }
    }
}

// ============================================================================
// Body Measurements
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurementRequest {
    #[serde(default, alias = "weight_kg", alias = "weight", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub weight_kg: Option<f64>,
    #[serde(default, alias = "neck_cm", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub neck_cm: Option<f64>,
    #[serde(default, alias = "waist_cm", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub waist_cm: Option<f64>,
    #[serde(default, alias = "hip_cm", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub hip_cm: Option<f64>,
    #[serde(default, alias = "biceps_cm", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub biceps_cm: Option<f64>,
    #[serde(default, alias = "thigh_cm", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub thigh_cm: Option<f64>,
}

impl BodyMeasurementRequest {
    /// Measurement for the current UTC day
    pub fn into_new(self, user_id: UserId, today: NaiveDate) -> NewBodyMeasurement {
        NewBodyMeasurement {
            user_id,
            measured_on: today,
            weight_kg: self.weight_kg,
            neck_cm: self.neck_cm,
            waist_cm: self.waist_cm,
            hip_cm: self.hip_cm,
            biceps_cm: self.biceps_cm,
            thigh_cm: self.thigh_cm,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BodyMeasurementResponse {
    pub id: BodyMeasurementId,
    pub user_id: UserId,
    pub measured_on: NaiveDate,
    pub weight_kg: f64,
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub biceps_cm: Option<f64>,
    pub thigh_cm: Option<f64>,
    pub created_at: DateTime<Utc>,
}

impl From<BodyMeasurement> for BodyMeasurementResponse {
    fn from(m: BodyMeasurement) -> Self {
        Self {
            id: m.id,
            user_id: m.user_id,
            measured_on: m.measured_on,
            weight_kg: m.weight_kg,
            neck_cm: m.neck_cm,
            waist_cm: m.waist_cm,
            hip_cm: m.hip_cm,
            biceps_cm: m.biceps_cm,
            thigh_cm: m.thigh_cm,
            created_at: m.created_at,
        }
    }
}
