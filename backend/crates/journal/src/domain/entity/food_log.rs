//! Food Log Entity

use chrono::{DateTime, Utc};
use kernel::error::app_error::FieldError;
use kernel::id::{FoodLogId, UserId};

use crate::domain::value_object::meal_type::MealType;

/// One eaten food item
#[derive(Debug, Clone, PartialEq)]
pub struct FoodLog {
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
    /// Free-text portion, e.g. "1 bowl"
    pub amount: Option<String>,
    pub health_consideration: Option<String>,
    /// Set when the user edited an AI-recognised value
    pub is_corrected: bool,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Validated food log entry ready for insert
#[derive(Debug, Clone, PartialEq)]
pub struct NewFoodLog {
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
}

impl NewFoodLog {
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if self.food_name.trim().is_empty() {
            errors.push(FieldError::new("foodName", "foodName is required"));
        }
        for (field, value) in [
            ("calories", Some(self.calories)),
            ("protein", Some(self.protein)),
            ("carbs", Some(self.carbs)),
            ("fat", Some(self.fat)),
            ("sugar", self.sugar),
        ] {
            if value.is_some_and(|v| v < 0.0) {
                errors.push(FieldError::new(field, format!("{field} must not be negative")));
            }
        }
        errors
    }
}
