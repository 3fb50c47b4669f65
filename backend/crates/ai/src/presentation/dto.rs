//! API DTOs (Data Transfer Objects)

use serde::{Deserialize, Serialize};

use crate::application::RecognizedFood;
use crate::domain::meal_plan::{DayPlan, MealPlan, MealPlanPreferences};
use crate::error::{AiError, AiResult};

/// `{success: true, data: ...}`
#[derive(Debug, Serialize)]
pub struct SuccessResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognizeFoodRequest {
    #[serde(default, alias = "base64_image", alias = "image")]
    pub base64_image: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecognitionData {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub portion_size: String,
    pub confidence: f64,
    pub image_url: String,
}

impl From<RecognizedFood> for FoodRecognitionData {
    fn from(r: RecognizedFood) -> Self {
        Self {
            food_name: r.food.food_name,
            calories: r.food.calories,
            protein: r.food.protein,
            carbs: r.food.carbs,
            fats: r.food.fats,
            portion_size: r.food.portion_size,
            confidence: r.food.confidence,
            image_url: format!("/temp-image/{}", r.image_id),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanRequest {
    #[serde(default)]
    pub allergies: Option<String>,
    #[serde(default)]
    pub preferences: Option<String>,
    #[serde(
        default,
        alias = "target_calories",
        deserialize_with = "kernel::serde_ext::opt_i32"
    )]
    pub target_calories: Option<i32>,
    #[serde(default)]
    pub goal: Option<String>,
}

impl MealPlanRequest {
    pub fn into_preferences(self) -> AiResult<MealPlanPreferences> {
        let target_calories = self
            .target_calories
            .map(u32::try_from)
            .transpose()
            .map_err(|_| AiError::InvalidRequest("targetCalories must be positive".into()))?;

        Ok(MealPlanPreferences {
            allergies: self.allergies,
            preferences: self.preferences,
            target_calories,
            goal: self.goal,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MealPlanResponse {
    pub success: bool,
    /// Always `"ai"`; the client treats anything else as a canned plan
    pub source: &'static str,
    pub target_calories: u32,
    pub meal_plan: Vec<DayPlan>,
}

impl From<MealPlan> for MealPlanResponse {
    fn from(plan: MealPlan) -> Self {
        Self {
            success: true,
            source: "ai",
            target_calories: plan.target_calories,
            meal_plan: plan.days,
        }
    }
}
