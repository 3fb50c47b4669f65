//! Meal Plan Use Case

use chrono::NaiveDate;
use std::sync::Arc;

use crate::application::config::AiConfig;
use crate::domain::json::extract_json;
use crate::domain::meal_plan::{MealPlan, MealPlanPreferences, PLAN_DAYS, parse_days, week_start};
use crate::domain::model::GenerativeModel;
use crate::error::{AiError, AiResult};

const MIN_TARGET_CALORIES: u32 = 800;
const MAX_TARGET_CALORIES: u32 = 6000;

pub struct MealPlanUseCase<M>
where
    M: GenerativeModel,
{
    model: Arc<M>,
    config: Arc<AiConfig>,
}

impl<M> MealPlanUseCase<M>
where
    M: GenerativeModel,
{
    pub fn new(model: Arc<M>, config: Arc<AiConfig>) -> Self {
        Self { model, config }
    }

    pub async fn execute(
        &self,
        preferences: MealPlanPreferences,
        today: NaiveDate,
    ) -> AiResult<MealPlan> {
        let target_calories = preferences
            .target_calories
            .unwrap_or(self.config.default_target_calories);
        if !(MIN_TARGET_CALORIES..=MAX_TARGET_CALORIES).contains(&target_calories) {
            return Err(AiError::InvalidRequest(format!(
                "targetCalories must be between {MIN_TARGET_CALORIES} and {MAX_TARGET_CALORIES}"
            )));
        }

        let prompt = build_prompt(&preferences, target_calories);
        let answer = self.model.generate(&prompt, None).await?;
        let value = extract_json(&answer)
            .ok_or_else(|| AiError::Upstream("meal plan answer contained no JSON".into()))?;
        let days = parse_days(&value, week_start(today))?;

        tracing::info!(target_calories, days = days.len(), "Meal plan generated");
        Ok(MealPlan {
            target_calories,
            days,
        })
    }
}

fn build_prompt(preferences: &MealPlanPreferences, target_calories: u32) -> String {
    let mut prompt = format!(
        "Create a {PLAN_DAYS}-day meal plan of about {target_calories} kcal per day. \
Answer with JSON only: an array of {PLAN_DAYS} objects, each with \"breakfast\", \"lunch\", \
\"snack\" and \"dinner\", and each meal {{\"name\": string, \"calories\": number, \
\"protein\": number, \"carbs\": number, \"fats\": number}} with macros in grams."
    );

    let extras = [
        ("Avoid these allergens", &preferences.allergies),
        ("Preferences", &preferences.preferences),
        ("Goal", &preferences.goal),
    ];
    for (label, value) in extras {
        if let Some(value) = value.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            prompt.push_str(&format!(" {label}: {value}."));
        }
    }
    prompt
}
