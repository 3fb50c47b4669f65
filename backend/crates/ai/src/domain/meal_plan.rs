//! Meal Plan
//!
//! A week of four meals a day. The model supplies the meals; dates and
//! totals are filled in here.

use chrono::{Datelike, Days, NaiveDate};
use serde::Serialize;
use serde_json::Value;

use crate::domain::food::number;
use crate::error::{AiError, AiResult};

pub const PLAN_DAYS: usize = 7;

const MEAL_SLOTS: [&str; 4] = ["breakfast", "lunch", "snack", "dinner"];

#[derive(Debug, Clone, Default)]
pub struct MealPlanPreferences {
    pub allergies: Option<String>,
    pub preferences: Option<String>,
    pub target_calories: Option<u32>,
    pub goal: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Meal {
    pub name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DayPlan {
    /// English weekday name
    pub day: String,
    pub date: NaiveDate,
    pub breakfast: Option<Meal>,
    pub lunch: Option<Meal>,
    pub snack: Option<Meal>,
    pub dinner: Option<Meal>,
    pub total_calories: f64,
    pub total_protein: f64,
}

impl DayPlan {
    fn meals(&self) -> impl Iterator<Item = &Meal> {
        [&self.breakfast, &self.lunch, &self.snack, &self.dinner]
            .into_iter()
            .flatten()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MealPlan {
    pub target_calories: u32,
    pub days: Vec<DayPlan>,
}

/// Monday of the week containing `today`
pub fn week_start(today: NaiveDate) -> NaiveDate {
    today - Days::new(u64::from(today.weekday().num_days_from_monday()))
}

/// Turn the model's answer into exactly [`PLAN_DAYS`] days starting at `start`
///
/// Accepts a bare array or an object wrapping it under `mealPlan`, `days`
/// or `plan`. Each day holds its meals under the slot names, or as a
/// `meals` array whose items carry a `type`.
pub fn parse_days(value: &Value, start: NaiveDate) -> AiResult<Vec<DayPlan>> {
    let items = match value {
        Value::Array(items) => items,
        Value::Object(map) => ["mealPlan", "days", "plan"]
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or_else(|| AiError::Upstream("meal plan has no days".into()))?,
        _ => return Err(AiError::Upstream("meal plan is not JSON".into())),
    };

    if items.len() < PLAN_DAYS {
        return Err(AiError::Upstream(format!(
            "meal plan has {} days, expected {PLAN_DAYS}",
            items.len()
        )));
    }

    items
        .iter()
        .take(PLAN_DAYS)
        .enumerate()
        .map(|(offset, item)| {
            let date = start
                .checked_add_days(Days::new(offset as u64))
                .ok_or_else(|| AiError::Internal("meal plan date overflow".into()))?;
            parse_day(item, date)
        })
        .collect()
}

fn parse_day(item: &Value, date: NaiveDate) -> AiResult<DayPlan> {
    let object = item
        .as_object()
        .ok_or_else(|| AiError::Upstream("meal plan day is not an object".into()))?;

    let mut slots: [Option<Meal>; 4] = Default::default();
    for (slot, name) in slots.iter_mut().zip(MEAL_SLOTS) {
        *slot = object.get(name).and_then(parse_meal);
    }
    if let Some(meals) = object.get("meals").and_then(Value::as_array) {
        for meal in meals {
            let kind = meal
                .get("type")
                .or_else(|| meal.get("mealType"))
                .and_then(Value::as_str)
                .map(str::to_ascii_lowercase);
            let index = kind.and_then(|k| MEAL_SLOTS.iter().position(|s| *s == k));
            if let Some(index) = index
                && slots[index].is_none()
            {
                slots[index] = parse_meal(meal);
            }
        }
    }

    let [breakfast, lunch, snack, dinner] = slots;
    let mut day = DayPlan {
        day: date.format("%A").to_string(),
        date,
        breakfast,
        lunch,
        snack,
        dinner,
        total_calories: 0.0,
        total_protein: 0.0,
    };

    if day.meals().next().is_none() {
        return Err(AiError::Upstream(format!("meal plan day {date} has no meals")));
    }
    day.total_calories = day.meals().map(|m| m.calories).sum();
    day.total_protein = day.meals().map(|m| m.protein).sum();
    Ok(day)
}

fn parse_meal(value: &Value) -> Option<Meal> {
    let object = value.as_object()?;
    let name = object
        .get("name")
        .or_else(|| object.get("foodName"))
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|n| !n.is_empty())?;

    Some(Meal {
        name: name.to_string(),
        calories: number(object.get("calories")),
        protein: number(object.get("protein")),
        carbs: number(object.get("carbs")),
        fats: number(object.get("fats").or_else(|| object.get("fat"))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn day(calories: [i64; 4]) -> Value {
        json!({
            "breakfast": {"name": "Oats", "calories": calories[0], "protein": 10},
            "lunch": {"name": "Rice", "calories": calories[1], "protein": 20},
            "snack": {"name": "Fruit", "calories": calories[2]},
            "dinner": {"name": "Fish", "calories": calories[3], "protein": 30},
            "totalCalories": 99999
        })
    }

    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 6).unwrap()
    }

    #[test]
    fn test_week_start() {
        let thursday = NaiveDate::from_ymd_opt(2024, 5, 9).unwrap();
        assert_eq!(week_start(thursday), monday());
        assert_eq!(week_start(monday()), monday());
    }

    #[test]
    fn test_parse_recomputes_totals_and_dates() {
        let plan = json!({ "mealPlan": vec![day([400, 600, 200, 500]); 8] });
        let days = parse_days(&plan, monday()).unwrap();

        assert_eq!(days.len(), PLAN_DAYS);
        assert_eq!(days[0].day, "Monday");
        assert_eq!(days[6].day, "Sunday");
        assert_eq!(days[6].date, NaiveDate::from_ymd_opt(2024, 5, 12).unwrap());
        assert_eq!(days[0].total_calories, 1700.0);
        assert_eq!(days[0].total_protein, 60.0);
    }

    #[test]
    fn test_parse_meals_array() {
        let item = json!({"meals": [
            {"type": "Dinner", "name": "Soup", "calories": 300},
            {"type": "dinner", "name": "Second dinner", "calories": 500},
            {"type": "brunch", "name": "Ignored", "calories": 900}
        ]});
        let days = parse_days(&Value::Array(vec![item; 7]), monday()).unwrap();
        assert_eq!(days[0].dinner.as_ref().unwrap().name, "Soup");
        assert!(days[0].breakfast.is_none());
        assert_eq!(days[0].total_calories, 300.0);
    }

    #[test]
    fn test_parse_rejects_short_or_empty_plans() {
        let short = Value::Array(vec![day([1, 1, 1, 1]); 6]);
        assert!(matches!(parse_days(&short, monday()), Err(AiError::Upstream(_))));

        let empty_days = Value::Array(vec![json!({}); 7]);
        assert!(parse_days(&empty_days, monday()).is_err());

        assert!(parse_days(&json!({"foo": []}), monday()).is_err());
    }

    #[test]
    fn test_serialized_shape() {
        let days = parse_days(&Value::Array(vec![day([1, 2, 3, 4]); 7]), monday()).unwrap();
        let value = serde_json::to_value(&days[0]).unwrap();
        assert_eq!(value["date"], "2024-05-06");
        assert_eq!(value["totalCalories"], 10.0);
        assert_eq!(value["breakfast"]["name"], "Oats");
    }
}
