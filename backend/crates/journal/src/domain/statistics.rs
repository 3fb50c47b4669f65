//! Daily Statistics
//!
//! Pure aggregation of food and workout logs into per-day totals.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::domain::entity::{food_log::FoodLog, workout_log::WorkoutLog};
use crate::domain::value_object::date_range::DateRange;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyStatistics {
    pub date: NaiveDate,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fat: f64,
    pub calories_burned: f64,
    pub exercise_duration: i64,
    pub meals_count: u32,
    pub workouts_count: u32,
}

impl DailyStatistics {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            total_calories: 0.0,
            total_protein: 0.0,
            total_carbs: 0.0,
            total_fat: 0.0,
            calories_burned: 0.0,
            exercise_duration: 0,
            meals_count: 0,
            workouts_count: 0,
        }
    }
}

/// One entry per day of `range`, zero-filled; entries outside it are ignored
pub fn aggregate(
    range: &DateRange,
    foods: &[FoodLog],
    workouts: &[WorkoutLog],
) -> Vec<DailyStatistics> {
    let mut days: BTreeMap<NaiveDate, DailyStatistics> = range
        .days()
        .map(|d| (d, DailyStatistics::empty(d)))
        .collect();

    for food in foods {
        if let Some(day) = days.get_mut(&food.eaten_at.date_naive()) {
            day.total_calories += food.calories;
            day.total_protein += food.protein;
            day.total_carbs += food.carbs;
            day.total_fat += food.fat;
            day.meals_count += 1;
        }
    }

    for workout in workouts {
        if let Some(day) = days.get_mut(&workout.completed_at.date_naive()) {
            day.calories_burned += workout.calories_burned_estimated;
            day.exercise_duration += i64::from(workout.duration_minutes);
            day.workouts_count += 1;
        }
    }

    days.into_values().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::date_range::parse_day;
    use crate::domain::value_object::meal_type::MealType;
    use chrono::{DateTime, Utc};
    use kernel::id::{FoodLogId, UserId, WorkoutLogId};

    fn at(s: &str) -> DateTime<Utc> {
        s.parse().unwrap()
    }

    fn food(id: i64, eaten_at: &str, calories: f64) -> FoodLog {
        FoodLog {
            id: FoodLogId::from_raw(id),
            user_id: UserId::from_raw(1),
            eaten_at: at(eaten_at),
            meal_type: MealType::Lunch,
            food_name: "Rice".into(),
            calories,
            protein: 4.0,
            carbs: 40.0,
            fat: 1.0,
            sugar: None,
            amount: None,
            health_consideration: None,
            is_corrected: false,
            image_url: None,
            created_at: at(eaten_at),
        }
    }

    fn workout(id: i64, completed_at: &str, minutes: i32, burned: f64) -> WorkoutLog {
        WorkoutLog {
            id: WorkoutLogId::from_raw(id),
            user_id: UserId::from_raw(1),
            completed_at: at(completed_at),
            exercise_name: "Run".into(),
            duration_minutes: minutes,
            calories_burned_estimated: burned,
            is_ai_suggested: false,
        }
    }

    #[test]
    fn test_zero_filled_days() {
        let range = DateRange::new(parse_day("2024-01-01").unwrap(), parse_day("2024-01-03").unwrap())
            .unwrap();
        let stats = aggregate(&range, &[], &[]);
        assert_eq!(stats.len(), 3);
        assert!(stats.iter().all(|s| s.meals_count == 0 && s.total_calories == 0.0));
        assert_eq!(stats[2].date.to_string(), "2024-01-03");
    }

    #[test]
    fn test_totals_by_utc_day() {
        let range = DateRange::new(parse_day("2024-01-01").unwrap(), parse_day("2024-01-02").unwrap())
            .unwrap();
        let foods = [
            food(1, "2024-01-01T07:00:00Z", 300.0),
            food(2, "2024-01-01T23:59:59Z", 200.0),
            food(3, "2024-01-02T00:00:00Z", 100.0),
            food(4, "2024-01-03T12:00:00Z", 999.0),
        ];
        let workouts = [
            workout(1, "2024-01-02T18:00:00Z", 30, 250.0),
            workout(2, "2024-01-02T19:00:00Z", 15, 100.0),
        ];

        let stats = aggregate(&range, &foods, &workouts);

        assert_eq!(stats[0].total_calories, 500.0);
        assert_eq!(stats[0].meals_count, 2);
        assert_eq!(stats[0].total_carbs, 80.0);
        assert_eq!(stats[0].workouts_count, 0);

        assert_eq!(stats[1].total_calories, 100.0);
        assert_eq!(stats[1].calories_burned, 350.0);
        assert_eq!(stats[1].exercise_duration, 45);
        assert_eq!(stats[1].workouts_count, 2);
    }

    #[test]
    fn test_serialises_camel_case() {
        let json = serde_json::to_value(DailyStatistics::empty(parse_day("2024-01-01").unwrap()))
            .unwrap();
        assert_eq!(json["date"], "2024-01-01");
        assert_eq!(json["mealsCount"], 0);
        assert!(json.get("exerciseDuration").is_some());
    }
}
