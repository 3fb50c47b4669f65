//! User Entity
//!
//! The account plus the body profile the nutrition and workout features
//! read from.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kernel::error::app_error::FieldError;
use kernel::id::UserId;
use platform::password::HashedPassword;

use crate::domain::health_metrics;
use crate::domain::value_object::email::Email;

/// Exercise preference flags keyed by exercise type (e.g. `"yoga": true`)
pub type ExercisePreferences = BTreeMap<String, bool>;

/// Body circumference measurements in centimetres
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Measurements {
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub biceps_cm: Option<f64>,
    pub thigh_cm: Option<f64>,
}

/// Self-reported profile
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Profile {
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub exercise_preferences: Option<ExercisePreferences>,
    pub measurements: Measurements,
}

/// User entity
#[derive(Debug, Clone)]
pub struct User {
    pub id: UserId,
    pub email: Email,
    pub password_hash: HashedPassword,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// BMI from the stored height and weight
    pub fn bmi(&self) -> Option<f64> {
        health_metrics::bmi(self.profile.weight_kg, self.profile.height_cm)
    }

    /// Estimated daily energy expenditure in kcal
    pub fn tdee(&self) -> Option<i64> {
        let p = &self.profile;
        health_metrics::tdee(
            p.weight_kg,
            p.height_cm,
            p.age,
            p.gender.as_deref(),
            p.activity_level.as_deref(),
        )
    }
}

/// User about to be inserted; the database assigns the id
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: Email,
    pub password_hash: HashedPassword,
    pub profile: Profile,
}

// ============================================================================
// Partial updates
// ============================================================================

/// `None` leaves a field unchanged, `Some(None)` clears it.
#[derive(Debug, Clone, Default)]
pub struct MeasurementsPatch {
    pub neck_cm: Option<Option<f64>>,
    pub waist_cm: Option<Option<f64>>,
    pub hip_cm: Option<Option<f64>>,
    pub biceps_cm: Option<Option<f64>>,
    pub thigh_cm: Option<Option<f64>>,
}

impl MeasurementsPatch {
    pub fn is_empty(&self) -> bool {
        self.neck_cm.is_none()
            && self.waist_cm.is_none()
            && self.hip_cm.is_none()
            && self.biceps_cm.is_none()
            && self.thigh_cm.is_none()
    }

    fn validate(&self, errors: &mut Vec<FieldError>) {
        check_positive(errors, "neckCm", self.neck_cm);
        check_positive(errors, "waistCm", self.waist_cm);
        check_positive(errors, "hipCm", self.hip_cm);
        check_positive(errors, "bicepsCm", self.biceps_cm);
        check_positive(errors, "thighCm", self.thigh_cm);
    }

    fn apply(self, target: &mut Measurements) {
        apply_field(&mut target.neck_cm, self.neck_cm);
        apply_field(&mut target.waist_cm, self.waist_cm);
        apply_field(&mut target.hip_cm, self.hip_cm);
        apply_field(&mut target.biceps_cm, self.biceps_cm);
        apply_field(&mut target.thigh_cm, self.thigh_cm);
    }
}

#[derive(Debug, Clone, Default)]
pub struct ProfilePatch {
    pub name: Option<Option<String>>,
    pub age: Option<Option<i32>>,
    pub gender: Option<Option<String>>,
    pub height_cm: Option<Option<f64>>,
    pub weight_kg: Option<Option<f64>>,
    pub goal: Option<Option<String>>,
    pub activity_level: Option<Option<String>>,
    pub exercise_preferences: Option<Option<ExercisePreferences>>,
    pub measurements: MeasurementsPatch,
}

impl ProfilePatch {
    /// Field errors for values no profile may hold
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        if let Some(Some(age)) = self.age
            && !(1..=150).contains(&age)
        {
            errors.push(FieldError::new("age", "Age must be between 1 and 150"));
        }
        check_positive(&mut errors, "heightCm", self.height_cm);
        check_positive(&mut errors, "weightKg", self.weight_kg);
        self.measurements.validate(&mut errors);
        errors
    }

    pub fn apply(self, profile: &mut Profile) {
        apply_field(&mut profile.name, blank_to_none(self.name));
        apply_field(&mut profile.age, self.age);
        apply_field(&mut profile.gender, blank_to_none(self.gender));
        apply_field(&mut profile.height_cm, self.height_cm);
        apply_field(&mut profile.weight_kg, self.weight_kg);
        apply_field(&mut profile.goal, blank_to_none(self.goal));
        apply_field(&mut profile.activity_level, blank_to_none(self.activity_level));
        apply_field(&mut profile.exercise_preferences, self.exercise_preferences);
        self.measurements.apply(&mut profile.measurements);
    }
}

fn apply_field<T>(target: &mut Option<T>, patch: Option<Option<T>>) {
    if let Some(value) = patch {
        *target = value;
    }
}

fn blank_to_none(patch: Option<Option<String>>) -> Option<Option<String>> {
    patch.map(|value| {
        value
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    })
}

fn check_positive(errors: &mut Vec<FieldError>, field: &'static str, value: Option<Option<f64>>) {
    if let Some(Some(v)) = value
        && v <= 0.0
    {
        errors.push(FieldError::new(field, format!("{field} must be greater than 0")));
    }
}
