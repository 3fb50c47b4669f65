//! API DTOs (Data Transfer Objects)

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use serde::{Deserialize, Serialize};

use crate::application::AuthOutput;
use crate::domain::entity::user::{ExercisePreferences, MeasurementsPatch, ProfilePatch, User};

// ============================================================================
// Register / Login
// ============================================================================

/// Register request
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "kernel::serde_ext::opt_i32")]
    pub age: Option<i32>,
    #[serde(default)]
    pub gender: Option<String>,
    #[serde(default, alias = "heightCm", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub height: Option<f64>,
    #[serde(default, alias = "weightKg", deserialize_with = "kernel::serde_ext::opt_f64")]
    pub weight: Option<f64>,
    #[serde(default)]
    pub goal: Option<String>,
    #[serde(default, alias = "activity_level")]
    pub activity_level: Option<String>,
}

impl RegisterRequest {
    /// Sign-up profile fields as a patch over an empty profile
    pub fn profile_patch(&self) -> ProfilePatch {
        ProfilePatch {
            name: self.name.clone().map(Some),
            age: self.age.map(Some),
            gender: self.gender.clone().map(Some),
            height_cm: self.height.map(Some),
            weight_kg: self.weight.map(Some),
            goal: self.goal.clone().map(Some),
            activity_level: self.activity_level.clone().map(Some),
            ..Default::default()
        }
    }
}

/// Login request
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Refresh request; the token may also come from the cookie
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    #[serde(default)]
    pub refresh_token: Option<String>,
}

/// Register / login / refresh response
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

impl From<&AuthOutput> for AuthResponse {
    fn from(output: &AuthOutput) -> Self {
        Self {
            user: UserResponse::from(&output.user),
            access_token: output.tokens.access_token.clone(),
            refresh_token: output.tokens.refresh_token.clone(),
        }
    }
}

// ============================================================================
// Profile
// ============================================================================

/// Public view of a user; never includes the password hash
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<String>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub biceps_cm: Option<f64>,
    pub thigh_cm: Option<f64>,
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub exercise_preferences: Option<ExercisePreferences>,
    pub bmi: Option<f64>,
    pub tdee: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        let p = &user.profile;
        Self {
            id: user.id,
            email: user.email.as_str().to_string(),
            name: p.name.clone(),
            age: p.age,
            gender: p.gender.clone(),
            height_cm: p.height_cm,
            weight_kg: p.weight_kg,
            neck_cm: p.measurements.neck_cm,
            waist_cm: p.measurements.waist_cm,
            hip_cm: p.measurements.hip_cm,
            biceps_cm: p.measurements.biceps_cm,
            thigh_cm: p.measurements.thigh_cm,
            goal: p.goal.clone(),
            activity_level: p.activity_level.clone(),
            exercise_preferences: p.exercise_preferences.clone(),
            bmi: user.bmi(),
            tdee: user.tdee(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

/// Body circumference partial update
///
/// Accepts camelCase, snake_case and the bare names the profile form uses.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementsRequest {
    #[serde(default, alias = "neck_cm", alias = "neck", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub neck_cm: Option<Option<f64>>,
    #[serde(default, alias = "waist_cm", alias = "waist", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub waist_cm: Option<Option<f64>>,
    #[serde(default, alias = "hip_cm", alias = "hip", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub hip_cm: Option<Option<f64>>,
    #[serde(default, alias = "biceps_cm", alias = "biceps", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub biceps_cm: Option<Option<f64>>,
    #[serde(default, alias = "thigh_cm", alias = "thigh", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub thigh_cm: Option<Option<f64>>,
}

impl From<MeasurementsRequest> for MeasurementsPatch {
    fn from(req: MeasurementsRequest) -> Self {
        Self {
            neck_cm: req.neck_cm,
            waist_cm: req.waist_cm,
            hip_cm: req.hip_cm,
            biceps_cm: req.biceps_cm,
            thigh_cm: req.thigh_cm,
        }
    }
}

/// Profile partial update: absent leaves unchanged, `null` clears
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default, deserialize_with = "kernel::serde_ext::patch")]
    pub name: Option<Option<String>>,
    #[serde(default, deserialize_with = "kernel::serde_ext::patch_i32")]
    pub age: Option<Option<i32>>,
    #[serde(default, deserialize_with = "kernel::serde_ext::patch")]
    pub gender: Option<Option<String>>,
    #[serde(default, alias = "height", alias = "height_cm", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub height_cm: Option<Option<f64>>,
    #[serde(default, alias = "weight", alias = "weight_kg", deserialize_with = "kernel::serde_ext::patch_f64")]
    pub weight_kg: Option<Option<f64>>,
    #[serde(default, deserialize_with = "kernel::serde_ext::patch")]
    pub goal: Option<Option<String>>,
    #[serde(default, alias = "activity_level", deserialize_with = "kernel::serde_ext::patch")]
    pub activity_level: Option<Option<String>>,
    #[serde(default, alias = "exercise_preferences", deserialize_with = "kernel::serde_ext::patch")]
    pub exercise_preferences: Option<Option<ExercisePreferences>>,
    #[serde(flatten)]
    pub measurements: MeasurementsRequest,
}

impl From<UpdateProfileRequest> for ProfilePatch {
    fn from(req: UpdateProfileRequest) -> Self {
        Self {
            name: req.name,
            age: req.age,
            gender: req.gender,
            height_cm: req.height_cm,
            weight_kg: req.weight_kg,
            goal: req.goal,
            activity_level: req.activity_level,
            exercise_preferences: req.exercise_preferences,
            measurements: req.measurements.into(),
        }
    }
}
