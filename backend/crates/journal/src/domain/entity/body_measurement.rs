//! Body Measurement Entity
//!
//! At most one row per user per UTC day. A second submission on the same
//! day overwrites the weight and any circumference it carries; omitted
//! circumferences keep the earlier value.

use chrono::{DateTime, NaiveDate, Utc};
use kernel::error::app_error::FieldError;
use kernel::id::{BodyMeasurementId, UserId};

#[derive(Debug, Clone, PartialEq)]
pub struct BodyMeasurement {
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

#[derive(Debug, Clone, PartialEq)]
pub struct NewBodyMeasurement {
    pub user_id: UserId,
    pub measured_on: NaiveDate,
    pub weight_kg: Option<f64>,
    pub neck_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hip_cm: Option<f64>,
    pub biceps_cm: Option<f64>,
    pub thigh_cm: Option<f64>,
}

impl NewBodyMeasurement {
    /// Weight is mandatory and every value must be positive
    pub fn validate(&self) -> Vec<FieldError> {
        let mut errors = Vec::new();
        match self.weight_kg {
            None => errors.push(FieldError::new("weightKg", "weightKg is required")),
            Some(w) if w <= 0.0 => {
                errors.push(FieldError::new("weightKg", "weightKg must be greater than 0"))
            }
            Some(_) => {}
        }
        for (field, value) in [
            ("neckCm", self.neck_cm),
            ("waistCm", self.waist_cm),
            ("hipCm", self.hip_cm),
            ("bicepsCm", self.biceps_cm),
            ("thighCm", self.thigh_cm),
        ] {
            if value.is_some_and(|v| v <= 0.0) {
                errors.push(FieldError::new(field, format!("{field} must be greater than 0")));
            }
        }
        errors
    }
}
