//! Health Metrics
//!
//! Body-mass index and total daily energy expenditure derived from the
//! profile. Pure functions; the user entity exposes them as methods.

/// Biological sex used by the Harris-Benedict equation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Parse the free-text gender field. Anything other than male/female
    /// yields `None`, which disables the TDEE estimate.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "male" | "m" => Some(Sex::Male),
            "female" | "f" => Some(Sex::Female),
            _ => None,
        }
    }
}

/// Activity multiplier applied to the BMR
pub fn activity_multiplier(level: Option<&str>) -> f64 {
    match level.map(|l| l.trim().to_ascii_lowercase()) {
        Some(l) if l == "sedentary" => 1.2,
        Some(l) if l == "light" => 1.375,
        Some(l) if l == "moderate" => 1.55,
        Some(l) if l == "active" => 1.725,
        Some(l) if l == "very_active" => 1.9,
        _ => 1.55,
    }
}

/// BMI rounded to one decimal place
pub fn bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let height_m = height_cm.filter(|h| *h > 0.0)? / 100.0;
    let value = weight / (height_m * height_m);
    Some((value * 10.0).round() / 10.0)
}

/// Basal metabolic rate (revised Harris-Benedict)
pub fn bmr(weight_kg: f64, height_cm: f64, age: i32, sex: Sex) -> f64 {
    let age = f64::from(age);
    match sex {
        Sex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        Sex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    }
}

/// Total daily energy expenditure in kcal, rounded
pub fn tdee(
    weight_kg: Option<f64>,
    height_cm: Option<f64>,
    age: Option<i32>,
    gender: Option<&str>,
    activity_level: Option<&str>,
) -> Option<i64> {
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let height = height_cm.filter(|h| *h > 0.0)?;
    let age = age.filter(|a| *a > 0)?;
    let sex = gender.and_then(Sex::parse)?;

    let value = bmr(weight, height, age, sex) * activity_multiplier(activity_level);
    Some(value.round() as i64)
}
