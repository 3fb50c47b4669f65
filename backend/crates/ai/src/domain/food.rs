//! Food Recognition Result

use serde_json::{Map, Value};

use crate::error::{AiError, AiResult};

#[derive(Debug, Clone, PartialEq)]
pub struct FoodRecognition {
    pub food_name: String,
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
    pub portion_size: String,
    /// 0.0 ..= 1.0
    pub confidence: f64,
}

impl FoodRecognition {
    /// Build from the model's JSON answer
    ///
    /// Negative or unreadable numbers become 0. Confidence given as a
    /// percentage is scaled down.
    pub fn from_value(value: &Value) -> AiResult<Self> {
        let object = match value {
            Value::Object(map) => map,
            Value::Array(items) => match items.first() {
                Some(Value::Object(map)) => map,
                _ => return Err(AiError::Upstream("food answer is not an object".into())),
            },
            _ => return Err(AiError::Upstream("food answer is not an object".into())),
        };

        let food_name = text(object, &["foodName", "food_name", "name"])
            .ok_or_else(|| AiError::Upstream("food answer has no foodName".into()))?;

        Ok(Self {
            food_name,
            calories: amount(object, &["calories", "kcal"]),
            protein: amount(object, &["protein", "protein_g"]),
            carbs: amount(object, &["carbs", "carbohydrates", "carbs_g"]),
            fats: amount(object, &["fats", "fat", "fat_g"]),
            portion_size: text(object, &["portionSize", "portion_size", "portion"])
                .unwrap_or_else(|| "1 serving".to_string()),
            confidence: normalize_confidence(amount(object, &["confidence"])),
        })
    }
}

fn field<'a>(object: &'a Map<String, Value>, keys: &[&str]) -> Option<&'a Value> {
    keys.iter().find_map(|key| object.get(*key))
}

fn text(object: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    match field(object, keys)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Number, or the leading number of a string such as `"250 kcal"`
pub(crate) fn number(value: Option<&Value>) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let s = s.trim();
            let end = s
                .char_indices()
                .find(|(_, c)| !(c.is_ascii_digit() || *c == '.' || *c == '-'))
                .map_or(s.len(), |(i, _)| i);
            s[..end].parse::<f64>().ok()
        }
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(0.0).max(0.0)
}

fn amount(object: &Map<String, Value>, keys: &[&str]) -> f64 {
    number(field(object, keys))
}

fn normalize_confidence(raw: f64) -> f64 {
    let scaled = if raw > 1.0 { raw / 100.0 } else { raw };
    scaled.clamp(0.0, 1.0)
}
