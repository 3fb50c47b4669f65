//! Lenient request-body deserializers
//!
//! The mobile client posts form values that may arrive as numbers, numeric
//! strings, empty strings or `null`. These helpers accept all of them.
//!
//! The `patch_*` variants are for partial updates and must be combined with
//! `#[serde(default)]`: an absent field stays `None`, `null` (or `""`)
//! becomes `Some(None)` and a value becomes `Some(Some(v))`.
//!
//! ```rust
//! use serde::Deserialize;
//!
//! #[derive(Deserialize)]
//! struct Body {
//!     #[serde(default, deserialize_with = "kernel::serde_ext::opt_f64")]
//!     weight: Option<f64>,
//!     #[serde(default, deserialize_with = "kernel::serde_ext::patch_i32")]
//!     age: Option<Option<i32>>,
//! }
//!
//! let body: Body = serde_json::from_str(r#"{"weight":"70.5","age":null}"#).unwrap();
//! assert_eq!(body.weight, Some(70.5));
//! assert_eq!(body.age, Some(None));
//! ```

use serde::Deserialize;
use serde::de::{self, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Lenient {
    Number(f64),
    Text(String),
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = match Option::<Lenient>::deserialize(deserializer)? {
        None => return Ok(None),
        Some(Lenient::Number(n)) => n,
        Some(Lenient::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            s.parse::<f64>()
                .map_err(|_| de::Error::custom(format!("expected a number, got {s:?}")))?
        }
    };

    if !value.is_finite() {
        return Err(de::Error::custom("expected a finite number"));
    }
    Ok(Some(value))
}

fn to_i32<E: de::Error>(value: f64) -> Result<i32, E> {
    if value.fract() != 0.0 || value < i32::MIN as f64 || value > i32::MAX as f64 {
        return Err(E::custom(format!("expected a whole number, got {value}")));
    }
    Ok(value as i32)
}

/// Optional float from number, numeric string, `""` or `null`
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer)
}

/// Optional whole number from number, numeric string, `""` or `null`
pub fn opt_i32<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer)?.map(to_i32).transpose()
}

pub fn patch_f64<'de, D>(deserializer: D) -> Result<Option<Option<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    lenient_f64(deserializer).map(Some)
}

pub fn patch_i32<'de, D>(deserializer: D) -> Result<Option<Option<i32>>, D::Error>
where
    D: Deserializer<'de>,
{
    opt_i32(deserializer).map(Some)
}

/// Absent / null / value distinction for any deserializable type
pub fn patch<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
