//! Value Objects

pub mod date_range;
pub mod meal_type;
