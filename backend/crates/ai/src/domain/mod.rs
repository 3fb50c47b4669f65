//! Domain Layer

pub mod food;
pub mod image;
pub mod json;
pub mod meal_plan;
pub mod model;
