//! Application Layer

pub mod config;
pub mod meal_plan;
pub mod recognize_food;

pub use config::AiConfig;
pub use meal_plan::MealPlanUseCase;
pub use recognize_food::{RecognizeFoodUseCase, RecognizedFood};
