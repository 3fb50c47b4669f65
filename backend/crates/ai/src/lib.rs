//! AI Backend Module
//!
//! Thin integration with a hosted generative model:
//! - food recognition from a photo
//! - 7-day meal plan generation
//! - short-lived cache serving uploaded photos back to the client
//!
//! Clean Architecture structure:
//! - `domain/` - Inline images, model trait, response parsing
//! - `application/` - Config and use cases
//! - `infra/` - Gemini HTTP client, temporary image cache
//! - `presentation/` - HTTP handlers, DTOs, routers, rate limiting

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

// Re-exports for convenience
pub use application::config::AiConfig;
pub use error::{AiError, AiResult};
pub use infra::gemini::GeminiClient;
pub use infra::image_cache::TempImageCache;
pub use presentation::router::{ai_router, temp_image_router};
