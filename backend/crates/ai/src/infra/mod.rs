//! Infrastructure Layer

pub mod gemini;
pub mod image_cache;

#[cfg(test)]
pub(crate) mod stub;

pub use gemini::GeminiClient;
pub use image_cache::TempImageCache;
