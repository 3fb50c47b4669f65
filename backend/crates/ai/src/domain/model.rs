//! Generative Model Trait

use crate::domain::image::InlineImage;
use crate::error::AiResult;

/// A hosted model that answers a prompt (optionally about an image) with text
#[trait_variant::make(GenerativeModel: Send)]
pub trait LocalGenerativeModel {
    async fn generate(&self, prompt: &str, image: Option<&InlineImage>) -> AiResult<String>;
}
