//! Recognize Food Use Case

use std::sync::Arc;

use crate::domain::food::FoodRecognition;
use crate::domain::image::InlineImage;
use crate::domain::json::extract_json;
use crate::domain::model::GenerativeModel;
use crate::error::{AiError, AiResult};
use crate::infra::image_cache::TempImageCache;

const PROMPT: &str = "Identify the main food in this photo and estimate its nutrition for the \
visible portion. Answer with JSON only: {\"foodName\": string, \"calories\": number, \
\"protein\": number, \"carbs\": number, \"fats\": number, \"portionSize\": string, \
\"confidence\": number between 0 and 1}. Macros are in grams.";

#[derive(Debug, Clone)]
pub struct RecognizedFood {
    pub food: FoodRecognition,
    /// Key in the temporary image cache
    pub image_id: String,
}

pub struct RecognizeFoodUseCase<M>
where
    M: GenerativeModel,
{
    model: Arc<M>,
    cache: Arc<TempImageCache>,
}

impl<M> RecognizeFoodUseCase<M>
where
    M: GenerativeModel,
{
    pub fn new(model: Arc<M>, cache: Arc<TempImageCache>) -> Self {
        Self { model, cache }
    }

    pub async fn execute(&self, raw_image: &str) -> AiResult<RecognizedFood> {
        let image = InlineImage::parse(raw_image)?;
        let size = image.data.len();
        let image = Arc::new(image);
        let image_id = self.cache.insert(image.clone());

        let answer = self.model.generate(PROMPT, Some(image.as_ref())).await?;
        let value = extract_json(&answer)
            .ok_or_else(|| AiError::Upstream("food answer contained no JSON".into()))?;
        let food = FoodRecognition::from_value(&value)?;

        tracing::info!(
            image_id = %image_id,
            image_bytes = size,
            food_name = %food.food_name,
            confidence = food.confidence,
            "Food recognized"
        );
        Ok(RecognizedFood { food, image_id })
    }
}
