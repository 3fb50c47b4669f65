//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::extract::{AppJson, AppPath};
use std::sync::Arc;

use crate::application::{AiConfig, MealPlanUseCase, RecognizeFoodUseCase};
use crate::domain::model::GenerativeModel;
use crate::error::{AiError, AiResult};
use crate::infra::image_cache::TempImageCache;
use crate::presentation::dto::{
    FoodRecognitionData, MealPlanRequest, MealPlanResponse, RecognizeFoodRequest, SuccessResponse,
};

/// Shared state for AI handlers
pub struct AiAppState<M> {
    pub model: Arc<M>,
    pub cache: Arc<TempImageCache>,
    pub config: Arc<AiConfig>,
}

impl<M> Clone for AiAppState<M> {
    fn clone(&self) -> Self {
        Self {
            model: self.model.clone(),
            cache: self.cache.clone(),
            config: self.config.clone(),
        }
    }
}

/// POST /api/ai/recognize-food
pub async fn recognize_food<M>(
    State(state): State<AiAppState<M>>,
    AppJson(req): AppJson<RecognizeFoodRequest>,
) -> AiResult<Json<SuccessResponse<FoodRecognitionData>>>
where
    M: GenerativeModel + Send + Sync + 'static,
{
    let raw = req.base64_image.unwrap_or_default();
    let recognized = RecognizeFoodUseCase::new(state.model.clone(), state.cache.clone())
        .execute(&raw)
        .await?;
    Ok(Json(SuccessResponse::new(recognized.into())))
}

/// POST /api/ai/meal-plan
pub async fn meal_plan<M>(
    State(state): State<AiAppState<M>>,
    AppJson(req): AppJson<MealPlanRequest>,
) -> AiResult<Json<MealPlanResponse>>
where
    M: GenerativeModel + Send + Sync + 'static,
{
    let preferences = req.into_preferences()?;
    let plan = MealPlanUseCase::new(state.model.clone(), state.config.clone())
        .execute(preferences, Utc::now().date_naive())
        .await?;
    Ok(Json(plan.into()))
}

/// GET /temp-image/{image_id}
pub async fn temp_image(
    State(cache): State<Arc<TempImageCache>>,
    AppPath(image_id): AppPath<String>,
) -> AiResult<Response> {
    let image = cache.get(&image_id).ok_or(AiError::ImageNotFound)?;
    Ok((
        [
            (header::CONTENT_TYPE, image.mime_type.clone()),
            (header::CACHE_CONTROL, "private, max-age=3600".to_string()),
            (header::X_CONTENT_TYPE_OPTIONS, "nosniff".to_string()),
        ],
        image.data.clone(),
    )
        .into_response())
}
