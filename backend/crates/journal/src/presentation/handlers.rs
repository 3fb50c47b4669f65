//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use chrono::Utc;
use kernel::extract::{AppJson, AppPath, AppQuery};
use kernel::id::{FoodLogId, WorkoutLogId};
use std::sync::Arc;

use auth::{CurrentUser, UserOrDefault};

use crate::application::{
    BodyMeasurementUseCase, FoodLogUseCase, StatisticsUseCase, WorkoutLogUseCase,
};
use crate::domain::repository::{
    BodyMeasurementRepository, FoodLogRepository, WorkoutLogRepository,
};
use crate::domain::statistics::DailyStatistics;
use crate::domain::value_object::date_range::{DateRange, TimeWindow, parse_day};
use crate::error::{JournalError, JournalResult};
use crate::presentation::dto::{
    BodyMeasurementRequest, BodyMeasurementResponse, CreateFoodLogRequest,
    CreateWorkoutLogRequest, DailyQuery, FoodLogResponse, ListQuery, RangeQuery,
    WorkoutLogResponse,
};

/// Shared state for journal handlers
pub struct JournalAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for JournalAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

fn optional_day(value: Option<&str>) -> JournalResult<Option<chrono::NaiveDate>> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(parse_day)
        .transpose()
        .map_err(JournalError::InvalidQuery)
}

impl ListQuery {
    fn window(&self) -> JournalResult<TimeWindow> {
        let start = optional_day(self.start.as_deref())?;
        let end = optional_day(self.end.as_deref())?;
        TimeWindow::from_days(start, end).map_err(JournalError::InvalidQuery)
    }
}

// ============================================================================
// Food Log
// ============================================================================

/// GET /api/food-log
pub async fn list_food_logs<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppQuery(query): AppQuery<ListQuery>,
) -> JournalResult<Json<Vec<FoodLogResponse>>>
where
    R: FoodLogRepository + Send + Sync + 'static,
{
    let logs = FoodLogUseCase::new(state.repo.clone())
        .list(user.id, query.window()?)
        .await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

/// POST /api/food-log
pub async fn create_food_log<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppJson(req): AppJson<CreateFoodLogRequest>,
) -> JournalResult<(StatusCode, Json<FoodLogResponse>)>
where
    R: FoodLogRepository + Send + Sync + 'static,
{
    let entry = req.into_new(user.id).map_err(JournalError::Validation)?;
    let created = FoodLogUseCase::new(state.repo.clone()).create(entry).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// DELETE /api/food-log/{id}
pub async fn delete_food_log<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> JournalResult<StatusCode>
where
    R: FoodLogRepository + Send + Sync + 'static,
{
    FoodLogUseCase::new(state.repo.clone())
        .delete(user.id, FoodLogId::from_raw(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Workout Log
// ============================================================================

/// GET /api/workout-log
///
/// Anonymous callers see the default user's log.
pub async fn list_workout_logs<R>(
    State(state): State<JournalAppState<R>>,
    UserOrDefault(user_id): UserOrDefault,
    AppQuery(query): AppQuery<ListQuery>,
) -> JournalResult<Json<Vec<WorkoutLogResponse>>>
where
    R: WorkoutLogRepository + Send + Sync + 'static,
{
    let logs = WorkoutLogUseCase::new(state.repo.clone())
        .list(user_id, query.window()?)
        .await?;
    Ok(Json(logs.into_iter().map(Into::into).collect()))
}

/// POST /api/workout-log
pub async fn create_workout_log<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppJson(req): AppJson<CreateWorkoutLogRequest>,
) -> JournalResult<(StatusCode, Json<WorkoutLogResponse>)>
where
    R: WorkoutLogRepository + Send + Sync + 'static,
{
    let entry = req.into_new(user.id).map_err(JournalError::Validation)?;
    let created = WorkoutLogUseCase::new(state.repo.clone())
        .create(entry)
        .await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// DELETE /api/workout-log/{id}
pub async fn delete_workout_log<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> JournalResult<StatusCode>
where
    R: WorkoutLogRepository + Send + Sync + 'static,
{
    WorkoutLogUseCase::new(state.repo.clone())
        .delete(user.id, WorkoutLogId::from_raw(id))
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Body Measurements
// ============================================================================

/// GET /api/body-measurements
pub async fn list_body_measurements<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
) -> JournalResult<Json<Vec<BodyMeasurementResponse>>>
where
    R: BodyMeasurementRepository + Send + Sync + 'static,
{
    let rows = BodyMeasurementUseCase::new(state.repo.clone())
        .list(user.id)
        .await?;
    Ok(Json(rows.into_iter().map(Into::into).collect()))
}

/// POST /api/body-measurements
pub async fn record_body_measurement<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppJson(req): AppJson<BodyMeasurementRequest>,
) -> JournalResult<Json<BodyMeasurementResponse>>
where
    R: BodyMeasurementRepository + Send + Sync + 'static,
{
    let entry = req.into_new(user.id, Utc::now().date_naive());
    let saved = BodyMeasurementUseCase::new(state.repo.clone())
        .record(entry)
        .await?;
    Ok(Json(saved.into()))
}

// ============================================================================
// Statistics
// ============================================================================

/// GET /api/statistics/daily?date=YYYY-MM-DD (defaults to today, UTC)
pub async fn daily_statistics<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppQuery(query): AppQuery<DailyQuery>,
) -> JournalResult<Json<DailyStatistics>>
where
    R: FoodLogRepository + WorkoutLogRepository + Send + Sync + 'static,
{
    let day = optional_day(query.date.as_deref())?.unwrap_or_else(|| Utc::now().date_naive());
    let stats = StatisticsUseCase::new(state.repo.clone())
        .daily(user.id, day)
        .await?;
    Ok(Json(stats))
}

/// GET /api/statistics/weekly?startDate&endDate
pub async fn range_statistics<R>(
    State(state): State<JournalAppState<R>>,
    user: CurrentUser,
    AppQuery(query): AppQuery<RangeQuery>,
) -> JournalResult<Json<Vec<DailyStatistics>>>
where
    R: FoodLogRepository + WorkoutLogRepository + Send + Sync + 'static,
{
    let (Some(start), Some(end)) = (
        optional_day(query.start_date.as_deref())?,
        optional_day(query.end_date.as_deref())?,
    ) else {
        return Err(JournalError::InvalidQuery(
            "startDate and endDate are required".to_string(),
        ));
    };

    let range = DateRange::new(start, end).map_err(JournalError::InvalidQuery)?;
    let stats = StatisticsUseCase::new(state.repo.clone())
        .range(user.id, range)
        .await?;
    Ok(Json(stats))
}
