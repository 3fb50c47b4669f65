//! HTTP Handlers

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use kernel::extract::{AppJson, AppPath, AppQuery};
use kernel::id::CalendarEventId;
use std::sync::Arc;

use auth::CurrentUser;

use crate::application::CalendarUseCase;
use crate::domain::event::CalendarEvent;
use crate::domain::repository::CalendarRepository;
use crate::error::CalendarResult;
use crate::presentation::dto::{
    ByDateQuery, CalendarEventResponse, CreateEventRequest, MessageResponse, UpdateEventRequest,
};

/// Shared state for calendar handlers
pub struct CalendarAppState<R> {
    pub repo: Arc<R>,
}

impl<R> Clone for CalendarAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
        }
    }
}

fn to_response(events: Vec<CalendarEvent>) -> Json<Vec<CalendarEventResponse>> {
    Json(events.into_iter().map(Into::into).collect())
}

/// GET /api/calendar
pub async fn list_events<R>(
    State(state): State<CalendarAppState<R>>,
    user: CurrentUser,
) -> CalendarResult<Json<Vec<CalendarEventResponse>>>
where
    R: CalendarRepository + Send + Sync + 'static,
{
    let events = CalendarUseCase::new(state.repo.clone()).list(user.id).await?;
    Ok(to_response(events))
}

/// GET /api/calendar/by-date?date=YYYY-MM-DD
pub async fn events_by_date<R>(
    State(state): State<CalendarAppState<R>>,
    user: CurrentUser,
    AppQuery(query): AppQuery<ByDateQuery>,
) -> CalendarResult<Json<Vec<CalendarEventResponse>>>
where
    R: CalendarRepository + Send + Sync + 'static,
{
    let day = query.day()?;
    let events = CalendarUseCase::new(state.repo.clone())
        .on_day(user.id, day)
        .await?;
    Ok(to_response(events))
}

/// POST /api/calendar
pub async fn create_event<R>(
    State(state): State<CalendarAppState<R>>,
    user: CurrentUser,
    AppJson(req): AppJson<CreateEventRequest>,
) -> CalendarResult<(StatusCode, Json<CalendarEventResponse>)>
where
    R: CalendarRepository + Send + Sync + 'static,
{
    let event = req.into_new(user.id)?;
    let created = CalendarUseCase::new(state.repo.clone()).create(event).await?;
    Ok((StatusCode::CREATED, Json(created.into())))
}

/// PUT /api/calendar/{id}
pub async fn update_event<R>(
    State(state): State<CalendarAppState<R>>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
    AppJson(req): AppJson<UpdateEventRequest>,
) -> CalendarResult<Json<CalendarEventResponse>>
where
    R: CalendarRepository + Send + Sync + 'static,
{
    let patch = req.into_patch()?;
    let updated = CalendarUseCase::new(state.repo.clone())
        .update(user.id, CalendarEventId::from_raw(id), patch)
        .await?;
    Ok(Json(updated.into()))
}

/// DELETE /api/calendar/{id}
pub async fn delete_event<R>(
    State(state): State<CalendarAppState<R>>,
    user: CurrentUser,
    AppPath(id): AppPath<i64>,
) -> CalendarResult<Json<MessageResponse>>
where
    R: CalendarRepository + Send + Sync + 'static,
{
    CalendarUseCase::new(state.repo.clone())
        .delete(user.id, CalendarEventId::from_raw(id))
        .await?;
    Ok(Json(MessageResponse {
        message: "Event deleted successfully",
    }))
}
