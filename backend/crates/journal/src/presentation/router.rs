//! Journal Routers
//!
//! Each router takes the auth guard state so it can protect its own
//! routes; `attach_user_if_present` must be layered around the app.

use axum::{
    Router, middleware,
    routing::{delete, get},
};
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthMiddlewareState, require_auth};

use crate::domain::repository::{
    BodyMeasurementRepository, FoodLogRepository, WorkoutLogRepository,
};
use crate::presentation::handlers::{self, JournalAppState};

/// `/api/food-log`
pub fn food_log_router<R, U>(repo: Arc<R>, guard: AuthMiddlewareState<U>) -> Router
where
    R: FoodLogRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_food_logs::<R>).post(handlers::create_food_log::<R>),
        )
        .route("/{id}", delete(handlers::delete_food_log::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<U>))
        .with_state(JournalAppState { repo })
}

/// `/api/workout-log`
///
/// Listing is open (falls back to the default user); writes need auth.
pub fn workout_log_router<R, U>(repo: Arc<R>, guard: AuthMiddlewareState<U>) -> Router
where
    R: WorkoutLogRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/", axum::routing::post(handlers::create_workout_log::<R>))
        .route("/{id}", delete(handlers::delete_workout_log::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<U>))
        // Added after route_layer so the guard does not apply
        .route("/", get(handlers::list_workout_logs::<R>))
        .with_state(JournalAppState { repo })
}

/// `/api/body-measurements`
pub fn body_measurement_router<R, U>(repo: Arc<R>, guard: AuthMiddlewareState<U>) -> Router
where
    R: BodyMeasurementRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_body_measurements::<R>)
                .post(handlers::record_body_measurement::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<U>))
        .with_state(JournalAppState { repo })
}

/// `/api/statistics`
pub fn statistics_router<R, U>(repo: Arc<R>, guard: AuthMiddlewareState<U>) -> Router
where
    R: FoodLogRepository + WorkoutLogRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route("/daily", get(handlers::daily_statistics::<R>))
        .route("/weekly", get(handlers::range_statistics::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<U>))
        .with_state(JournalAppState { repo })
}
