//! Calendar Router

use axum::{
    Router, middleware,
    routing::{get, put},
};
use std::sync::Arc;

use auth::domain::repository::UserRepository;
use auth::{AuthMiddlewareState, require_auth};

use crate::domain::repository::CalendarRepository;
use crate::presentation::handlers::{self, CalendarAppState};

/// `/api/calendar`; every route requires an identity
pub fn calendar_router<R, U>(repo: Arc<R>, guard: AuthMiddlewareState<U>) -> Router
where
    R: CalendarRepository + Send + Sync + 'static,
    U: UserRepository + Send + Sync + 'static,
{
    Router::new()
        .route(
            "/",
            get(handlers::list_events::<R>).post(handlers::create_event::<R>),
        )
        .route("/by-date", get(handlers::events_by_date::<R>))
        .route(
            "/{id}",
            put(handlers::update_event::<R>).delete(handlers::delete_event::<R>),
        )
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<U>))
        .with_state(CalendarAppState { repo })
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::AuthConfig;
    use auth::attach_user_if_present;
    use auth::infra::memory::InMemoryUserRepository;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::memory::InMemoryCalendarRepository;

    fn app(allow_guest_mode: bool) -> Router {
        let config = Arc::new(AuthConfig {
            allow_guest_mode,
            ..AuthConfig::development()
        });
        let guard = AuthMiddlewareState {
            repo: Arc::new(InMemoryUserRepository::with_user(1, "guest@example.com")),
            config: config.clone(),
        };

        Router::new()
            .nest(
                "/calendar",
                calendar_router(Arc::new(InMemoryCalendarRepository::default()), guard),
            )
            .layer(middleware::from_fn_with_state(config, attach_user_if_present))
    }

    fn send(method: &str, uri: &str, body: Option<Value>) -> Request<Body> {
        let builder = Request::builder().method(method).uri(uri);
        match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        }
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn create(app: &Router, date: &str, slot: &str) -> Value {
        let response = app
            .clone()
            .oneshot(send(
                "POST",
                "/calendar",
                Some(json!({
                    "title": format!("Event {slot}"),
                    "eventDate": date,
                    "timeSlot": slot,
                    "category": "activity",
                    "location": "Gym"
                })),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);
        read_json(response).await
    }

    #[tokio::test]
    async fn test_requires_identity_without_guest_mode() {
        let response = app(false)
            .oneshot(send("GET", "/calendar", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_missing_fields() {
        let response = app(true)
            .oneshot(send("POST", "/calendar", Some(json!({"title": "Lunch"}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Missing required fields");
    }

    #[tokio::test]
    async fn test_non_numeric_id_uses_error_body() {
        let app = app(true);

        let response = app
            .clone()
            .oneshot(send("DELETE", "/calendar/abc", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Invalid path parameter");

        let response = app
            .oneshot(send("PUT", "/calendar/abc", Some(json!({"title": "x"}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_list_and_by_date() {
        let app = app(true);
        create(&app, "2024-05-02", "07:00").await;
        create(&app, "2024-05-01T00:00:00Z", "18:00").await;
        let first = create(&app, "2024-05-01", "06:30").await;
        assert_eq!(first["category"], "activity");
        assert_eq!(first["userId"], 1);
        assert_eq!(first["note"], Value::Null);

        let all = read_json(app.clone().oneshot(send("GET", "/calendar", None)).await.unwrap()).await;
        let slots: Vec<_> = all
            .as_array()
            .unwrap()
            .iter()
            .map(|e| e["timeSlot"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(slots, ["06:30", "18:00", "07:00"]);

        let day = read_json(
            app.clone()
                .oneshot(send("GET", "/calendar/by-date?date=2024-05-01", None))
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(day.as_array().unwrap().len(), 2);

        let response = app
            .clone()
            .oneshot(send("GET", "/calendar/by-date", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Date is required");

        let response = app
            .oneshot(send("GET", "/calendar/by-date?date=garbage", None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let app = app(true);
        let created = create(&app, "2024-05-01", "06:30").await;
        let id = created["id"].as_i64().unwrap();

        let response = app
            .clone()
            .oneshot(send(
                "PUT",
                &format!("/calendar/{id}"),
                Some(json!({"timeSlot": "07:00", "location": null})),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let updated = read_json(response).await;
        assert_eq!(updated["timeSlot"], "07:00");
        assert_eq!(updated["title"], "Event 06:30");
        assert_eq!(updated["location"], Value::Null);

        let response = app
            .clone()
            .oneshot(send("PUT", "/calendar/999", Some(json!({"title": "x"}))))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["error"], "Event not found");

        let response = app
            .clone()
            .oneshot(send("DELETE", &format!("/calendar/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            read_json(response).await["message"],
            "Event deleted successfully"
        );

        let response = app
            .oneshot(send("DELETE", &format!("/calendar/{id}"), None))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
