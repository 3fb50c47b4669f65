//! Auth Router

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::UserRepository;
use crate::presentation::handlers::{self, AuthAppState};
use crate::presentation::middleware::{AuthMiddlewareState, require_auth};

/// Create the Auth router for any repository implementation
///
/// Mounted at both `/api/auth` and `/api/users`. Expects
/// `attach_user_if_present` to be layered around it.
pub fn auth_router<R>(repo: Arc<R>, config: Arc<AuthConfig>) -> Router
where
    R: UserRepository + Send + Sync + 'static,
{
    let guard = AuthMiddlewareState {
        repo: repo.clone(),
        config: config.clone(),
    };
    let state = AuthAppState { repo, config };

    let protected = Router::new()
        .route(
            "/me",
            get(handlers::get_me::<R>).put(handlers::update_me::<R>),
        )
        .route("/me/measurements", put(handlers::update_measurements::<R>))
        .route_layer(middleware::from_fn_with_state(guard, require_auth::<R>));

    Router::new()
        .route("/register", post(handlers::register::<R>))
        .route("/login", post(handlers::login::<R>))
        .route("/refresh", post(handlers::refresh::<R>))
        .route("/logout", post(handlers::logout::<R>))
        .merge(protected)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use crate::infra::memory::InMemoryUserRepository;
    use crate::presentation::middleware::attach_user_if_present;

    fn app() -> Router {
        let config = Arc::new(AuthConfig {
            allow_guest_mode: false,
            ..AuthConfig::development()
        });
        let repo = Arc::new(InMemoryUserRepository::default());
        auth_router(repo, config.clone())
            .layer(middleware::from_fn_with_state(config, attach_user_if_present))
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_register_then_profile() {
        let app = app();

        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                json!({"email": "a@example.com", "password": "secret123", "weight": 70, "height": 175}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
        assert!(cookie.starts_with("refreshToken="));
        assert!(cookie.contains("HttpOnly"));
        assert!(cookie.contains("Max-Age=604800"));

        let body = read_json(response).await;
        assert_eq!(body["user"]["email"], "a@example.com");
        assert_eq!(body["user"]["bmi"], 22.9);
        assert!(body["user"].get("passwordHash").is_none());
        let access = body["accessToken"].as_str().unwrap().to_string();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/me")
                    .header(header::AUTHORIZATION, format!("Bearer {access}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(read_json(response).await["weightKg"], 70.0);
    }

    #[tokio::test]
    async fn test_register_validation_body() {
        let response = app()
            .oneshot(json_request(
                "POST",
                "/register",
                json!({"email": "nope", "password": "1"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"], "Validation failed");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_body() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"email": "a@example.com","#))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Malformed JSON body");
    }

    #[tokio::test]
    async fn test_refresh_from_cookie() {
        let app = app();
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                "/register",
                json!({"email": "c@example.com", "password": "secret123"}),
            ))
            .await
            .unwrap();
        let refresh = read_json(response).await["refreshToken"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/refresh")
                    .header(header::COOKIE, format!("refreshToken={refresh}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/refresh")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(read_json(response).await["error"], "Missing refresh token");
    }

    #[tokio::test]
    async fn test_logout_clears_cookie() {
        let response = app()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/logout")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.contains("Max-Age=0"));
    }

    #[tokio::test]
    async fn test_me_requires_token_without_guest_mode() {
        let response = app()
            .oneshot(Request::builder().uri("/me").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
