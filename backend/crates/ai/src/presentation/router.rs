//! AI Routers

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
};
use platform::rate_limit::InMemoryRateLimiter;
use std::sync::Arc;

use crate::application::AiConfig;
use crate::domain::model::GenerativeModel;
use crate::infra::image_cache::TempImageCache;
use crate::presentation::handlers::{self, AiAppState};
use crate::presentation::middleware::{RateLimitState, rate_limit};

/// `/api/ai`
///
/// Both endpoints share one per-client rate limit.
pub fn ai_router<M>(model: Arc<M>, cache: Arc<TempImageCache>, config: Arc<AiConfig>) -> Router
where
    M: GenerativeModel + Send + Sync + 'static,
{
    let limit = RateLimitState {
        limiter: Arc::new(InMemoryRateLimiter::new(&config.rate_limit)),
        trust_proxy: config.trust_proxy,
    };
    let body_limit = config.max_body_bytes;

    Router::new()
        .route("/recognize-food", post(handlers::recognize_food::<M>))
        .route("/meal-plan", post(handlers::meal_plan::<M>))
        .route_layer(middleware::from_fn_with_state(limit, rate_limit))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(AiAppState {
            model,
            cache,
            config,
        })
}

/// `/temp-image`
pub fn temp_image_router(cache: Arc<TempImageCache>) -> Router {
    Router::new()
        .route("/{image_id}", get(handlers::temp_image))
        .with_state(cache)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AiError;
    use crate::infra::stub::StubModel;
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode, header};
    use platform::rate_limit::RateLimitConfig;
    use serde_json::{Value, json};
    use std::net::SocketAddr;
    use std::time::Duration;
    use tower::ServiceExt;

    fn app_with(model: StubModel, config: AiConfig) -> Router {
        let cache = Arc::new(TempImageCache::new(
            config.image_ttl,
            config.image_cache_capacity,
            config.image_cache_max_bytes,
        ));
        Router::new()
            .nest(
                "/ai",
                ai_router(Arc::new(model), cache.clone(), Arc::new(config)),
            )
            .nest("/temp-image", temp_image_router(cache))
    }

    /// Request from `client` as the peer address, as `serve` with connect
    /// info would record it
    fn post(uri: &str, client: &str, body: Value) -> Request<Body> {
        let peer: SocketAddr = format!("{client}:40000").parse().unwrap();
        let mut request = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        request.extensions_mut().insert(ConnectInfo(peer));
        request
    }

    fn forwarded(mut request: Request<Body>, xff: &str) -> Request<Body> {
        request
            .headers_mut()
            .insert("x-forwarded-for", xff.parse().unwrap());
        request
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    const FOOD_ANSWER: &str =
        r#"{"foodName":"Bún chả","calories":550,"protein":30,"carbs":60,"fats":18,"portionSize":"1 plate","confidence":0.92}"#;

    #[tokio::test]
    async fn test_recognize_food_and_fetch_image() {
        let app = app_with(StubModel::replying(FOOD_ANSWER), AiConfig::default());

        let response = app
            .clone()
            .oneshot(post(
                "/ai/recognize-food",
                "10.0.0.1",
                json!({"base64Image": "data:image/png;base64,aGVsbG8="}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["foodName"], "Bún chả");
        assert_eq!(body["data"]["portionSize"], "1 plate");

        let image_url = body["data"]["imageUrl"].as_str().unwrap().to_string();
        assert!(image_url.starts_with("/temp-image/"));

        let response = app
            .clone()
            .oneshot(Request::builder().uri(&image_url).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "image/png");
        assert_eq!(response.headers()[header::X_CONTENT_TYPE_OPTIONS], "nosniff");
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"hello");

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/temp-image/unknown")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(read_json(response).await["error"], "Image not found");
    }

    #[tokio::test]
    async fn test_recognize_food_requires_image() {
        let response = app_with(StubModel::replying(FOOD_ANSWER), AiConfig::default())
            .oneshot(post("/ai/recognize-food", "10.0.0.1", json!({})))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_upstream_errors_map_to_status() {
        let cases: [(fn() -> AiError, StatusCode); 3] = [
            (|| AiError::UpstreamBusy, StatusCode::TOO_MANY_REQUESTS),
            (|| AiError::Timeout, StatusCode::GATEWAY_TIMEOUT),
            (|| AiError::Upstream("boom".into()), StatusCode::BAD_GATEWAY),
        ];

        for (make, expected) in cases {
            let response = app_with(StubModel::failing(make), AiConfig::default())
                .oneshot(post(
                    "/ai/recognize-food",
                    "10.0.0.1",
                    json!({"base64Image": "aGVsbG8="}),
                ))
                .await
                .unwrap();
            assert_eq!(response.status(), expected);
        }
    }

    #[tokio::test]
    async fn test_meal_plan() {
        let day = json!({
            "breakfast": {"name": "Xôi", "calories": 500, "protein": 12},
            "lunch": {"name": "Cơm gà", "calories": 700, "protein": 40},
            "snack": {"name": "Chuối", "calories": 100},
            "dinner": {"name": "Canh", "calories": 400, "protein": 20}
        });
        let answer = json!({"mealPlan": vec![day; 9]}).to_string();
        let app = app_with(StubModel::replying(&answer), AiConfig::default());

        let response = app
            .oneshot(post(
                "/ai/meal-plan",
                "10.0.0.1",
                json!({"preferences": "Vietnamese", "targetCalories": 1700}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["source"], "ai");
        assert_eq!(body["targetCalories"], 1700);
        let days = body["mealPlan"].as_array().unwrap();
        assert_eq!(days.len(), 7);
        assert_eq!(days[0]["day"], "Monday");
        assert_eq!(days[0]["totalCalories"], 1700.0);
    }

    #[tokio::test]
    async fn test_rate_limit_per_client() {
        let app = app_with(StubModel::replying(FOOD_ANSWER), limited_to(2));
        let body = json!({"base64Image": "aGVsbG8="});

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(post("/ai/recognize-food", "10.0.0.1", body.clone()))
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let response = app
            .clone()
            .oneshot(post("/ai/recognize-food", "10.0.0.1", body.clone()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));

        let response = app
            .oneshot(post("/ai/recognize-food", "10.0.0.2", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    fn limited_to(max_requests: u32) -> AiConfig {
        AiConfig {
            rate_limit: RateLimitConfig {
                max_requests,
                window: Duration::from_secs(60),
            },
            ..AiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_forwarded_header_ignored_without_trusted_proxy() {
        let app = app_with(StubModel::replying(FOOD_ANSWER), limited_to(2));
        let body = json!({"base64Image": "aGVsbG8="});

        let mut statuses = Vec::new();
        for i in 0..5 {
            let request = forwarded(
                post("/ai/recognize-food", "10.0.0.1", body.clone()),
                &format!("10.9.9.{i}"),
            );
            statuses.push(app.clone().oneshot(request).await.unwrap().status());
        }

        let allowed = statuses.iter().filter(|s| **s == StatusCode::OK).count();
        assert_eq!(allowed, 2);
        assert_eq!(statuses[4], StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_forwarded_header_used_behind_trusted_proxy() {
        let config = AiConfig {
            trust_proxy: true,
            ..limited_to(1)
        };
        let app = app_with(StubModel::replying(FOOD_ANSWER), config);
        let body = json!({"base64Image": "aGVsbG8="});

        for client in ["198.51.100.1", "198.51.100.2"] {
            let request = forwarded(post("/ai/recognize-food", "10.0.0.1", body.clone()), client);
            let response = app.clone().oneshot(request).await.unwrap();
            assert_eq!(response.status(), StatusCode::OK);
        }

        let request = forwarded(
            post("/ai/recognize-food", "10.0.0.1", body),
            "198.51.100.1",
        );
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[tokio::test]
    async fn test_malformed_json_uses_error_body() {
        let mut request = post("/ai/recognize-food", "10.0.0.1", json!({}));
        *request.body_mut() = Body::from("{\"base64Image\": ");
        let response = app_with(StubModel::replying(FOOD_ANSWER), AiConfig::default())
            .oneshot(request)
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(read_json(response).await["error"], "Malformed JSON body");
    }

    #[tokio::test]
    async fn test_svg_upload_rejected() {
        let response = app_with(StubModel::replying(FOOD_ANSWER), AiConfig::default())
            .oneshot(post(
                "/ai/recognize-food",
                "10.0.0.1",
                json!({"base64Image": "data:image/svg+xml;base64,PHN2ZyBvbmxvYWQ9YWxlcnQoMSk+"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(response).await["error"].is_string());
    }

    #[tokio::test]
    async fn test_body_limit() {
        let config = AiConfig {
            max_body_bytes: 64,
            ..AiConfig::default()
        };
        let response = app_with(StubModel::replying(FOOD_ANSWER), config)
            .oneshot(post(
                "/ai/recognize-food",
                "10.0.0.1",
                json!({"base64Image": "A".repeat(200)}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::PAYLOAD_TOO_LARGE);
    }
}
