//! API Server Entry Point
//!
//! Application entry point and server initialization.
//! Uses `anyhow` for startup errors, but application-level
//! errors should use `kernel::error::AppError`.

mod config;
mod routes;

use ai::{GeminiClient, TempImageCache, ai_router, temp_image_router};
use auth::{AuthMiddlewareState, PgUserRepository, attach_user_if_present, auth_router};
use axum::{
    Router, http,
    http::{Method, header},
    middleware,
    routing::get,
};
use calendar::{PgCalendarRepository, calendar_router};
use journal::{
    PgJournalRepository, body_measurement_router, food_log_router, statistics_router,
    workout_log_router,
};
use platform::password::ClearTextPassword;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{AllowHeaders, AllowMethods, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{AppConfig, CorsOrigins};

// Re-export unified error types for use in handlers
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            "api=info,auth=info,journal=info,calendar=info,ai=info,tower_http=info".into()
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::from_env()?;
    tracing::info!(environment = ?config.environment, "Configuration loaded");

    // Database connection
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await?;

    tracing::info!("Connected to database");

    // Run migrations
    sqlx::migrate!("../../../database/migrations")
        .run(&pool)
        .await?;

    tracing::info!("Migrations completed");

    let auth_config = Arc::new(config.auth);
    let ai_config = Arc::new(config.ai);

    let users = Arc::new(PgUserRepository::new(pool.clone()));

    // The default user backs guest mode and the open workout listing.
    // Its password is random, so nobody can sign in as it.
    let password = ClearTextPassword::new(platform::crypto::random_token(32))?;
    let hash = password.hash(auth_config.pepper())?;
    users
        .ensure_guest_user(auth_config.default_user_id, &hash)
        .await?;

    let journal = Arc::new(PgJournalRepository::new(pool.clone()));
    let events = Arc::new(PgCalendarRepository::new(pool.clone()));
    let gemini = Arc::new(GeminiClient::new(&ai_config)?);
    let image_cache = Arc::new(TempImageCache::new(
        ai_config.image_ttl,
        ai_config.image_cache_capacity,
        ai_config.image_cache_max_bytes,
    ));

    let guard = AuthMiddlewareState {
        repo: users.clone(),
        config: auth_config.clone(),
    };

    // Build router
    let app = Router::new()
        .route("/health", get(routes::health))
        .nest("/api/auth", auth_router(users.clone(), auth_config.clone()))
        .nest("/api/users", auth_router(users, auth_config.clone()))
        .nest("/api/food-log", food_log_router(journal.clone(), guard.clone()))
        .nest(
            "/api/workout-log",
            workout_log_router(journal.clone(), guard.clone()),
        )
        .nest(
            "/api/body-measurements",
            body_measurement_router(journal.clone(), guard.clone()),
        )
        .nest("/api/statistics", statistics_router(journal, guard.clone()))
        .nest("/api/calendar", calendar_router(events, guard))
        .nest(
            "/api/ai",
            ai_router(gemini, image_cache.clone(), ai_config.clone()),
        )
        .nest("/temp-image", temp_image_router(image_cache))
        .fallback(routes::not_found)
        .layer(middleware::from_fn_with_state(
            auth_config,
            attach_user_if_present,
        ))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins));

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}

fn cors_layer(origins: &CorsOrigins) -> CorsLayer {
    match origins {
        CorsOrigins::Any => CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any),
        CorsOrigins::List(list) => {
            let allowed_origins: Vec<http::HeaderValue> = list
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods(AllowMethods::list([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ]))
                .allow_headers(AllowHeaders::list([
                    header::CONTENT_TYPE,
                    header::AUTHORIZATION,
                    header::ACCEPT,
                ]))
                .allow_credentials(true)
        }
    }
}
