//! Per-client rate limiting for the AI endpoints

use axum::extract::{ConnectInfo, Request, State};
use axum::middleware::Next;
use axum::response::Response;
use platform::client::client_key;
use platform::rate_limit::{InMemoryRateLimiter, RateLimitStore};
use std::net::SocketAddr;
use std::sync::Arc;

use crate::error::AiError;

#[derive(Clone)]
pub struct RateLimitState {
    pub limiter: Arc<InMemoryRateLimiter>,
    /// Honour `X-Forwarded-For` (only behind a trusted reverse proxy)
    pub trust_proxy: bool,
}

/// Limit keyed by client IP
pub async fn rate_limit(
    State(state): State<RateLimitState>,
    req: Request,
    next: Next,
) -> Result<Response, AiError> {
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let key = client_key(req.headers(), direct_ip, state.trust_proxy);

    let result = RateLimitStore::check_and_increment(state.limiter.as_ref(), &key)
        .await
        .map_err(|e| AiError::Internal(format!("rate limiter failed: {e}")))?;

    if !result.allowed {
        tracing::warn!(client = %key, "AI rate limit exceeded");
        return Err(AiError::RateLimited {
            retry_after: result.retry_after,
        });
    }

    Ok(next.run(req).await)
}
