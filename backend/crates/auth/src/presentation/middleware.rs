//! Auth Middleware
//!
//! `attach_user_if_present` runs on every request and only records who
//! the caller claims to be. `require_auth` guards protected routes.

use axum::extract::{FromRequestParts, Request, State};
use axum::http::{HeaderMap, header, request::Parts};
use axum::middleware::Next;
use axum::response::Response;
use kernel::id::UserId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::token::{Claims, TokenKind, TokenService};
use crate::application::{Identity, ResolveIdentityUseCase};
use crate::domain::repository::UserRepository;
use crate::error::AuthError;

/// Identity attached by [`attach_user_if_present`]
#[derive(Debug, Clone)]
pub struct AttachedUser {
    /// Verified access-token claims, if a valid bearer token was sent
    pub claims: Option<Claims>,
    /// User that anonymous reads fall back to
    pub fallback_user_id: UserId,
}

/// Authenticated (or guest) caller, set by [`require_auth`]
pub type CurrentUser = Identity;

/// Middleware state
pub struct AuthMiddlewareState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

impl<R> Clone for AuthMiddlewareState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            config: self.config.clone(),
        }
    }
}

/// Extract the bearer token from the Authorization header
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}

fn verify_bearer(config: &Arc<AuthConfig>, headers: &HeaderMap) -> Option<Claims> {
    let token = bearer_token(headers)?;
    TokenService::new(config.clone()).verify(token, TokenKind::Access)
}

/// Decode an optional bearer token; never rejects
pub async fn attach_user_if_present(
    State(config): State<Arc<AuthConfig>>,
    mut req: Request,
    next: Next,
) -> Response {
    let claims = verify_bearer(&config, req.headers());

    req.extensions_mut().insert(AttachedUser {
        claims,
        fallback_user_id: config.default_user_id,
    });

    next.run(req).await
}

/// Require an identity for the route, or the guest fallback when enabled
pub async fn require_auth<R>(
    State(state): State<AuthMiddlewareState<R>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError>
where
    R: UserRepository + Send + Sync + 'static,
{
    let claims = match req
        .extensions()
        .get::<AttachedUser>()
        .and_then(|a| a.claims.clone())
    {
        Some(claims) => Some(claims),
        None => verify_bearer(&state.config, req.headers()),
    };

    let identity = ResolveIdentityUseCase::new(state.repo.clone(), state.config.clone())
        .execute(claims.as_ref())
        .await?;

    if identity.is_guest {
        tracing::debug!(user_id = %identity.id, path = %req.uri().path(), "Serving request as guest user");
    }
    req.extensions_mut().insert(identity);

    Ok(next.run(req).await)
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .ok_or(AuthError::Unauthorized)
    }
}

/// Caller for reads that tolerate anonymous access: the attached token's
/// user, or else the default user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserOrDefault(pub UserId);

impl<S> FromRequestParts<S> for UserOrDefault
where
    S: Send + Sync,
{
    type Rejection = AuthError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let attached = parts
            .extensions
            .get::<AttachedUser>()
            .ok_or(AuthError::Unauthorized)?;

        Ok(UserOrDefault(
            attached
                .claims
                .as_ref()
                .map_or(attached.fallback_user_id, |c| c.id),
        ))
    }
}
