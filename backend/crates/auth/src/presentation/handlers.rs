//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use kernel::extract::AppJson;
use std::sync::Arc;

use platform::cookie::{extract_cookie, set_cookie_header};

use crate::application::config::AuthConfig;
use crate::application::{
    AuthOutput, LoginInput, LoginUseCase, ProfileUseCase, RefreshUseCase, RegisterInput,
    RegisterUseCase,
};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AuthResponse, LoginRequest, MeasurementsRequest, RefreshRequest, RegisterRequest,
    UpdateProfileRequest, UserResponse,
};
use crate::presentation::middleware::CurrentUser;

/// Shared state for auth handlers
pub struct AuthAppState<R>
where
    R: UserRepository + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// Manual impl: the repository itself need not be Clone
impl<R> Clone for AuthAppState<R>
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

/// Auth response with the refresh token also set as an HttpOnly cookie
fn auth_response(config: &AuthConfig, output: &AuthOutput) -> Response {
    let cookie = config
        .refresh_cookie()
        .build_set_cookie(&output.tokens.refresh_token);

    (
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
        Json(AuthResponse::from(output)),
    )
        .into_response()
}

// ============================================================================
// Register / Login / Refresh / Logout
// ============================================================================

/// POST /register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<RegisterRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let input = RegisterInput {
        profile: req.profile_patch(),
        email: req.email,
        password: req.password,
    };

    let output = use_case.execute(input).await?;

    Ok(auth_response(&state.config, &output))
}

/// POST /login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    AppJson(req): AppJson<LoginRequest>,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let use_case = LoginUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(auth_response(&state.config, &output))
}

/// POST /refresh
///
/// The body is optional; `refreshToken` in a JSON body wins over the cookie.
pub async fn refresh<R>(
    State(state): State<AuthAppState<R>>,
    headers: HeaderMap,
    body: Bytes,
) -> AuthResult<Response>
where
    R: UserRepository + Send + Sync + 'static,
{
    let from_body = if body.iter().all(u8::is_ascii_whitespace) {
        None
    } else {
        serde_json::from_slice::<RefreshRequest>(&body)
            .map_err(|_| AuthError::InvalidField("Invalid JSON body".to_string()))?
            .refresh_token
            .filter(|t| !t.is_empty())
    };

    let token =
        from_body.or_else(|| extract_cookie(&headers, &state.config.refresh_cookie_name));

    let use_case = RefreshUseCase::new(state.repo.clone(), state.config.clone());
    let output = use_case.execute(token).await?;

    Ok(auth_response(&state.config, &output))
}

/// POST /logout
pub async fn logout<R>(State(state): State<AuthAppState<R>>) -> impl IntoResponse
where
    R: UserRepository + Send + Sync + 'static,
{
    let cookie = state.config.refresh_cookie().build_delete_cookie();

    (
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, set_cookie_header(&cookie))],
    )
}

// ============================================================================
// Profile
// ============================================================================

/// GET /me
pub async fn get_me<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let found = ProfileUseCase::new(state.repo.clone()).get(user.id).await?;
    Ok(Json(UserResponse::from(&found)))
}

/// PUT /me
pub async fn update_me<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
    AppJson(req): AppJson<UpdateProfileRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let updated = ProfileUseCase::new(state.repo.clone())
        .update(user.id, req.into())
        .await?;
    Ok(Json(UserResponse::from(&updated)))
}

/// PUT /me/measurements
pub async fn update_measurements<R>(
    State(state): State<AuthAppState<R>>,
    user: CurrentUser,
    AppJson(req): AppJson<MeasurementsRequest>,
) -> AuthResult<Json<UserResponse>>
where
    R: UserRepository + Send + Sync + 'static,
{
    let updated = ProfileUseCase::new(state.repo.clone())
        .update_measurements(user.id, req.into())
        .await?;
    Ok(Json(UserResponse::from(&updated)))
}
