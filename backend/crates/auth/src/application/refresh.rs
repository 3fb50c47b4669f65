//! Refresh Use Case
//!
//! Exchanges a valid refresh token for a new token pair.

use std::sync::Arc;

use crate::application::AuthOutput;
use crate::application::config::AuthConfig;
use crate::application::token::{TokenKind, TokenService};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Refresh use case
pub struct RefreshUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RefreshUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, refresh_token: Option<String>) -> AuthResult<AuthOutput> {
        let token = refresh_token
            .filter(|t| !t.trim().is_empty())
            .ok_or(AuthError::MissingRefreshToken)?;

        let service = TokenService::new(self.config.clone());
        let claims = service
            .verify(&token, TokenKind::Refresh)
            .ok_or(AuthError::InvalidRefreshToken)?;

        let user = self
            .repo
            .find_by_id(claims.id)
            .await?
            .ok_or(AuthError::InvalidRefreshToken)?;

        let tokens = service.issue(&user)?;

        tracing::debug!(user_id = %user.id, "Tokens refreshed");

        Ok(AuthOutput { user, tokens })
    }
}
