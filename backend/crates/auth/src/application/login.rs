//! Login Use Case
//!
//! Verifies email + password and issues a token pair.

use std::sync::Arc;

use crate::application::AuthOutput;
use crate::application::config::AuthConfig;
use crate::application::register::validate_credentials;
use crate::application::token::TokenService;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login use case
pub struct LoginUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> LoginUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<AuthOutput> {
        let (email, password) = validate_credentials(input.email, input.password)?;

        // Unknown email and wrong password share one error
        let user = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        if !user.password_hash.verify(&password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        let tokens = TokenService::new(self.config.clone()).issue(&user)?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(AuthOutput { user, tokens })
    }
}
