//! Identity Resolution
//!
//! Decides which user a request acts as: the bearer token's subject, or
//! the configured default user when guest mode allows it.

use std::sync::Arc;

use kernel::id::UserId;

use crate::application::config::AuthConfig;
use crate::application::token::Claims;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Resolved caller of a protected route
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: UserId,
    pub email: String,
    /// True when no token was presented and the guest fallback was used
    pub is_guest: bool,
}

pub struct ResolveIdentityUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ResolveIdentityUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// Resolve from already-verified claims, falling back to the guest user
    pub async fn execute(&self, claims: Option<&Claims>) -> AuthResult<Identity> {
        let (id, is_guest) = match claims {
            Some(claims) => (claims.id, false),
            None if self.config.allow_guest_mode => (self.config.default_user_id, true),
            None => return Err(AuthError::Unauthorized),
        };

        let user = self
            .repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UnknownUser)?;

        Ok(Identity {
            id: user.id,
            email: user.email.as_str().to_string(),
            is_guest,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn claims(id: i64) -> Claims {
        Claims {
            id: UserId::from_raw(id),
            email: "x@example.com".into(),
            iat: 0,
            exp: i64::MAX,
        }
    }

    #[tokio::test]
    async fn test_token_user() {
        let repo = Arc::new(InMemoryUserRepository::with_user(7, "seven@example.com"));
        let identity = ResolveIdentityUseCase::new(repo, Arc::new(AuthConfig::development()))
            .execute(Some(&claims(7)))
            .await
            .unwrap();
        assert_eq!(identity.id, UserId::from_raw(7));
        assert_eq!(identity.email, "seven@example.com");
        assert!(!identity.is_guest);
    }

    #[tokio::test]
    async fn test_guest_fallback() {
        let repo = Arc::new(InMemoryUserRepository::with_user(1, "guest@example.com"));
        let identity = ResolveIdentityUseCase::new(repo, Arc::new(AuthConfig::development()))
            .execute(None)
            .await
            .unwrap();
        assert_eq!(identity.id, UserId::from_raw(1));
        assert!(identity.is_guest);
    }

    #[tokio::test]
    async fn test_guest_mode_disabled() {
        let repo = Arc::new(InMemoryUserRepository::with_user(1, "guest@example.com"));
        let config = AuthConfig {
            allow_guest_mode: false,
            ..AuthConfig::development()
        };
        let err = ResolveIdentityUseCase::new(repo, Arc::new(config))
            .execute(None)
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Unauthorized));
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let err = ResolveIdentityUseCase::new(repo, Arc::new(AuthConfig::development()))
            .execute(Some(&claims(99)))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UnknownUser));
    }
}
