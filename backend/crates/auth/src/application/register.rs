//! Register Use Case
//!
//! Creates a new account and signs it in.

use std::sync::Arc;

use kernel::error::app_error::FieldError;
use platform::password::ClearTextPassword;

use crate::application::AuthOutput;
use crate::application::config::AuthConfig;
use crate::application::token::TokenService;
use crate::domain::entity::user::{NewUser, Profile, ProfilePatch};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub email: String,
    pub password: String,
    /// Optional profile fields supplied at sign-up
    pub profile: ProfilePatch,
}

/// Register use case
pub struct RegisterUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> RegisterUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<AuthOutput> {
        let (email, password) = validate_credentials(input.email, input.password)?;

        let profile_errors = input.profile.validate();
        if !profile_errors.is_empty() {
            return Err(AuthError::Validation(profile_errors));
        }

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = password
            .hash(self.config.pepper())
            .map_err(|e| AuthError::Internal(e.to_string()))?;

        let mut profile = Profile::default();
        input.profile.apply(&mut profile);

        let user = self
            .repo
            .create(&NewUser {
                email,
                password_hash,
                profile,
            })
            .await?;

        let tokens = TokenService::new(self.config.clone()).issue(&user)?;

        tracing::info!(
            user_id = %user.id,
            email_domain = %user.email.domain(),
            "User registered"
        );

        Ok(AuthOutput { user, tokens })
    }
}

/// Email format and password policy, reported together as field errors
pub(crate) fn validate_credentials(
    email: String,
    password: String,
) -> AuthResult<(Email, ClearTextPassword)> {
    let mut errors = Vec::new();

    let email = Email::new(email)
        .map_err(|e| errors.push(FieldError::new("email", e.message().to_string())))
        .ok();
    let password = ClearTextPassword::new(password)
        .map_err(|e| errors.push(FieldError::new("password", e.to_string())))
        .ok();

    match (email, password) {
        (Some(email), Some(password)) => Ok((email, password)),
        _ => Err(AuthError::Validation(errors)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::InMemoryUserRepository;

    fn use_case(repo: &Arc<InMemoryUserRepository>) -> RegisterUseCase<InMemoryUserRepository> {
        RegisterUseCase::new(repo.clone(), Arc::new(AuthConfig::development()))
    }

    fn input(email: &str, password: &str) -> RegisterInput {
        RegisterInput {
            email: email.to_string(),
            password: password.to_string(),
            profile: ProfilePatch::default(),
        }
    }

    #[tokio::test]
    async fn test_register_creates_user_and_tokens() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let mut input = input("New@Example.com", "secret123");
        input.profile.weight_kg = Some(Some(70.0));

        let output = use_case(&repo).execute(input).await.unwrap();

        assert_eq!(output.user.email.as_str(), "new@example.com");
        assert_eq!(output.user.profile.weight_kg, Some(70.0));
        assert!(!output.tokens.access_token.is_empty());
        assert_ne!(output.user.password_hash.as_phc_string(), "secret123");
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let repo = Arc::new(InMemoryUserRepository::default());
        use_case(&repo)
            .execute(input("dup@example.com", "secret123"))
            .await
            .unwrap();

        let err = use_case(&repo)
            .execute(input("DUP@example.com", "another1"))
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::EmailTaken));
    }

    #[tokio::test]
    async fn test_register_reports_all_field_errors() {
        let repo = Arc::new(InMemoryUserRepository::default());
        let err = use_case(&repo)
            .execute(input("bad", "123"))
            .await
            .unwrap_err();

        let AuthError::Validation(errors) = err else {
            panic!("expected validation error");
        };
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_ref()).collect();
        assert_eq!(fields, vec!["email", "password"]);
    }
}
