//! Profile Use Case
//!
//! Reads and partially updates the current user's profile.

use std::sync::Arc;

use kernel::id::UserId;

use crate::domain::entity::user::{MeasurementsPatch, ProfilePatch, User};
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

pub struct ProfileUseCase<R>
where
    R: UserRepository,
{
    repo: Arc<R>,
}

impl<R> ProfileUseCase<R>
where
    R: UserRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn get(&self, id: UserId) -> AuthResult<User> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AuthError::UserNotFound)
    }

    pub async fn update(&self, id: UserId, patch: ProfilePatch) -> AuthResult<User> {
        let errors = patch.validate();
        if !errors.is_empty() {
            return Err(AuthError::Validation(errors));
        }

        let mut user = self.get(id).await?;
        patch.apply(&mut user.profile);

        let updated = self
            .repo
            .update_profile(id, &user.profile)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(user_id = %id, "Profile updated");
        Ok(updated)
    }

    pub async fn update_measurements(
        &self,
        id: UserId,
        patch: MeasurementsPatch,
    ) -> AuthResult<User> {
        self.update(
            id,
            ProfilePatch {
                measurements: patch,
                ..Default::default()
            },
        )
        .await
    }
}
