//! In-memory user repository for unit tests (also behind `test-util`)

use std::sync::Mutex;

use chrono::Utc;
use kernel::id::UserId;
use platform::password::ClearTextPassword;

use crate::domain::entity::user::{NewUser, Profile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
    /// Repository seeded with one user whose password is `secret123`
    pub fn with_user(id: i64, email: &str) -> Self {
        let hash = ClearTextPassword::new("secret123".to_string())
            .unwrap()
            .hash(None)
            .unwrap();
        let user = User {
            id: UserId::from_raw(id),
            email: Email::new(email).unwrap(),
            password_hash: hash,
            profile: Profile::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        Self {
            users: Mutex::new(vec![user]),
        }
    }

    pub fn remove(&self, id: UserId) {
        self.users.lock().unwrap().retain(|u| u.id != id);
    }
}

impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        let next_id = users.iter().map(|u| u.id.value()).max().unwrap_or(0) + 1;
        let now = Utc::now();
        let created = User {
            id: UserId::from_raw(next_id),
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            profile: user.profile.clone(),
            created_at: now,
            updated_at: now,
        };
        users.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| &u.email == email)
            .cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.users.lock().unwrap().iter().any(|u| &u.email == email))
    }

    async fn update_profile(&self, id: UserId, profile: &Profile) -> AuthResult<Option<User>> {
        let mut users = self.users.lock().unwrap();
        let Some(user) = users.iter_mut().find(|u| u.id == id) else {
            return Ok(None);
        };
        user.profile = profile.clone();
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}
