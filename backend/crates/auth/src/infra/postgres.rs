//! PostgreSQL Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::UserId;
use platform::password::HashedPassword;
use sqlx::PgPool;
use sqlx::types::Json;

use crate::domain::entity::user::{ExercisePreferences, Measurements, NewUser, Profile, User};
use crate::domain::repository::UserRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

const USER_COLUMNS: &str = r#"
    user_id,
    email,
    password_hash,
    name,
    age,
    gender,
    height_cm,
    weight_kg,
    neck_cm,
    waist_cm,
    hip_cm,
    biceps_cm,
    thigh_cm,
    goal,
    activity_level,
    exercise_preferences,
    created_at,
    updated_at
"#;

/// PostgreSQL-backed user repository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Make sure the guest user row exists so guest-mode requests resolve.
    ///
    /// Callers pass the hash of a random password, so the account cannot
    /// be logged into.
    pub async fn ensure_guest_user(
        &self,
        id: UserId,
        password_hash: &HashedPassword,
    ) -> AuthResult<()> {
        let inserted = sqlx::query(
            r#"
            INSERT INTO users (user_id, email, password_hash, name)
            VALUES ($1, $2, $3, 'Guest')
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(id.value())
        .bind(format!("guest-{}@localhost.invalid", id))
        .bind(password_hash.as_phc_string())
        .execute(&self.pool)
        .await?
        .rows_affected();

        if inserted > 0 {
            // Keep the sequence ahead of the explicitly inserted id
            sqlx::query(
                "SELECT setval(pg_get_serial_sequence('users', 'user_id'), GREATEST((SELECT MAX(user_id) FROM users), 1))",
            )
            .execute(&self.pool)
            .await?;
            tracing::info!(user_id = %id, "Created guest user");
        }

        Ok(())
    }
}

// ============================================================================
// User Repository Implementation
// ============================================================================

impl UserRepository for PgUserRepository {
    async fn create(&self, user: &NewUser) -> AuthResult<User> {
        let p = &user.profile;
        let sql = format!(
            r#"
            INSERT INTO users (
                email,
                password_hash,
                name,
                age,
                gender,
                height_cm,
                weight_kg,
                neck_cm,
                waist_cm,
                hip_cm,
                biceps_cm,
                thigh_cm,
                goal,
                activity_level,
                exercise_preferences
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(user.email.as_str())
            .bind(user.password_hash.as_phc_string())
            .bind(&p.name)
            .bind(p.age)
            .bind(&p.gender)
            .bind(p.height_cm)
            .bind(p.weight_kg)
            .bind(p.measurements.neck_cm)
            .bind(p.measurements.waist_cm)
            .bind(p.measurements.hip_cm)
            .bind(p.measurements.biceps_cm)
            .bind(p.measurements.thigh_cm)
            .bind(&p.goal)
            .bind(&p.activity_level)
            .bind(p.exercise_preferences.as_ref().map(Json))
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match &e {
                sqlx::Error::Database(db) if db.is_unique_violation() => AuthError::EmailTaken,
                _ => AuthError::Database(e),
            })?;

        row.into_user()
    }

    async fn find_by_id(&self, id: UserId) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE user_id = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.value())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(email.as_str())
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)")
                .bind(email.as_str())
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn update_profile(&self, id: UserId, profile: &Profile) -> AuthResult<Option<User>> {
        let sql = format!(
            r#"
            UPDATE users SET
                name = $2,
                age = $3,
                gender = $4,
                height_cm = $5,
                weight_kg = $6,
                neck_cm = $7,
                waist_cm = $8,
                hip_cm = $9,
                biceps_cm = $10,
                thigh_cm = $11,
                goal = $12,
                activity_level = $13,
                exercise_preferences = $14,
                updated_at = NOW()
            WHERE user_id = $1
            RETURNING {USER_COLUMNS}
            "#
        );

        let row = sqlx::query_as::<_, UserRow>(&sql)
            .bind(id.value())
            .bind(&profile.name)
            .bind(profile.age)
            .bind(&profile.gender)
            .bind(profile.height_cm)
            .bind(profile.weight_kg)
            .bind(profile.measurements.neck_cm)
            .bind(profile.measurements.waist_cm)
            .bind(profile.measurements.hip_cm)
            .bind(profile.measurements.biceps_cm)
            .bind(profile.measurements.thigh_cm)
            .bind(&profile.goal)
            .bind(&profile.activity_level)
            .bind(profile.exercise_preferences.as_ref().map(Json))
            .fetch_optional(&self.pool)
            .await?;

        row.map(UserRow::into_user).transpose()
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct UserRow {
    user_id: i64,
    email: String,
    password_hash: String,
    name: Option<String>,
    age: Option<i32>,
    gender: Option<String>,
    height_cm: Option<f64>,
    weight_kg: Option<f64>,
    neck_cm: Option<f64>,
    waist_cm: Option<f64>,
    hip_cm: Option<f64>,
    biceps_cm: Option<f64>,
    thigh_cm: Option<f64>,
    goal: Option<String>,
    activity_level: Option<String>,
    exercise_preferences: Option<Json<ExercisePreferences>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl UserRow {
    fn into_user(self) -> AuthResult<User> {
        let password_hash = HashedPassword::from_phc_string(self.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password_hash: {}", e)))?;

        Ok(User {
            id: UserId::from_raw(self.user_id),
            email: Email::from_db(self.email),
            password_hash,
            profile: Profile {
                name: self.name,
                age: self.age,
                gender: self.gender,
                height_cm: self.height_cm,
                weight_kg: self.weight_kg,
                goal: self.goal,
                activity_level: self.activity_level,
                exercise_preferences: self.exercise_preferences.map(|Json(p)| p),
                measurements: Measurements {
                    neck_cm: self.neck_cm,
                    waist_cm: self.waist_cm,
                    hip_cm: self.hip_cm,
                    biceps_cm: self.biceps_cm,
                    thigh_cm: self.thigh_cm,
                },
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
