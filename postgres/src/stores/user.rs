//! PostgreSQL user repository.

use crate::rows::UserRow;
use crate::{db_error, is_unique_violation};
use chrono::Utc;
use hostly_core::{Error, NewUser, ProfileUpdate, Result, User, UserId, UserRepository};
use sqlx::PgPool;
use uuid::Uuid;

const USER_COLUMNS: &str = "id, name, email, password_hash, role, phone_number, about_me, \
     city, state, country, languages, gender, profile_image_url, created_at, updated_at";

/// User accounts backed by the `users` table.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl UserRepository for PostgresUserRepository {
    async fn create_user(&self, user: NewUser) -> Result<User> {
        let id = UserId::new();
        let now = Utc::now();
        let email = user.email.to_lowercase();

        let row: UserRow = sqlx::query_as(&format!(
            "INSERT INTO users (id, name, email, password_hash, role, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $6)
             RETURNING {USER_COLUMNS}"
        ))
        .bind(id.0)
        .bind(&user.name)
        .bind(&email)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("Email already exists".to_string())
            } else {
                db_error("Failed to create user", e)
            }
        })?;

        row.into_user()
    }

    async fn get_user_by_id(&self, user_id: UserId) -> Result<User> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
                .bind(user_id.0)
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to get user", e))?;

        row.ok_or(Error::not_found("User"))?.into_user()
    }

    async fn get_user_by_email(&self, email: &str) -> Result<User> {
        let row: Option<UserRow> =
            sqlx::query_as(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
                .bind(email.to_lowercase())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| db_error("Failed to get user", e))?;

        row.ok_or(Error::not_found("User"))?.into_user()
    }

    async fn email_exists(&self, email: &str) -> Result<bool> {
        let id: Option<Uuid> = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
            .bind(email.to_lowercase())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_error("Failed to check email", e))?;

        Ok(id.is_some())
    }

    async fn update_profile(&self, user_id: UserId, update: ProfileUpdate) -> Result<User> {
        let row: Option<UserRow> = sqlx::query_as(&format!(
            "UPDATE users SET
                name = COALESCE($2, name),
                email = COALESCE($3, email),
                phone_number = COALESCE($4, phone_number),
                about_me = COALESCE($5, about_me),
                city = COALESCE($6, city),
                state = COALESCE($7, state),
                country = COALESCE($8, country),
                languages = COALESCE($9, languages),
                gender = COALESCE($10, gender),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {USER_COLUMNS}"
        ))
        .bind(user_id.0)
        .bind(update.name)
        .bind(update.email.map(|e| e.to_lowercase()))
        .bind(update.phone_number)
        .bind(update.about_me)
        .bind(update.city)
        .bind(update.state)
        .bind(update.country)
        .bind(update.languages)
        .bind(update.gender)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("Email already exists".to_string())
            } else {
                db_error("Failed to update profile", e)
            }
        })?;

        row.ok_or(Error::not_found("User"))?.into_user()
    }
}
