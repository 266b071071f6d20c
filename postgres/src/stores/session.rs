//! PostgreSQL session store.
//!
//! Expiry is checked in Rust against the wall clock and expired rows are
//! deleted lazily on read, so a crashed cleanup job can never resurrect a
//! stale login.

use crate::db_error;
use crate::rows::SessionRow;
use chrono::Utc;
use hostly_core::{Error, Result, Session, SessionId, SessionStore, UserId};
use sqlx::PgPool;

/// Sessions backed by the `sessions` table.
#[derive(Clone)]
pub struct PostgresSessionStore {
    pool: PgPool,
}

impl PostgresSessionStore {
    /// Create a store over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl SessionStore for PostgresSessionStore {
    async fn create_session(&self, session: &Session) -> Result<()> {
        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, expires_at, last_active)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(session.id.0)
        .bind(session.user_id.0)
        .bind(session.created_at)
        .bind(session.expires_at)
        .bind(session.last_active)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create session", e))?;

        Ok(())
    }

    async fn get_session(&self, session_id: SessionId) -> Result<Session> {
        let row: Option<SessionRow> = sqlx::query_as(
            "SELECT id, user_id, created_at, expires_at, last_active
             FROM sessions WHERE id = $1",
        )
        .bind(session_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get session", e))?;

        let mut session = row.ok_or(Error::SessionNotFound)?.into_session();

        let now = Utc::now();
        if session.is_expired(now) {
            sqlx::query("DELETE FROM sessions WHERE id = $1")
                .bind(session_id.0)
                .execute(&self.pool)
                .await
                .map_err(|e| db_error("Failed to delete expired session", e))?;
            return Err(Error::SessionExpired);
        }

        sqlx::query("UPDATE sessions SET last_active = $2 WHERE id = $1")
            .bind(session_id.0)
            .bind(now)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to touch session", e))?;
        session.last_active = now;

        Ok(session)
    }

    async fn delete_session(&self, session_id: SessionId) -> Result<()> {
        sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(session_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete session", e))?;

        Ok(())
    }

    async fn delete_user_sessions(&self, user_id: UserId) -> Result<usize> {
        let result = sqlx::query("DELETE FROM sessions WHERE user_id = $1")
            .bind(user_id.0)
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("Failed to delete user sessions", e))?;

        #[allow(clippy::cast_possible_truncation)]
        Ok(result.rows_affected() as usize)
    }
}
