//! PostgreSQL persistence for Hostly.
//!
//! One store per aggregate, each a thin `Clone` wrapper over a shared
//! [`PgPool`] implementing the matching `hostly-core` repository trait.
//! Queries use the runtime sqlx API with explicit row structs; domain types
//! are rebuilt at the boundary so the rest of the system never sees a raw
//! row.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod rows;
mod stores;

pub use stores::{
    PostgresBookingRepository, PostgresFavoriteRepository, PostgresPropertyRepository,
    PostgresSessionStore, PostgresUserRepository,
};

use hostly_core::{Error, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;

/// Connect to PostgreSQL with a small pool suited to a single service
/// instance.
///
/// # Errors
///
/// Returns [`Error::Database`] if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await
        .map_err(|e| Error::Database(format!("Failed to connect to PostgreSQL: {e}")))
}

/// Run the embedded migrations against the pool.
///
/// # Errors
///
/// Returns [`Error::Database`] if a migration fails.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::migrate!("./migrations")
        .run(pool)
        .await
        .map_err(|e| Error::Database(format!("Migration failed: {e}")))?;
    Ok(())
}

pub(crate) fn db_error(context: &str, e: sqlx::Error) -> Error {
    Error::Database(format!("{context}: {e}"))
}

pub(crate) fn is_unique_violation(e: &sqlx::Error) -> bool {
    matches!(e, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}
