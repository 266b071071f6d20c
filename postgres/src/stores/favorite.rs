//! PostgreSQL favorite repository.

use crate::rows::{FavoritePropertyRow, FavoriteRow};
use crate::{db_error, is_unique_violation};
use chrono::Utc;
use hostly_core::{
    Error, Favorite, FavoriteId, FavoriteProperty, FavoriteRepository, PropertyId, Result, UserId,
};
use sqlx::PgPool;

/// Favorites backed by the `favorites` table.
#[derive(Clone)]
pub struct PostgresFavoriteRepository {
    pool: PgPool,
}

impl PostgresFavoriteRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl FavoriteRepository for PostgresFavoriteRepository {
    async fn add_favorite(
        &self,
        traveler_id: UserId,
        property_id: PropertyId,
    ) -> Result<Favorite> {
        let row: FavoriteRow = sqlx::query_as(
            "INSERT INTO favorites (id, traveler_id, property_id, created_at)
             VALUES ($1, $2, $3, $4)
             RETURNING id, traveler_id, property_id, created_at",
        )
        .bind(FavoriteId::new().0)
        .bind(traveler_id.0)
        .bind(property_id.0)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                Error::Conflict("Property already in favorites".to_string())
            } else {
                db_error("Failed to add favorite", e)
            }
        })?;

        Ok(row.into_favorite())
    }

    async fn remove_favorite(&self, traveler_id: UserId, property_id: PropertyId) -> Result<()> {
        let result = sqlx::query(
            "DELETE FROM favorites WHERE traveler_id = $1 AND property_id = $2",
        )
        .bind(traveler_id.0)
        .bind(property_id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| db_error("Failed to remove favorite", e))?;

        if result.rows_affected() == 0 {
            return Err(Error::not_found("Favorite"));
        }
        Ok(())
    }

    async fn list_favorites(&self, traveler_id: UserId) -> Result<Vec<FavoriteProperty>> {
        let rows: Vec<FavoritePropertyRow> = sqlx::query_as(
            "SELECT p.id AS property_id, p.name, p.city, p.state, p.property_type,
                    p.price_per_night, p.bedrooms, p.bathrooms, p.max_guests, p.main_image,
                    f.created_at AS favorited_at
             FROM favorites f
             JOIN properties p ON p.id = f.property_id
             WHERE f.traveler_id = $1
             ORDER BY f.created_at DESC",
        )
        .bind(traveler_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list favorites", e))?;

        Ok(rows
            .into_iter()
            .map(FavoritePropertyRow::into_listing)
            .collect())
    }
}
