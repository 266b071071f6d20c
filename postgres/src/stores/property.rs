//! PostgreSQL property repository.

use crate::db_error;
use crate::rows::PropertyRow;
use chrono::Utc;
use hostly_core::{
    Error, NewProperty, Property, PropertyId, PropertyRepository, PropertySearch, Result, UserId,
};
use sqlx::PgPool;
use std::collections::HashMap;
use uuid::Uuid;

const PROPERTY_COLUMNS: &str = "id, owner_id, name, description, city, state, country, \
     property_type, price_per_night, bedrooms, bathrooms, max_guests, amenities, main_image, \
     tax_rate, created_at, updated_at";

/// Listings backed by the `properties` table.
#[derive(Clone)]
pub struct PostgresPropertyRepository {
    pool: PgPool,
}

impl PostgresPropertyRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl PropertyRepository for PostgresPropertyRepository {
    async fn create_property(&self, property: NewProperty) -> Result<Property> {
        let id = PropertyId::new();
        let now = Utc::now();

        let row: PropertyRow = sqlx::query_as(&format!(
            "INSERT INTO properties
                (id, owner_id, name, description, city, state, country, property_type,
                 price_per_night, bedrooms, bathrooms, max_guests, amenities, main_image,
                 tax_rate, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $16)
             RETURNING {PROPERTY_COLUMNS}"
        ))
        .bind(id.0)
        .bind(property.owner_id.0)
        .bind(&property.name)
        .bind(&property.description)
        .bind(&property.city)
        .bind(&property.state)
        .bind(&property.country)
        .bind(&property.property_type)
        .bind(property.price_per_night)
        .bind(property.bedrooms)
        .bind(property.bathrooms)
        .bind(property.max_guests)
        .bind(&property.amenities)
        .bind(&property.main_image)
        .bind(property.tax_rate)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create property", e))?;

        Ok(row.into_property())
    }

    async fn get_property(&self, property_id: PropertyId) -> Result<Property> {
        let row: Option<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties WHERE id = $1"
        ))
        .bind(property_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get property", e))?;

        Ok(row.ok_or(Error::not_found("Property"))?.into_property())
    }

    async fn search(&self, search: &PropertySearch) -> Result<Vec<Property>> {
        // Location matches city, state or country as a case-insensitive
        // substring. Absent filters collapse to TRUE.
        let rows: Vec<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties
             WHERE ($1::text IS NULL
                    OR city ILIKE '%' || $1 || '%'
                    OR state ILIKE '%' || $1 || '%'
                    OR country ILIKE '%' || $1 || '%')
               AND ($2::int IS NULL OR max_guests >= $2)
             ORDER BY created_at DESC"
        ))
        .bind(&search.location)
        .bind(search.guests)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to search properties", e))?;

        Ok(rows.into_iter().map(PropertyRow::into_property).collect())
    }

    async fn list_by_owner(&self, owner_id: UserId) -> Result<Vec<Property>> {
        let rows: Vec<PropertyRow> = sqlx::query_as(&format!(
            "SELECT {PROPERTY_COLUMNS} FROM properties
             WHERE owner_id = $1
             ORDER BY created_at DESC"
        ))
        .bind(owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list properties", e))?;

        Ok(rows.into_iter().map(PropertyRow::into_property).collect())
    }

    async fn accepted_booking_counts(
        &self,
        owner_id: UserId,
    ) -> Result<HashMap<PropertyId, i64>> {
        let rows: Vec<(Uuid, i64)> = sqlx::query_as(
            "SELECT b.property_id, COUNT(*)
             FROM bookings b
             JOIN properties p ON p.id = b.property_id
             WHERE p.owner_id = $1 AND b.status = 'accepted'
             GROUP BY b.property_id",
        )
        .bind(owner_id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to count accepted bookings", e))?;

        Ok(rows
            .into_iter()
            .map(|(id, count)| (PropertyId(id), count))
            .collect())
    }
}
