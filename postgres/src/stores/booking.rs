//! PostgreSQL booking repository.

use crate::db_error;
use crate::rows::{BookingRow, BookingWithPropertyRow};
use chrono::Utc;
use hostly_core::{
    Booking, BookingId, BookingRepository, BookingStatus, BookingWithProperty, Error, NewBooking,
    Result, UserId,
};
use sqlx::PgPool;

const BOOKING_COLUMNS: &str = "id, property_id, traveler_id, start_date, end_date, num_guests, \
     status, total_price, created_at, updated_at";

/// Bookings backed by the `bookings` table.
#[derive(Clone)]
pub struct PostgresBookingRepository {
    pool: PgPool,
}

impl PostgresBookingRepository {
    /// Create a repository over an existing pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn list_joined(&self, filter: &str, id: UserId) -> Result<Vec<BookingWithProperty>> {
        let rows: Vec<BookingWithPropertyRow> = sqlx::query_as(&format!(
            "SELECT b.id, b.property_id, b.traveler_id, b.start_date, b.end_date,
                    b.num_guests, b.status, b.total_price, b.created_at, b.updated_at,
                    p.name AS property_name, p.city AS property_city, p.state AS property_state
             FROM bookings b
             JOIN properties p ON p.id = b.property_id
             WHERE {filter}
             ORDER BY b.created_at DESC"
        ))
        .bind(id.0)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| db_error("Failed to list bookings", e))?;

        rows.into_iter()
            .map(BookingWithPropertyRow::into_listing)
            .collect()
    }
}

impl BookingRepository for PostgresBookingRepository {
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        let id = BookingId::new();
        let now = Utc::now();

        let row: BookingRow = sqlx::query_as(&format!(
            "INSERT INTO bookings
                (id, property_id, traveler_id, start_date, end_date, num_guests, status,
                 total_price, created_at, updated_at)
             VALUES ($1, $2, $3, $4, $5, $6, 'pending', $7, $8, $8)
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(id.0)
        .bind(booking.property_id.0)
        .bind(booking.traveler_id.0)
        .bind(booking.start_date)
        .bind(booking.end_date)
        .bind(booking.num_guests)
        .bind(booking.total_price)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| db_error("Failed to create booking", e))?;

        row.into_booking()
    }

    async fn get_booking(&self, booking_id: BookingId) -> Result<Booking> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = $1"
        ))
        .bind(booking_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to get booking", e))?;

        row.ok_or(Error::not_found("Booking"))?.into_booking()
    }

    async fn list_for_traveler(&self, traveler_id: UserId) -> Result<Vec<BookingWithProperty>> {
        self.list_joined("b.traveler_id = $1", traveler_id).await
    }

    async fn list_for_owner(&self, owner_id: UserId) -> Result<Vec<BookingWithProperty>> {
        self.list_joined("p.owner_id = $1", owner_id).await
    }

    async fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> Result<Booking> {
        let row: Option<BookingRow> = sqlx::query_as(&format!(
            "UPDATE bookings SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {BOOKING_COLUMNS}"
        ))
        .bind(booking_id.0)
        .bind(status.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("Failed to update booking status", e))?;

        row.ok_or(Error::not_found("Booking"))?.into_booking()
    }
}
