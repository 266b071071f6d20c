//! Booking event payloads and the publisher seam.
//!
//! Events are a best-effort side channel: the database is the source of
//! truth, consumers only log, and a failed publish never fails the request
//! that triggered it.

use crate::booking::{Booking, BookingStatus};
use crate::ids::{BookingId, PropertyId, UserId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::future::Future;
use thiserror::Error;

/// Topic carrying [`BookingCreated`] events.
pub const BOOKING_CREATED_TOPIC: &str = "booking-created";

/// Topic carrying [`BookingStatusUpdated`] events.
pub const BOOKING_STATUS_UPDATED_TOPIC: &str = "booking-status-updated";

/// Errors raised by event publishing and consumption.
#[derive(Debug, Error)]
pub enum EventError {
    /// Could not reach or configure the broker.
    #[error("Event bus connection failed: {0}")]
    ConnectionFailed(String),

    /// Publish to a topic failed.
    #[error("Failed to publish to {topic}: {reason}")]
    PublishFailed {
        /// Destination topic.
        topic: String,
        /// Broker/client error detail.
        reason: String,
    },

    /// Subscription setup failed.
    #[error("Failed to subscribe to {topic}: {reason}")]
    SubscriptionFailed {
        /// Requested topic.
        topic: String,
        /// Broker/client error detail.
        reason: String,
    },

    /// A received payload could not be decoded.
    #[error("Failed to decode event: {0}")]
    DecodeFailed(String),
}

/// Emitted after a booking row is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingCreated {
    /// Booking id.
    pub id: BookingId,
    /// Booked property.
    pub property_id: PropertyId,
    /// Booking traveler.
    pub traveler_id: UserId,
    /// Check-in date.
    pub start_date: NaiveDate,
    /// Check-out date.
    pub end_date: NaiveDate,
    /// Party size.
    pub num_guests: i32,
    /// Status at creation (always pending).
    pub status: BookingStatus,
    /// Quoted total.
    pub total_price: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl From<&Booking> for BookingCreated {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            property_id: booking.property_id,
            traveler_id: booking.traveler_id,
            start_date: booking.start_date,
            end_date: booking.end_date,
            num_guests: booking.num_guests,
            status: booking.status,
            total_price: booking.total_price,
            created_at: booking.created_at,
        }
    }
}

/// Emitted after an accept/cancel transition is persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingStatusUpdated {
    /// Booking id.
    pub id: BookingId,
    /// Booked property.
    pub property_id: PropertyId,
    /// Booking traveler.
    pub traveler_id: UserId,
    /// New status.
    pub status: BookingStatus,
    /// Transition timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Booking> for BookingStatusUpdated {
    fn from(booking: &Booking) -> Self {
        Self {
            id: booking.id,
            property_id: booking.property_id,
            traveler_id: booking.traveler_id,
            status: booking.status,
            updated_at: booking.updated_at,
        }
    }
}

/// Publisher seam for booking events.
///
/// Implementations: the Kafka bus in `hostly-events`, and
/// [`NoopEventPublisher`] for running without a broker.
/// Callers spawn publishes fire-and-forget and log failures; an error from
/// here must never surface to an HTTP response.
pub trait EventPublisher: Send + Sync {
    /// Publish a [`BookingCreated`] event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::PublishFailed`] when the broker rejects or times
    /// out the send.
    fn publish_booking_created(
        &self,
        event: &BookingCreated,
    ) -> impl Future<Output = Result<(), EventError>> + Send;

    /// Publish a [`BookingStatusUpdated`] event.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::PublishFailed`] when the broker rejects or times
    /// out the send.
    fn publish_booking_status_updated(
        &self,
        event: &BookingStatusUpdated,
    ) -> impl Future<Output = Result<(), EventError>> + Send;
}

/// Publisher that drops every event.
///
/// This is the "continue without Kafka" path: when no broker is configured
/// the application runs identically, minus the side channel.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEventPublisher;

impl EventPublisher for NoopEventPublisher {
    fn publish_booking_created(
        &self,
        event: &BookingCreated,
    ) -> impl Future<Output = Result<(), EventError>> + Send {
        tracing::debug!(booking_id = %event.id, "Event bus not configured, dropping booking-created event");
        async { Ok(()) }
    }

    fn publish_booking_status_updated(
        &self,
        event: &BookingStatusUpdated,
    ) -> impl Future<Output = Result<(), EventError>> + Send {
        tracing::debug!(booking_id = %event.id, "Event bus not configured, dropping booking-status-updated event");
        async { Ok(()) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn booking_created_json_shape() {
        let event = BookingCreated {
            id: BookingId::new(),
            property_id: PropertyId::new(),
            traveler_id: UserId::new(),
            start_date: "2024-06-01".parse().unwrap(),
            end_date: "2024-06-04".parse().unwrap(),
            num_guests: 2,
            status: BookingStatus::Pending,
            total_price: 300.0,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["status"], "pending");
        assert_eq!(json["num_guests"], 2);
        assert_eq!(json["start_date"], "2024-06-01");
        let decoded: BookingCreated = serde_json::from_value(json).unwrap();
        assert_eq!(decoded, event);
    }
}
