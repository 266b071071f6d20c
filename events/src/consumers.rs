//! Notification consumers for booking events.
//!
//! Two long-running loops mirror the two sides of the marketplace: the owner
//! consumer watches `booking-created` (a new request for one of the owner's
//! properties), the traveler consumer watches `booking-status-updated` (the
//! owner decided). Each re-fetches the booking to confirm it still exists,
//! logs the notification, and commits the offset manually after processing.
//!
//! Delivery of the actual notification (email, push) is out of scope; the
//! log line is the hand-off point.

use futures::StreamExt;
use hostly_core::{
    BookingCreated, BookingId, BookingRepository, BookingStatusUpdated, EventError,
    BOOKING_CREATED_TOPIC, BOOKING_STATUS_UPDATED_TOPIC,
};
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::Message;
use serde::de::DeserializeOwned;

/// Consumer group for the owner-side notification loop.
pub const OWNER_GROUP: &str = "owner-service-group";

/// Consumer group for the traveler-side notification loop.
pub const TRAVELER_GROUP: &str = "traveler-service-group";

fn create_consumer(brokers: &str, group: &str, topic: &str) -> Result<StreamConsumer, EventError> {
    let consumer: StreamConsumer = ClientConfig::new()
        .set("bootstrap.servers", brokers)
        .set("group.id", group)
        .set("enable.auto.commit", "false")
        .set("auto.offset.reset", "latest")
        .set("session.timeout.ms", "6000")
        .set("enable.partition.eof", "false")
        .create()
        .map_err(|e| EventError::SubscriptionFailed {
            topic: topic.to_string(),
            reason: format!("Failed to create consumer: {e}"),
        })?;

    consumer
        .subscribe(&[topic])
        .map_err(|e| EventError::SubscriptionFailed {
            topic: topic.to_string(),
            reason: format!("Failed to subscribe: {e}"),
        })?;

    tracing::info!(topic, group, "Consumer subscribed");
    Ok(consumer)
}

async fn consume_loop<E, F, Fut>(consumer: StreamConsumer, topic: &'static str, mut handle: F)
where
    E: DeserializeOwned,
    F: FnMut(E) -> Fut,
    Fut: std::future::Future<Output = ()>,
{
    let mut stream = consumer.stream();

    while let Some(msg_result) = stream.next().await {
        match msg_result {
            Ok(message) => {
                match message
                    .payload()
                    .ok_or_else(|| EventError::DecodeFailed("Message has no payload".to_string()))
                    .and_then(|payload| {
                        serde_json::from_slice::<E>(payload)
                            .map_err(|e| EventError::DecodeFailed(e.to_string()))
                    }) {
                    Ok(event) => handle(event).await,
                    Err(e) => {
                        tracing::warn!(topic, error = %e, "Skipping undecodable event");
                    }
                }

                // Commit after processing, even for undecodable payloads;
                // redelivering those would never succeed.
                if let Err(e) = consumer.commit_message(&message, CommitMode::Async) {
                    tracing::warn!(topic, error = %e, "Failed to commit offset");
                }
            }
            Err(e) => {
                tracing::error!(topic, error = %e, "Failed to receive message");
            }
        }
    }

    tracing::debug!(topic, "Consumer loop exiting");
}

async fn refetch<B: BookingRepository>(bookings: &B, booking_id: BookingId) -> bool {
    match bookings.get_booking(booking_id).await {
        Ok(_) => true,
        Err(e) => {
            tracing::warn!(booking_id = %booking_id, error = %e, "Booking gone, dropping event");
            false
        }
    }
}

/// Run the owner-side consumer until the broker connection ends.
///
/// # Errors
///
/// Returns [`EventError::SubscriptionFailed`] if the consumer cannot be
/// created or subscribed.
pub async fn run_owner_consumer<B: BookingRepository>(
    brokers: &str,
    bookings: B,
) -> Result<(), EventError> {
    let consumer = create_consumer(brokers, OWNER_GROUP, BOOKING_CREATED_TOPIC)?;

    let bookings = &bookings;
    consume_loop(consumer, BOOKING_CREATED_TOPIC, move |event: BookingCreated| async move {
        if refetch(bookings, event.id).await {
            tracing::info!(
                booking_id = %event.id,
                property_id = %event.property_id,
                start_date = %event.start_date,
                end_date = %event.end_date,
                num_guests = event.num_guests,
                total_price = event.total_price,
                "New booking request for owner"
            );
        }
    })
    .await;

    Ok(())
}

/// Run the traveler-side consumer until the broker connection ends.
///
/// # Errors
///
/// Returns [`EventError::SubscriptionFailed`] if the consumer cannot be
/// created or subscribed.
pub async fn run_traveler_consumer<B: BookingRepository>(
    brokers: &str,
    bookings: B,
) -> Result<(), EventError> {
    let consumer = create_consumer(brokers, TRAVELER_GROUP, BOOKING_STATUS_UPDATED_TOPIC)?;

    let bookings = &bookings;
    consume_loop(
        consumer,
        BOOKING_STATUS_UPDATED_TOPIC,
        move |event: BookingStatusUpdated| async move {
            if refetch(bookings, event.id).await {
                tracing::info!(
                    booking_id = %event.id,
                    traveler_id = %event.traveler_id,
                    status = event.status.as_str(),
                    "Booking status changed for traveler"
                );
            }
        },
    )
    .await;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use hostly_core::mocks::MemoryBackend;
    use hostly_core::{NewBooking, PropertyId, UserId};

    #[tokio::test]
    async fn refetch_reports_presence() {
        let backend = MemoryBackend::new();
        let booking = backend
            .create_booking(NewBooking {
                property_id: PropertyId::new(),
                traveler_id: UserId::new(),
                start_date: "2030-06-01".parse().unwrap(),
                end_date: "2030-06-04".parse().unwrap(),
                num_guests: 2,
                total_price: 300.0,
            })
            .await
            .unwrap();

        assert!(refetch(&backend, booking.id).await);
        assert!(!refetch(&backend, BookingId::new()).await);
    }
}
