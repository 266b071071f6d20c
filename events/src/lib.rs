//! Kafka event bus for Hostly booking events.
//!
//! Implements the [`EventPublisher`] seam from `hostly-core` over rdkafka.
//! Payloads are JSON keyed by booking id, so all events for one booking land
//! on the same partition and replay in order. Works against Apache Kafka,
//! Redpanda, or any Kafka-compatible broker.
//!
//! Delivery is at-least-once: the [`consumers`] use manual offset commits
//! after processing, and since consumers only log, redelivery is harmless.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod consumers;

use hostly_core::{
    BookingCreated, BookingStatusUpdated, EventError, EventPublisher, BOOKING_CREATED_TOPIC,
    BOOKING_STATUS_UPDATED_TOPIC,
};
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::util::Timeout;
use serde::Serialize;
use std::time::Duration;

/// Kafka-backed publisher for booking events.
///
/// # Example
///
/// ```no_run
/// use hostly_events::KafkaEventBus;
///
/// # fn example() -> Result<(), hostly_core::EventError> {
/// let bus = KafkaEventBus::new("localhost:9092")?;
///
/// let tuned = KafkaEventBus::builder()
///     .brokers("localhost:9092,localhost:9093")
///     .producer_acks("all")
///     .compression("lz4")
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct KafkaEventBus {
    producer: FutureProducer,
    brokers: String,
    timeout: Duration,
}

impl std::fmt::Debug for KafkaEventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KafkaEventBus")
            .field("brokers", &self.brokers)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl KafkaEventBus {
    /// Create a bus with default configuration.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::ConnectionFailed`] if the producer cannot be
    /// created.
    pub fn new(brokers: &str) -> Result<Self, EventError> {
        Self::builder().brokers(brokers).build()
    }

    /// Create a builder for custom configuration.
    #[must_use]
    pub fn builder() -> KafkaEventBusBuilder {
        KafkaEventBusBuilder::default()
    }

    /// Broker addresses this bus was built with.
    #[must_use]
    pub fn brokers(&self) -> &str {
        &self.brokers
    }

    async fn publish_json<T: Serialize>(
        &self,
        topic: &'static str,
        key: &str,
        event: &T,
    ) -> Result<(), EventError> {
        let payload =
            serde_json::to_vec(event).map_err(|e| EventError::PublishFailed {
                topic: topic.to_string(),
                reason: format!("Failed to serialize event: {e}"),
            })?;

        let record = FutureRecord::to(topic).payload(&payload).key(key);

        match self.producer.send(record, Timeout::After(self.timeout)).await {
            Ok((partition, offset)) => {
                tracing::debug!(
                    topic,
                    partition,
                    offset,
                    booking_id = %key,
                    "Event published"
                );
                Ok(())
            }
            Err((kafka_error, _)) => {
                tracing::error!(topic, error = %kafka_error, "Failed to publish event");
                Err(EventError::PublishFailed {
                    topic: topic.to_string(),
                    reason: kafka_error.to_string(),
                })
            }
        }
    }
}

impl EventPublisher for KafkaEventBus {
    async fn publish_booking_created(&self, event: &BookingCreated) -> Result<(), EventError> {
        self.publish_json(BOOKING_CREATED_TOPIC, &event.id.to_string(), event)
            .await
    }

    async fn publish_booking_status_updated(
        &self,
        event: &BookingStatusUpdated,
    ) -> Result<(), EventError> {
        self.publish_json(BOOKING_STATUS_UPDATED_TOPIC, &event.id.to_string(), event)
            .await
    }
}

/// Builder for a [`KafkaEventBus`].
#[derive(Default)]
pub struct KafkaEventBusBuilder {
    brokers: Option<String>,
    producer_acks: Option<String>,
    compression: Option<String>,
    timeout: Option<Duration>,
}

impl KafkaEventBusBuilder {
    /// Set the broker addresses (comma-separated).
    #[must_use]
    pub fn brokers(mut self, brokers: impl Into<String>) -> Self {
        self.brokers = Some(brokers.into());
        self
    }

    /// Set the producer acknowledgment mode: "0", "1", or "all".
    /// Default: "1".
    #[must_use]
    pub fn producer_acks(mut self, acks: impl Into<String>) -> Self {
        self.producer_acks = Some(acks.into());
        self
    }

    /// Set the compression codec: "none", "gzip", "snappy", "lz4", "zstd".
    /// Default: "none".
    #[must_use]
    pub fn compression(mut self, compression: impl Into<String>) -> Self {
        self.compression = Some(compression.into());
        self
    }

    /// Set the producer send timeout. Default: 5 seconds.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the bus.
    ///
    /// # Errors
    ///
    /// Returns [`EventError::ConnectionFailed`] if brokers are not set or the
    /// producer cannot be created.
    pub fn build(self) -> Result<KafkaEventBus, EventError> {
        let brokers = self
            .brokers
            .ok_or_else(|| EventError::ConnectionFailed("Brokers not configured".to_string()))?;

        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &brokers)
            .set("message.timeout.ms", "5000")
            .set("acks", self.producer_acks.as_deref().unwrap_or("1"))
            .set(
                "compression.type",
                self.compression.as_deref().unwrap_or("none"),
            )
            .create()
            .map_err(|e| {
                EventError::ConnectionFailed(format!("Failed to create producer: {e}"))
            })?;

        tracing::info!(
            brokers = %brokers,
            acks = self.producer_acks.as_deref().unwrap_or("1"),
            compression = self.compression.as_deref().unwrap_or("none"),
            "Kafka event bus created"
        );

        Ok(KafkaEventBus {
            producer,
            brokers,
            timeout: self.timeout.unwrap_or(Duration::from_secs(5)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn event_bus_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<KafkaEventBus>();
        assert_sync::<KafkaEventBus>();
    }

    #[test]
    fn builder_requires_brokers() {
        let err = KafkaEventBus::builder().build().unwrap_err();
        assert!(matches!(err, EventError::ConnectionFailed(_)));
    }
}
