//! Event publisher mocks.

use crate::event::{BookingCreated, BookingStatusUpdated, EventError, EventPublisher};
use std::future::Future;
use std::sync::{Arc, Mutex};

/// Publisher that records events in memory for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingEventPublisher {
    created: Arc<Mutex<Vec<BookingCreated>>>,
    status_updates: Arc<Mutex<Vec<BookingStatusUpdated>>>,
}

impl RecordingEventPublisher {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded booking-created events.
    #[must_use]
    pub fn created_events(&self) -> Vec<BookingCreated> {
        self.created.lock().map(|v| v.clone()).unwrap_or_default()
    }

    /// All recorded status-updated events.
    #[must_use]
    pub fn status_events(&self) -> Vec<BookingStatusUpdated> {
        self.status_updates
            .lock()
            .map(|v| v.clone())
            .unwrap_or_default()
    }
}

impl EventPublisher for RecordingEventPublisher {
    fn publish_booking_created(
        &self,
        event: &BookingCreated,
    ) -> impl Future<Output = Result<(), EventError>> + Send {
        let created = Arc::clone(&self.created);
        let event = event.clone();
        async move {
            created
                .lock()
                .map_err(|_| EventError::PublishFailed {
                    topic: crate::event::BOOKING_CREATED_TOPIC.to_string(),
                    reason: "recorder mutex poisoned".to_string(),
                })?
                .push(event);
            Ok(())
        }
    }

    fn publish_booking_status_updated(
        &self,
        event: &BookingStatusUpdated,
    ) -> impl Future<Output = Result<(), EventError>> + Send {
        let status_updates = Arc::clone(&self.status_updates);
        let event = event.clone();
        async move {
            status_updates
                .lock()
                .map_err(|_| EventError::PublishFailed {
                    topic: crate::event::BOOKING_STATUS_UPDATED_TOPIC.to_string(),
                    reason: "recorder mutex poisoned".to_string(),
                })?
                .push(event);
            Ok(())
        }
    }
}
