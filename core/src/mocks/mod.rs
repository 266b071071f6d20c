//! In-memory mock providers for testing.
//!
//! [`MemoryBackend`] implements every repository trait over one shared map
//! set, so joined listings (bookings with property fields, favorites with
//! property fields) behave like the real database.
//! [`RecordingEventPublisher`] captures published events for assertions.

mod backend;
mod events;

pub use backend::MemoryBackend;
pub use events::RecordingEventPublisher;
