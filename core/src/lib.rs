//! # Hostly core
//!
//! Domain model and business rules for the Hostly vacation-rental
//! marketplace, independent of any transport or storage backend.
//!
//! The rule-bearing piece is [`booking`]: request validation and the price
//! quote are pure functions over dates and a property's capacity/rate, so
//! they test at memory speed. Everything that touches the outside world goes
//! through the traits in [`repository`] and [`event`]; production
//! implementations live in `hostly-postgres` and `hostly-events`, and
//! [`mocks`] provides in-memory stand-ins for tests.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod booking;
pub mod error;
pub mod event;
pub mod favorite;
pub mod ids;
pub mod password;
pub mod property;
pub mod repository;
pub mod session;
pub mod user;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use booking::{Booking, BookingRequest, BookingStatus, BookingWithProperty, NewBooking, Quote};
pub use error::{Error, Result};
pub use event::{
    BookingCreated, BookingStatusUpdated, EventError, EventPublisher, NoopEventPublisher,
    BOOKING_CREATED_TOPIC, BOOKING_STATUS_UPDATED_TOPIC,
};
pub use favorite::{Favorite, FavoriteProperty};
pub use ids::{BookingId, FavoriteId, PropertyId, SessionId, UserId};
pub use property::{NewProperty, Property, PropertySearch};
pub use repository::{
    BookingRepository, FavoriteRepository, PropertyRepository, SessionStore, UserRepository,
};
pub use session::Session;
pub use user::{NewUser, Profile, ProfileUpdate, Role, User};
