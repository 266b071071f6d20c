//! Provider traits over persistence.
//!
//! One trait per aggregate, async via `impl Future` return types so
//! implementations stay object-safe-free and allocation-free at the seam.
//! Production implementations live in `hostly-postgres`; in-memory mocks in
//! [`crate::mocks`].

mod booking;
mod favorite;
mod property;
mod session;
mod user;

pub use booking::BookingRepository;
pub use favorite::FavoriteRepository;
pub use property::PropertyRepository;
pub use session::SessionStore;
pub use user::UserRepository;
