//! Store implementations, one per aggregate.

mod booking;
mod favorite;
mod property;
mod session;
mod user;

pub use booking::PostgresBookingRepository;
pub use favorite::PostgresFavoriteRepository;
pub use property::PostgresPropertyRepository;
pub use session::PostgresSessionStore;
pub use user::PostgresUserRepository;
