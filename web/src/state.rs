//! Application state shared across all HTTP handlers.

use hostly_concierge::Concierge;
use hostly_core::{
    BookingRepository, EventPublisher, FavoriteRepository, PropertyRepository, SessionStore,
    UserRepository,
};

/// Shared state, generic over every provider so tests can wire in-memory
/// implementations and production wires Postgres, Kafka, and the live
/// concierge.
pub struct AppState<U, P, B, F, S, E, C>
where
    U: UserRepository,
    P: PropertyRepository,
    B: BookingRepository,
    F: FavoriteRepository,
    S: SessionStore,
    E: EventPublisher,
    C: Concierge,
{
    /// User accounts.
    pub users: U,
    /// Property listings.
    pub properties: P,
    /// Bookings.
    pub bookings: B,
    /// Favorites.
    pub favorites: F,
    /// Server-side sessions.
    pub sessions: S,
    /// Booking event publisher.
    pub events: E,
    /// LLM concierge.
    pub concierge: C,
}

impl<U, P, B, F, S, E, C> Clone for AppState<U, P, B, F, S, E, C>
where
    U: UserRepository + Clone,
    P: PropertyRepository + Clone,
    B: BookingRepository + Clone,
    F: FavoriteRepository + Clone,
    S: SessionStore + Clone,
    E: EventPublisher + Clone,
    C: Concierge + Clone,
{
    fn clone(&self) -> Self {
        Self {
            users: self.users.clone(),
            properties: self.properties.clone(),
            bookings: self.bookings.clone(),
            favorites: self.favorites.clone(),
            sessions: self.sessions.clone(),
            events: self.events.clone(),
            concierge: self.concierge.clone(),
        }
    }
}
