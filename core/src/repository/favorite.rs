//! Favorite repository trait.

use crate::favorite::{Favorite, FavoriteProperty};
use crate::ids::{PropertyId, UserId};
use crate::Result;
use std::future::Future;

/// Storage for (traveler, property) favorites.
pub trait FavoriteRepository: Send + Sync {
    /// Save a property for a traveler.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Conflict`] if the pair already exists, or
    /// [`crate::Error::Database`] on storage failure.
    fn add_favorite(
        &self,
        traveler_id: UserId,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<Favorite>> + Send;

    /// Remove a saved property.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the pair does not exist.
    fn remove_favorite(
        &self,
        traveler_id: UserId,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<()>> + Send;

    /// A traveler's saved properties joined with display fields, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn list_favorites(
        &self,
        traveler_id: UserId,
    ) -> impl Future<Output = Result<Vec<FavoriteProperty>>> + Send;
}
