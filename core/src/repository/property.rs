//! Property repository trait.

use crate::ids::{PropertyId, UserId};
use crate::property::{NewProperty, Property, PropertySearch};
use crate::Result;
use std::collections::HashMap;
use std::future::Future;

/// Storage for property listings.
pub trait PropertyRepository: Send + Sync {
    /// Create a listing.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn create_property(
        &self,
        property: NewProperty,
    ) -> impl Future<Output = Result<Property>> + Send;

    /// Fetch a listing by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such property exists.
    fn get_property(
        &self,
        property_id: PropertyId,
    ) -> impl Future<Output = Result<Property>> + Send;

    /// Search listings, newest first. Date validation happens before this is
    /// called; the search itself only filters on location substring and
    /// guest capacity.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn search(
        &self,
        search: &PropertySearch,
    ) -> impl Future<Output = Result<Vec<Property>>> + Send;

    /// All listings of one owner, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn list_by_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<Property>>> + Send;

    /// Accepted-booking counts per property for one owner's listings.
    /// Properties with no accepted bookings are absent from the map.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn accepted_booking_counts(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<HashMap<PropertyId, i64>>> + Send;
}
