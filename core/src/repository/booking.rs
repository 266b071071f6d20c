//! Booking repository trait.

use crate::booking::{Booking, BookingStatus, BookingWithProperty, NewBooking};
use crate::ids::{BookingId, UserId};
use crate::Result;
use std::future::Future;

/// Storage for bookings.
pub trait BookingRepository: Send + Sync {
    /// Persist a validated booking with status pending.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn create_booking(
        &self,
        booking: NewBooking,
    ) -> impl Future<Output = Result<Booking>> + Send;

    /// Fetch a booking by id.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if no such booking exists.
    fn get_booking(
        &self,
        booking_id: BookingId,
    ) -> impl Future<Output = Result<Booking>> + Send;

    /// A traveler's bookings joined with property display fields, newest
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn list_for_traveler(
        &self,
        traveler_id: UserId,
    ) -> impl Future<Output = Result<Vec<BookingWithProperty>>> + Send;

    /// All bookings across one owner's properties, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Database`] on storage failure.
    fn list_for_owner(
        &self,
        owner_id: UserId,
    ) -> impl Future<Output = Result<Vec<BookingWithProperty>>> + Send;

    /// Set a booking's status unconditionally and return the updated row.
    /// Ownership authorization happens in the caller; no status-machine
    /// guard is applied here.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::NotFound`] if the booking no longer exists.
    fn update_status(
        &self,
        booking_id: BookingId,
        status: BookingStatus,
    ) -> impl Future<Output = Result<Booking>> + Send;
}
