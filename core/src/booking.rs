//! Bookings: the request validator and price quote.
//!
//! This is the one rule-bearing piece of the marketplace. The checks and the
//! quote formula are pure functions so they can be tested without any I/O.

use crate::ids::{BookingId, PropertyId, UserId};
use crate::property::Property;
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle of a booking. `accepted` and `cancelled` are terminal in intent,
/// but transitions are not guarded against re-entry; ownership of the
/// property is the only gate on accept/cancel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Awaiting the owner's decision.
    Pending,
    /// Confirmed by the owner.
    Accepted,
    /// Declined or withdrawn.
    Cancelled,
}

impl BookingStatus {
    /// String form used in the database and API payloads.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parse a status string.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] for unknown statuses.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(Error::Validation(format!("Invalid booking status: {s}"))),
        }
    }
}

/// A stay reserved by a traveler on a property.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Booking {
    /// Booking id.
    pub id: BookingId,
    /// Booked property.
    pub property_id: PropertyId,
    /// Booking traveler.
    pub traveler_id: UserId,
    /// Check-in date.
    pub start_date: NaiveDate,
    /// Check-out date.
    pub end_date: NaiveDate,
    /// Party size.
    pub num_guests: i32,
    /// Lifecycle status.
    pub status: BookingStatus,
    /// Nights × nightly rate, tax excluded.
    pub total_price: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A booking joined with the display fields of its property, for traveler and
/// owner listings.
#[derive(Debug, Clone, Serialize)]
pub struct BookingWithProperty {
    /// The booking itself.
    #[serde(flatten)]
    pub booking: Booking,
    /// Property name.
    pub property_name: String,
    /// Property city.
    pub city: String,
    /// Property state.
    pub state: String,
}

/// Validated input for creating a booking, ready for persistence.
#[derive(Debug, Clone)]
pub struct NewBooking {
    /// Booked property.
    pub property_id: PropertyId,
    /// Booking traveler.
    pub traveler_id: UserId,
    /// Check-in date.
    pub start_date: NaiveDate,
    /// Check-out date.
    pub end_date: NaiveDate,
    /// Party size.
    pub num_guests: i32,
    /// Quoted total.
    pub total_price: f64,
}

/// A booking request as it arrives from the traveler, before any lookup.
#[derive(Debug, Clone)]
pub struct BookingRequest {
    /// Property to book.
    pub property_id: PropertyId,
    /// Check-in date.
    pub start_date: NaiveDate,
    /// Check-out date.
    pub end_date: NaiveDate,
    /// Party size.
    pub num_guests: i32,
}

impl BookingRequest {
    /// Field-level checks that need no database: check-in not in the past
    /// (today is allowed), check-out strictly after check-in, at least one
    /// guest. Comparison is date-only; time of day never enters into it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] with the user-facing message for the
    /// first failing rule.
    pub fn validate(&self, today: NaiveDate) -> Result<()> {
        if self.start_date < today {
            return Err(Error::Validation(
                "Check-in date cannot be in the past".to_string(),
            ));
        }
        if self.end_date <= self.start_date {
            return Err(Error::Validation(
                "Check-out date must be after check-in date".to_string(),
            ));
        }
        if self.num_guests < 1 {
            return Err(Error::Validation(
                "Number of guests must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Capacity check against the looked-up property.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the party exceeds `max_guests`.
    pub fn check_capacity(&self, property: &Property) -> Result<()> {
        if self.num_guests > property.max_guests {
            return Err(Error::Validation(format!(
                "Maximum {} guests allowed for this property",
                property.max_guests
            )));
        }
        Ok(())
    }

    /// Price out the stay against a nightly rate. Dates are date-only, so the
    /// night count is an exact day difference; tax is display-side and never
    /// included here.
    #[must_use]
    pub fn quote(&self, price_per_night: f64) -> Quote {
        let nights = (self.end_date - self.start_date).num_days();
        Quote {
            nights,
            #[allow(clippy::cast_precision_loss)] // stays are capped well below 2^52 nights
            total_price: price_per_night * nights as f64,
        }
    }
}

/// Result of pricing out a booking request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Quote {
    /// Number of nights.
    pub nights: i64,
    /// Nights × nightly rate.
    pub total_price: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ids::{PropertyId, UserId};

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn request(start: &str, end: &str, guests: i32) -> BookingRequest {
        BookingRequest {
            property_id: PropertyId::new(),
            start_date: date(start),
            end_date: date(end),
            num_guests: guests,
        }
    }

    fn property(max_guests: i32, price: f64) -> Property {
        Property {
            id: PropertyId::new(),
            owner_id: UserId::new(),
            name: "Cabin".into(),
            description: None,
            city: "Tahoe".into(),
            state: "CA".into(),
            country: "USA".into(),
            property_type: "cabin".into(),
            price_per_night: price,
            bedrooms: 2,
            bathrooms: 1,
            max_guests,
            amenities: None,
            main_image: None,
            tax_rate: 8.25,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn rejects_checkin_in_the_past() {
        let err = request("2024-05-30", "2024-06-02", 2)
            .validate(date("2024-06-01"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Check-in date cannot be in the past");
    }

    #[test]
    fn allows_checkin_today() {
        assert!(
            request("2024-06-01", "2024-06-02", 2)
                .validate(date("2024-06-01"))
                .is_ok()
        );
    }

    #[test]
    fn rejects_checkout_not_after_checkin() {
        let today = date("2024-06-01");
        assert!(request("2024-06-02", "2024-06-02", 2).validate(today).is_err());
        assert!(request("2024-06-03", "2024-06-02", 2).validate(today).is_err());
    }

    #[test]
    fn rejects_zero_guests() {
        let err = request("2024-06-02", "2024-06-04", 0)
            .validate(date("2024-06-01"))
            .unwrap_err();
        assert_eq!(err.to_string(), "Number of guests must be at least 1");
    }

    #[test]
    fn rejects_party_over_capacity() {
        let err = request("2024-06-02", "2024-06-04", 5)
            .check_capacity(&property(4, 100.0))
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Maximum 4 guests allowed for this property"
        );
    }

    #[test]
    fn quote_is_nights_times_rate() {
        // Spec example: $100/night, 2024-06-01 → 2024-06-04 = 3 nights, $300.
        let quote = request("2024-06-01", "2024-06-04", 2).quote(100.0);
        assert_eq!(quote.nights, 3);
        assert!((quote.total_price - 300.0).abs() < f64::EPSILON);
    }

    #[test]
    fn quote_excludes_tax() {
        let prop = property(4, 250.0);
        let quote = request("2024-06-01", "2024-06-03", 2).quote(prop.price_per_night);
        assert_eq!(quote.nights, 2);
        assert!((quote.total_price - 500.0).abs() < f64::EPSILON);
    }

    #[test]
    fn status_round_trips() {
        for status in [
            BookingStatus::Pending,
            BookingStatus::Accepted,
            BookingStatus::Cancelled,
        ] {
            assert_eq!(BookingStatus::parse(status.as_str()).unwrap(), status);
        }
        assert!(BookingStatus::parse("rejected").is_err());
    }
}
