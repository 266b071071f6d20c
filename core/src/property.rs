//! Property listings and search.

use crate::ids::{PropertyId, UserId};
use crate::{Error, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Longest bookable/searchable stay, in days.
pub const MAX_STAY_DAYS: i64 = 365;

/// A vacation-rental listing, owned by exactly one user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Property {
    /// Property id.
    pub id: PropertyId,
    /// Owning user.
    pub owner_id: UserId,
    /// Listing title.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// City.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Country.
    pub country: String,
    /// Kind of property (apartment, house, villa, ...).
    pub property_type: String,
    /// Nightly rate in dollars.
    pub price_per_night: f64,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Guest capacity.
    pub max_guests: i32,
    /// Comma-joined amenity list.
    pub amenities: Option<String>,
    /// Cover image URL.
    pub main_image: Option<String>,
    /// Display-only tax rate percentage (0-100). Never folded into booking
    /// totals server-side.
    pub tax_rate: f64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Property {
    /// Amenities as a list, splitting the stored comma-joined form.
    #[must_use]
    pub fn amenity_list(&self) -> Vec<String> {
        self.amenities
            .as_deref()
            .map(|a| {
                a.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(ToString::to_string)
                    .collect()
            })
            .unwrap_or_default()
    }

    /// "City, State" display form used by the API.
    #[must_use]
    pub fn location(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }
}

/// Input for creating a listing.
#[derive(Debug, Clone)]
pub struct NewProperty {
    /// Owning user.
    pub owner_id: UserId,
    /// Listing title.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// City.
    pub city: String,
    /// State or region code.
    pub state: String,
    /// Country.
    pub country: String,
    /// Kind of property.
    pub property_type: String,
    /// Nightly rate in dollars.
    pub price_per_night: f64,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Guest capacity.
    pub max_guests: i32,
    /// Comma-joined amenity list.
    pub amenities: Option<String>,
    /// Cover image URL.
    pub main_image: Option<String>,
    /// Display-only tax rate percentage.
    pub tax_rate: f64,
}

/// Split a "City, ST, Country" location string, defaulting missing parts the
/// way the original listing form did.
#[must_use]
pub fn split_location(location: &str) -> (String, String, String) {
    let mut parts = location.split(',').map(str::trim);
    let city = parts
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("Unknown")
        .to_string();
    let state = parts
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("CA")
        .to_string();
    let country = parts
        .next()
        .filter(|s| !s.is_empty())
        .unwrap_or("USA")
        .to_string();
    (city, state, country)
}

/// Search filters for the public property search.
#[derive(Debug, Clone, Default)]
pub struct PropertySearch {
    /// Case-insensitive substring matched against city, state and country.
    pub location: Option<String>,
    /// Desired check-in date.
    pub start_date: Option<NaiveDate>,
    /// Desired check-out date.
    pub end_date: Option<NaiveDate>,
    /// Minimum guest capacity.
    pub guests: Option<i32>,
}

impl PropertySearch {
    /// Validate the optional date pair against `today`.
    ///
    /// Dates are only checked when both are present, matching the original
    /// search endpoint: check-in may be today but not earlier, check-out must
    /// be after check-in, and the stay may not exceed [`MAX_STAY_DAYS`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] describing the first failing rule.
    pub fn validate_dates(&self, today: NaiveDate) -> Result<()> {
        let (Some(start), Some(end)) = (self.start_date, self.end_date) else {
            return Ok(());
        };
        if start < today {
            return Err(Error::Validation(
                "Check-in date cannot be in the past.".to_string(),
            ));
        }
        if end <= start {
            return Err(Error::Validation(
                "Check-out date must be after check-in date.".to_string(),
            ));
        }
        if (end - start).num_days() > MAX_STAY_DAYS {
            return Err(Error::Validation(
                "Stay duration cannot exceed 365 days.".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[test]
    fn amenity_list_splits_and_trims() {
        let mut property = sample();
        property.amenities = Some("wifi, pool,,parking".to_string());
        assert_eq!(property.amenity_list(), vec!["wifi", "pool", "parking"]);
        property.amenities = None;
        assert!(property.amenity_list().is_empty());
    }

    #[test]
    fn split_location_defaults_missing_parts() {
        assert_eq!(
            split_location("San Jose, CA, USA"),
            ("San Jose".into(), "CA".into(), "USA".into())
        );
        assert_eq!(
            split_location("Austin"),
            ("Austin".into(), "CA".into(), "USA".into())
        );
        assert_eq!(
            split_location(""),
            ("Unknown".into(), "CA".into(), "USA".into())
        );
    }

    #[test]
    fn search_dates_optional() {
        let search = PropertySearch::default();
        assert!(search.validate_dates(date("2024-06-01")).is_ok());
    }

    #[test]
    fn search_rejects_past_checkin() {
        let search = PropertySearch {
            start_date: Some(date("2024-05-31")),
            end_date: Some(date("2024-06-02")),
            ..Default::default()
        };
        assert!(search.validate_dates(date("2024-06-01")).is_err());
    }

    #[test]
    fn search_rejects_year_long_stay() {
        let search = PropertySearch {
            start_date: Some(date("2024-06-01")),
            end_date: Some(date("2025-06-02")),
            ..Default::default()
        };
        let err = search.validate_dates(date("2024-06-01")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Stay duration cannot exceed 365 days."
        );
    }

    #[test]
    fn search_allows_checkin_today() {
        let search = PropertySearch {
            start_date: Some(date("2024-06-01")),
            end_date: Some(date("2024-06-04")),
            ..Default::default()
        };
        assert!(search.validate_dates(date("2024-06-01")).is_ok());
    }

    fn sample() -> Property {
        Property {
            id: PropertyId::new(),
            owner_id: UserId::new(),
            name: "Seaside Loft".into(),
            description: None,
            city: "Santa Cruz".into(),
            state: "CA".into(),
            country: "USA".into(),
            property_type: "apartment".into(),
            price_per_night: 100.0,
            bedrooms: 1,
            bathrooms: 1,
            max_guests: 2,
            amenities: None,
            main_image: None,
            tax_rate: 0.0,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }
}
