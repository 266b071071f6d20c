//! Favorites: the (traveler, property) join.

use crate::ids::{FavoriteId, PropertyId, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A traveler's saved property. The pair is unique; a second save of the same
/// property is a conflict.
#[derive(Debug, Clone, Serialize)]
pub struct Favorite {
    /// Favorite id.
    pub id: FavoriteId,
    /// Saving traveler.
    pub traveler_id: UserId,
    /// Saved property.
    pub property_id: PropertyId,
    /// When the property was saved.
    pub created_at: DateTime<Utc>,
}

/// A favorite joined with the property's display fields, for listing.
#[derive(Debug, Clone, Serialize)]
pub struct FavoriteProperty {
    /// Saved property id.
    pub property_id: PropertyId,
    /// Property name.
    pub name: String,
    /// Property city.
    pub city: String,
    /// Property state.
    pub state: String,
    /// Kind of property.
    pub property_type: String,
    /// Nightly rate.
    pub price_per_night: f64,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Guest capacity.
    pub max_guests: i32,
    /// Cover image URL.
    pub main_image: Option<String>,
    /// When the property was saved.
    pub favorited_at: DateTime<Utc>,
}
