//! Concierge operation inputs and payloads.
//!
//! Wire names are camelCase to match the public API; every output type
//! carries a static fallback used when the model's answer cannot be parsed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Trip details for a travel plan.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TripDetails {
    /// Destination, e.g. "San Jose, CA".
    pub location: String,
    /// Check-in date.
    pub start_date: NaiveDate,
    /// Check-out date.
    pub end_date: NaiveDate,
    /// "family", "couple", "solo", ...
    pub party_type: String,
    /// Party size.
    pub guests: i32,
}

impl TripDetails {
    /// Trip length in days; never below 1 so a same-day trip still gets a
    /// one-day plan.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days().max(1)
    }
}

/// Traveler preferences shared by travel plans and recommendations.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerPreferences {
    /// Budget level ("low", "medium", "luxury").
    pub budget: Option<String>,
    /// Comma-joined interests.
    pub interests: Option<String>,
    /// Mobility requirements.
    pub mobility: Option<String>,
    /// Dietary preferences.
    pub diet: Option<String>,
}

/// Search criteria for property recommendations.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchCriteria {
    /// Destination.
    pub location: String,
    /// Check-in date.
    pub start_date: NaiveDate,
    /// Check-out date.
    pub end_date: NaiveDate,
    /// Party size.
    pub guests: i32,
    /// Budget level.
    pub budget: Option<String>,
}

/// A property as described to the pricing advisor.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    /// "City, ST" location.
    pub location: String,
    /// Kind of property.
    pub property_type: String,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Amenity list.
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Market context for pricing suggestions.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketContext {
    /// Season ("summer", "year-round", ...).
    pub season: Option<String>,
    /// Demand level.
    pub demand: Option<String>,
    /// Competition level.
    pub competition: Option<String>,
}

/// A listing as described to the copywriter.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingDetails {
    /// Listing title.
    pub name: String,
    /// "City, ST" location.
    pub location: String,
    /// Kind of property.
    pub property_type: String,
    /// Bedroom count.
    pub bedrooms: i32,
    /// Bathroom count.
    pub bathrooms: i32,
    /// Amenity list.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Nightly rate.
    #[serde(default)]
    pub price_per_night: f64,
}

/// Guest details for a welcome message.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    /// Guest name.
    pub guest_name: String,
    /// Check-in date, as shown to the guest.
    pub check_in_date: String,
    /// Stay length in days.
    #[serde(default)]
    pub duration: i64,
}

/// Host-side details for a welcome message.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostDetails {
    /// Property name.
    pub property_name: String,
    /// Property location.
    pub location: String,
    /// Host name.
    pub owner_name: Option<String>,
}

/// A day of the itinerary.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct DayPlan {
    /// Date of the day.
    pub date: String,
    /// Morning activity.
    pub morning: String,
    /// Afternoon activity.
    pub afternoon: String,
    /// Evening activity.
    pub evening: String,
}

/// A suggested activity.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Activity name.
    pub title: String,
    /// Street address or locating hint.
    pub address: String,
    /// Descriptive tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Suitable for children.
    #[serde(default)]
    pub child_friendly: bool,
    /// Wheelchair accessible.
    #[serde(default)]
    pub wheelchair: bool,
}

/// A suggested restaurant.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct Restaurant {
    /// Restaurant name.
    pub name: String,
    /// Cuisine description.
    pub cuisine: String,
    /// Price bracket ("$", "$$", ...).
    pub price: String,
}

/// Full travel plan payload.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct TravelPlan {
    /// Daily itinerary.
    pub plan: Vec<DayPlan>,
    /// Suggested activities.
    pub activities: Vec<Activity>,
    /// Suggested restaurants.
    pub restaurants: Vec<Restaurant>,
    /// Packing checklist.
    pub checklist: Vec<String>,
}

impl TravelPlan {
    /// Generic plan substituted when the model output is unusable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            plan: vec![DayPlan {
                date: "2024-01-01".to_string(),
                morning: "Visit local museums and cultural sites".to_string(),
                afternoon: "Explore parks and outdoor activities".to_string(),
                evening: "Enjoy local dining and entertainment".to_string(),
            }],
            activities: vec![
                Activity {
                    title: "Local Museum Visit".to_string(),
                    address: "Check local listings for museums in your destination".to_string(),
                    tags: vec!["culture".to_string(), "education".to_string()],
                    child_friendly: true,
                    wheelchair: true,
                },
                Activity {
                    title: "City Park Exploration".to_string(),
                    address: "Local parks and green spaces".to_string(),
                    tags: vec!["outdoor".to_string(), "nature".to_string()],
                    child_friendly: true,
                    wheelchair: true,
                },
            ],
            restaurants: vec![Restaurant {
                name: "Local Cuisine Restaurant".to_string(),
                cuisine: "Local specialties".to_string(),
                price: "$$".to_string(),
            }],
            checklist: [
                "Comfortable walking shoes",
                "Weather-appropriate clothing",
                "Camera or smartphone",
                "Travel documents",
                "Local currency",
                "Travel essentials",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        }
    }
}

/// One property-type recommendation.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    /// Suggested property type.
    pub property_type: String,
    /// Essential amenities.
    #[serde(default)]
    pub amenities: Vec<String>,
    /// Where in the city to look.
    #[serde(default)]
    pub location_notes: String,
    /// Preference-specific notes.
    #[serde(default)]
    pub special_considerations: String,
}

/// Property recommendations payload.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Recommendations {
    /// Suggested property types and features.
    pub recommendations: Vec<Recommendation>,
    /// Search tips.
    #[serde(default)]
    pub search_tips: Vec<String>,
}

impl Recommendations {
    /// Minimal payload substituted when the model output is unusable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            recommendations: vec![],
            search_tips: vec!["Consider your budget and preferences".to_string()],
        }
    }
}

/// High/low season price adjustments.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct SeasonalAdjustments {
    /// High-season nightly rate.
    pub high: f64,
    /// Low-season nightly rate.
    pub low: f64,
}

/// Pricing suggestions payload.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestions {
    /// Recommended base nightly rate.
    pub base_price: f64,
    /// Seasonal adjustments.
    pub seasonal_adjustments: SeasonalAdjustments,
    /// Weekend price multiplier.
    pub weekend_multiplier: f64,
    /// Recommended minimum stay in nights.
    pub min_stay_recommendation: f64,
    /// Revenue tips.
    #[serde(default)]
    pub tips: Vec<String>,
}

impl PricingSuggestions {
    /// Conservative numbers substituted when the model output is unusable.
    #[must_use]
    pub fn fallback() -> Self {
        Self {
            base_price: 100.0,
            seasonal_adjustments: SeasonalAdjustments {
                high: 150.0,
                low: 80.0,
            },
            weekend_multiplier: 1.2,
            min_stay_recommendation: 2.0,
            tips: vec![
                "Consider market demand".to_string(),
                "Adjust for seasonality".to_string(),
            ],
        }
    }
}

/// Generated listing copy.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
pub struct PropertyDescription {
    /// Full description text.
    pub description: String,
    /// Selling points.
    #[serde(default)]
    pub highlights: Vec<String>,
    /// SEO keywords.
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl PropertyDescription {
    /// Wrap raw model text when it was not valid JSON; the prose is still
    /// usable as a description.
    #[must_use]
    pub fn fallback(raw: &str) -> Self {
        Self {
            description: raw.to_string(),
            highlights: vec!["AI-generated description".to_string()],
            keywords: vec![
                "property".to_string(),
                "rental".to_string(),
                "accommodation".to_string(),
            ],
        }
    }
}

/// Generated welcome message.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeMessage {
    /// Message subject line.
    pub subject: String,
    /// Full message body.
    pub message: String,
    /// Check-in instructions.
    #[serde(default)]
    pub check_in_instructions: Vec<String>,
    /// Local tips.
    #[serde(default)]
    pub local_tips: Vec<String>,
}

impl WelcomeMessage {
    /// Wrap raw model text when it was not valid JSON.
    #[must_use]
    pub fn fallback(raw: &str) -> Self {
        Self {
            subject: "Welcome to your stay!".to_string(),
            message: raw.to_string(),
            check_in_instructions: vec!["Check-in instructions will be provided".to_string()],
            local_tips: vec!["Enjoy your stay!".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trip_duration_floors_at_one_day() {
        let trip = TripDetails {
            location: "San Jose, CA".into(),
            start_date: "2025-11-11".parse().unwrap(),
            end_date: "2025-11-11".parse().unwrap(),
            party_type: "solo".into(),
            guests: 1,
        };
        assert_eq!(trip.duration_days(), 1);
    }

    #[test]
    fn activity_accessibility_uses_camel_case() {
        let json = r#"{"title":"Museum","address":"110 S Market St","tags":["art"],"childFriendly":true,"wheelchair":false}"#;
        let activity: Activity = serde_json::from_str(json).unwrap();
        assert!(activity.child_friendly);
        assert!(!activity.wheelchair);
    }

    #[test]
    fn pricing_payload_round_trips_camel_case() {
        let json = serde_json::to_value(PricingSuggestions::fallback()).unwrap();
        assert_eq!(json["basePrice"], 100.0);
        assert_eq!(json["seasonalAdjustments"]["high"], 150.0);
        assert_eq!(json["minStayRecommendation"], 2.0);
    }

    #[test]
    fn welcome_fallback_wraps_raw_text() {
        let message = WelcomeMessage::fallback("So glad you're coming!");
        assert_eq!(message.subject, "Welcome to your stay!");
        assert_eq!(message.message, "So glad you're coming!");
    }
}
