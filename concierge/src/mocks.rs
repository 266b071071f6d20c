//! Canned concierge for tests: always answers with the static fallbacks,
//! no network involved.

use crate::error::ConciergeError;
use crate::service::Concierge;
use crate::types::{
    GuestDetails, HostDetails, ListingDetails, MarketContext, PricingSuggestions,
    PropertyDescription, PropertyDetails, Recommendations, SearchCriteria, TravelPlan,
    TravelerPreferences, TripDetails, WelcomeMessage,
};

/// Concierge that returns each operation's fallback payload.
#[derive(Clone, Default)]
pub struct StaticConcierge;

impl StaticConcierge {
    /// Create a canned concierge.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Concierge for StaticConcierge {
    async fn travel_plan(
        &self,
        _trip: &TripDetails,
        _preferences: &TravelerPreferences,
    ) -> Result<TravelPlan, ConciergeError> {
        Ok(TravelPlan::fallback())
    }

    async fn property_recommendations(
        &self,
        _criteria: &SearchCriteria,
        _preferences: &TravelerPreferences,
    ) -> Result<Recommendations, ConciergeError> {
        Ok(Recommendations::fallback())
    }

    async fn pricing_suggestions(
        &self,
        _property: &PropertyDetails,
        _market: &MarketContext,
    ) -> Result<PricingSuggestions, ConciergeError> {
        Ok(PricingSuggestions::fallback())
    }

    async fn property_description(
        &self,
        listing: &ListingDetails,
    ) -> Result<PropertyDescription, ConciergeError> {
        Ok(PropertyDescription::fallback(&format!(
            "A lovely {} in {}",
            listing.property_type, listing.location
        )))
    }

    async fn welcome_message(
        &self,
        guest: &GuestDetails,
        _host: &HostDetails,
    ) -> Result<WelcomeMessage, ConciergeError> {
        Ok(WelcomeMessage::fallback(&format!(
            "Welcome, {}!",
            guest.guest_name
        )))
    }
}
