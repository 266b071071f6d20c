//! The concierge operations: prompt building and fallback handling.

use crate::chat::{ChatMessage, ChatRequest};
use crate::client::ChatClient;
use crate::error::ConciergeError;
use crate::extract::parse_payload;
use crate::types::{
    GuestDetails, HostDetails, ListingDetails, MarketContext, PricingSuggestions,
    PropertyDescription, PropertyDetails, Recommendations, SearchCriteria, TravelPlan,
    TravelerPreferences, TripDetails, WelcomeMessage,
};
use std::future::Future;

/// The five concierge operations, as a seam so the web layer can run against
/// a canned implementation in tests.
pub trait Concierge: Send + Sync {
    /// Generate a day-by-day travel plan for a trip.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError`] on transport failure; unusable model
    /// output yields [`TravelPlan::fallback`] instead.
    fn travel_plan(
        &self,
        trip: &TripDetails,
        preferences: &TravelerPreferences,
    ) -> impl Future<Output = Result<TravelPlan, ConciergeError>> + Send;

    /// Suggest property types and features for a search.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError`] on transport failure.
    fn property_recommendations(
        &self,
        criteria: &SearchCriteria,
        preferences: &TravelerPreferences,
    ) -> impl Future<Output = Result<Recommendations, ConciergeError>> + Send;

    /// Recommend pricing for an owner's listing.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError`] on transport failure.
    fn pricing_suggestions(
        &self,
        property: &PropertyDetails,
        market: &MarketContext,
    ) -> impl Future<Output = Result<PricingSuggestions, ConciergeError>> + Send;

    /// Write listing copy for a property.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError`] on transport failure.
    fn property_description(
        &self,
        listing: &ListingDetails,
    ) -> impl Future<Output = Result<PropertyDescription, ConciergeError>> + Send;

    /// Write a personalized guest welcome message.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError`] on transport failure.
    fn welcome_message(
        &self,
        guest: &GuestDetails,
        host: &HostDetails,
    ) -> impl Future<Output = Result<WelcomeMessage, ConciergeError>> + Send;
}

/// Production concierge over a [`ChatClient`].
///
/// Runs without a client too: a disabled service answers every operation
/// with its static fallback, so the marketplace works with no API key
/// configured.
#[derive(Clone)]
pub struct ConciergeService {
    client: Option<ChatClient>,
}

impl ConciergeService {
    /// Wrap a chat client.
    #[must_use]
    pub const fn new(client: ChatClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A service that never calls the API and always answers with
    /// fallbacks.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { client: None }
    }

    async fn complete(
        &self,
        system: &str,
        prompt: String,
        temperature: f64,
        max_tokens: u32,
    ) -> Result<Option<String>, ConciergeError> {
        let Some(client) = &self.client else {
            return Ok(None);
        };
        let request =
            ChatRequest::new(vec![ChatMessage::system(system), ChatMessage::user(prompt)])
                .with_temperature(temperature)
                .with_max_tokens(max_tokens);
        let response = client.chat(request).await?;
        Ok(Some(response.first_content().to_string()))
    }
}

impl Concierge for ConciergeService {
    async fn travel_plan(
        &self,
        trip: &TripDetails,
        preferences: &TravelerPreferences,
    ) -> Result<TravelPlan, ConciergeError> {
        let duration = trip.duration_days();
        let prompt = format!(
            "Create a detailed {duration}-day travel itinerary for {party} visiting {location}.\n\n\
             Travel Details:\n\
             - Duration: {duration} days\n\
             - Party Type: {party}\n\
             - Number of Guests: {guests}\n\
             - Budget Level: {budget}\n\
             - Interests: {interests}\n\
             - Mobility Requirements: {mobility}\n\
             - Dietary Preferences: {diet}\n\n\
             Please provide:\n\
             1. Daily itinerary with morning, afternoon, and evening activities\n\
             2. Recommended activities with addresses and accessibility info\n\
             3. Restaurant suggestions matching dietary preferences\n\
             4. Packing checklist based on location, season, and activities\n\n\
             IMPORTANT: Respond with ONLY valid JSON, using keys: plan (array of \
             {{date, morning, afternoon, evening}}), activities (array of \
             {{title, address, tags, childFriendly, wheelchair}}), restaurants \
             (array of {{name, cuisine, price}}), and checklist (array of strings).",
            party = trip.party_type,
            location = trip.location,
            guests = trip.guests,
            budget = preferences.budget.as_deref().unwrap_or("medium"),
            interests = preferences.interests.as_deref().unwrap_or("general travel"),
            mobility = preferences.mobility.as_deref().unwrap_or("standard"),
            diet = preferences.diet.as_deref().unwrap_or("no restrictions"),
        );

        let Some(text) = self
            .complete(
                "You are a professional travel concierge AI assistant. Provide detailed, \
                 practical, and personalized travel recommendations. You MUST respond with \
                 ONLY valid JSON format. Do not include any text before or after the JSON. \
                 The JSON must include all required fields: plan, activities, restaurants, \
                 and checklist.",
                prompt,
                0.3,
                3000,
            )
            .await?
        else {
            return Ok(TravelPlan::fallback());
        };

        Ok(parse_payload(&text).unwrap_or_else(TravelPlan::fallback))
    }

    async fn property_recommendations(
        &self,
        criteria: &SearchCriteria,
        preferences: &TravelerPreferences,
    ) -> Result<Recommendations, ConciergeError> {
        let prompt = format!(
            "Based on the following search criteria, suggest 5-7 property types and \
             features that would be ideal:\n\n\
             Search Criteria:\n\
             - Location: {location}\n\
             - Dates: {start} to {end}\n\
             - Guests: {guests}\n\
             - Budget: {budget}\n\n\
             User Preferences:\n\
             - Interests: {interests}\n\
             - Mobility: {mobility}\n\
             - Diet: {diet}\n\n\
             Provide property types, essential amenities, location preferences within \
             the city, and special considerations.\n\n\
             Format as JSON with keys: recommendations (array of {{propertyType, \
             amenities, locationNotes, specialConsiderations}}) and searchTips \
             (array of strings).",
            location = criteria.location,
            start = criteria.start_date,
            end = criteria.end_date,
            guests = criteria.guests,
            budget = criteria.budget.as_deref().unwrap_or("medium"),
            interests = preferences.interests.as_deref().unwrap_or("general travel"),
            mobility = preferences.mobility.as_deref().unwrap_or("standard"),
            diet = preferences.diet.as_deref().unwrap_or("no restrictions"),
        );

        let Some(text) = self
            .complete(
                "You are a property recommendation AI assistant. Provide helpful \
                 suggestions for property searches based on user preferences and travel \
                 needs.",
                prompt,
                0.6,
                1000,
            )
            .await?
        else {
            return Ok(Recommendations::fallback());
        };

        Ok(parse_payload(&text).unwrap_or_else(Recommendations::fallback))
    }

    async fn pricing_suggestions(
        &self,
        property: &PropertyDetails,
        market: &MarketContext,
    ) -> Result<PricingSuggestions, ConciergeError> {
        let prompt = format!(
            "Analyze the following property and provide pricing recommendations:\n\n\
             Property Details:\n\
             - Location: {location}\n\
             - Type: {ptype}\n\
             - Bedrooms: {bedrooms}\n\
             - Bathrooms: {bathrooms}\n\
             - Amenities: {amenities}\n\n\
             Market Context:\n\
             - Season: {season}\n\
             - Demand Level: {demand}\n\
             - Competition: {competition}\n\n\
             Provide a base nightly rate, seasonal adjustments, weekend pricing, \
             minimum stay recommendation, and revenue tips.\n\n\
             Format as JSON with keys: basePrice (number), seasonalAdjustments \
             ({{high, low}}), weekendMultiplier (number), minStayRecommendation \
             (number), tips (array of strings).",
            location = property.location,
            ptype = property.property_type,
            bedrooms = property.bedrooms,
            bathrooms = property.bathrooms,
            amenities = property.amenities.join(", "),
            season = market.season.as_deref().unwrap_or("year-round"),
            demand = market.demand.as_deref().unwrap_or("medium"),
            competition = market.competition.as_deref().unwrap_or("moderate"),
        );

        let Some(text) = self
            .complete(
                "You are a revenue optimization AI assistant for property owners. \
                 Provide data-driven pricing recommendations to maximize revenue while \
                 remaining competitive.",
                prompt,
                0.3,
                800,
            )
            .await?
        else {
            return Ok(PricingSuggestions::fallback());
        };

        Ok(parse_payload(&text).unwrap_or_else(PricingSuggestions::fallback))
    }

    async fn property_description(
        &self,
        listing: &ListingDetails,
    ) -> Result<PropertyDescription, ConciergeError> {
        let prompt = format!(
            "Write a compelling property description for a vacation rental listing:\n\n\
             Property Details:\n\
             - Name: {name}\n\
             - Location: {location}\n\
             - Type: {ptype}\n\
             - Bedrooms: {bedrooms}\n\
             - Bathrooms: {bathrooms}\n\
             - Price per night: ${price}\n\
             - Amenities: {amenities}\n\n\
             Requirements: 150-200 words, highlight unique features, include location \
             benefits, professional but warm tone, SEO-friendly keywords.\n\n\
             Format as JSON with keys: description (string), highlights (array of \
             strings), keywords (array of strings).",
            name = listing.name,
            location = listing.location,
            ptype = listing.property_type,
            bedrooms = listing.bedrooms,
            bathrooms = listing.bathrooms,
            price = listing.price_per_night,
            amenities = listing.amenities.join(", "),
        );

        let Some(text) = self
            .complete(
                "You are a professional copywriter specializing in vacation rental \
                 listings. Create compelling, accurate descriptions that attract guests \
                 while setting proper expectations.",
                prompt,
                0.7,
                500,
            )
            .await?
        else {
            return Ok(PropertyDescription::fallback(&format!(
                "{} is a {} in {}.",
                listing.name, listing.property_type, listing.location
            )));
        };

        Ok(parse_payload(&text).unwrap_or_else(|| PropertyDescription::fallback(&text)))
    }

    async fn welcome_message(
        &self,
        guest: &GuestDetails,
        host: &HostDetails,
    ) -> Result<WelcomeMessage, ConciergeError> {
        let prompt = format!(
            "Create a warm, personalized welcome message for a guest:\n\n\
             Guest Details:\n\
             - Name: {guest_name}\n\
             - Check-in: {check_in}\n\
             - Stay Duration: {duration} days\n\n\
             Property Details:\n\
             - Property Name: {property}\n\
             - Location: {location}\n\
             - Host Name: {host_name}\n\n\
             Requirements: warm and welcoming tone, key check-in information, local \
             recommendations, offer assistance.\n\n\
             Format as JSON with keys: subject (string), message (string), \
             checkInInstructions (array of strings), localTips (array of strings).",
            guest_name = guest.guest_name,
            check_in = guest.check_in_date,
            duration = guest.duration,
            property = host.property_name,
            location = host.location,
            host_name = host.owner_name.as_deref().unwrap_or("your host"),
        );

        let Some(text) = self
            .complete(
                "You are a hospitality AI assistant. Create warm, helpful welcome \
                 messages that make guests feel valued and informed.",
                prompt,
                0.8,
                600,
            )
            .await?
        else {
            return Ok(WelcomeMessage::fallback(&format!(
                "Welcome to {}, {}!",
                host.property_name, guest.guest_name
            )));
        };

        Ok(parse_payload(&text).unwrap_or_else(|| WelcomeMessage::fallback(&text)))
    }
}
