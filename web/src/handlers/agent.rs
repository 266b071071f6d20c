//! AI concierge endpoints.
//!
//! Bodies arrive as loose JSON so missing sections can be answered with the
//! exact 400 messages the frontend expects, rather than a generic
//! deserialization rejection.

use crate::error::AppError;
use crate::extractors::AppJson;
use crate::state::AppState;
use axum::{extract::State, Json};
use hostly_concierge::types::{
    GuestDetails, HostDetails, ListingDetails, MarketContext, PricingSuggestions,
    PropertyDescription, PropertyDetails, Recommendations, SearchCriteria, TravelPlan,
    TravelerPreferences, TripDetails, WelcomeMessage,
};
use hostly_concierge::{Concierge, ConciergeError};
use hostly_core::{
    BookingRepository, EventPublisher, FavoriteRepository, PropertyRepository, SessionStore,
    UserRepository,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

/// Body for `POST /agent/concierge`.
#[derive(Debug, Deserialize)]
pub struct ConciergeRequest {
    /// Trip being planned.
    pub booking: Option<Value>,
    /// Traveler preferences.
    pub preferences: Option<Value>,
}

/// Body for `POST /agent/property-recommendations`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsRequest {
    /// Search the traveler ran.
    pub search_criteria: Option<Value>,
    /// Traveler preferences.
    pub user_preferences: Option<Value>,
}

/// Body for `POST /agent/pricing-suggestions`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRequest {
    /// Property to price.
    pub property_data: Option<Value>,
    /// Market context.
    pub market_data: Option<Value>,
}

/// Body for `POST /agent/property-description`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescriptionRequest {
    /// Listing to describe.
    pub property_data: Option<Value>,
}

/// Body for `POST /agent/welcome-message`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WelcomeRequest {
    /// Arriving guest.
    pub guest_data: Option<Value>,
    /// Property and host.
    pub property_data: Option<Value>,
}

fn parse_section<T: DeserializeOwned>(value: Value, message: &str) -> Result<T, AppError> {
    serde_json::from_value(value).map_err(|_| AppError::bad_request(message))
}

fn parse_optional<T: DeserializeOwned + Default>(value: Option<Value>) -> T {
    value
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or_default()
}

fn concierge_failure(err: ConciergeError, message: &str) -> AppError {
    AppError::internal(message).with_source(err.into())
}

/// `POST /agent/concierge`
pub async fn travel_plan<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<ConciergeRequest>,
) -> Result<Json<TravelPlan>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let (Some(booking), Some(preferences)) = (request.booking, request.preferences) else {
        return Err(AppError::bad_request(
            "Missing required fields: booking and preferences",
        ));
    };
    let trip: TripDetails = parse_section(
        booking,
        "Missing required booking fields: location, startDate, endDate, partyType, guests",
    )?;
    let preferences: TravelerPreferences = parse_optional(Some(preferences));

    tracing::info!(location = %trip.location, party = %trip.party_type, "Generating travel plan");
    let plan = state
        .concierge
        .travel_plan(&trip, &preferences)
        .await
        .map_err(|e| concierge_failure(e, "Failed to generate travel plan"))?;
    Ok(Json(plan))
}

/// `POST /agent/property-recommendations`
pub async fn property_recommendations<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<RecommendationsRequest>,
) -> Result<Json<Recommendations>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let Some(criteria) = request.search_criteria else {
        return Err(AppError::bad_request("Missing required field: searchCriteria"));
    };
    let criteria: SearchCriteria = parse_section(
        criteria,
        "Missing required search fields: location, startDate, endDate, guests",
    )?;
    let preferences: TravelerPreferences = parse_optional(request.user_preferences);

    tracing::info!(location = %criteria.location, "Generating property recommendations");
    let recommendations = state
        .concierge
        .property_recommendations(&criteria, &preferences)
        .await
        .map_err(|e| concierge_failure(e, "Failed to generate property recommendations"))?;
    Ok(Json(recommendations))
}

/// `POST /agent/pricing-suggestions`
pub async fn pricing_suggestions<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<PricingRequest>,
) -> Result<Json<PricingSuggestions>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let Some(property) = request.property_data else {
        return Err(AppError::bad_request("Missing required field: propertyData"));
    };
    let property: PropertyDetails = parse_section(
        property,
        "Missing required property fields: location, propertyType, bedrooms, bathrooms",
    )?;
    let market: MarketContext = parse_optional(request.market_data);

    tracing::info!(property_type = %property.property_type, location = %property.location, "Generating pricing suggestions");
    let suggestions = state
        .concierge
        .pricing_suggestions(&property, &market)
        .await
        .map_err(|e| concierge_failure(e, "Failed to generate pricing suggestions"))?;
    Ok(Json(suggestions))
}

/// `POST /agent/property-description`
pub async fn property_description<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<DescriptionRequest>,
) -> Result<Json<PropertyDescription>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let Some(listing) = request.property_data else {
        return Err(AppError::bad_request("Missing required field: propertyData"));
    };
    let listing: ListingDetails = parse_section(
        listing,
        "Missing required property fields: name, location, propertyType, bedrooms, bathrooms",
    )?;

    tracing::info!(name = %listing.name, location = %listing.location, "Generating property description");
    let description = state
        .concierge
        .property_description(&listing)
        .await
        .map_err(|e| concierge_failure(e, "Failed to generate property description"))?;
    Ok(Json(description))
}

/// `POST /agent/welcome-message`
pub async fn welcome_message<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    AppJson(request): AppJson<WelcomeRequest>,
) -> Result<Json<WelcomeMessage>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let (Some(guest), Some(host)) = (request.guest_data, request.property_data) else {
        return Err(AppError::bad_request(
            "Missing required fields: guestData and propertyData",
        ));
    };
    let missing = "Missing required fields: guestName, checkInDate, propertyName, location";
    let guest: GuestDetails = parse_section(guest, missing)?;
    let host: HostDetails = parse_section(host, missing)?;

    tracing::info!(guest = %guest.guest_name, "Generating welcome message");
    let message = state
        .concierge
        .welcome_message(&guest, &host)
        .await
        .map_err(|e| concierge_failure(e, "Failed to generate welcome message"))?;
    Ok(Json(message))
}
