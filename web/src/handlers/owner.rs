//! Owner dashboard: listings and incoming booking requests.

use crate::error::AppError;
use crate::extractors::{AppJson, SessionToken};
use crate::handlers::bookings::BookingListResponse;
use crate::handlers::properties::PropertySummary;
use crate::handlers::require_user;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use chrono::{DateTime, Utc};
use hostly_concierge::Concierge;
use hostly_core::property::split_location;
use hostly_core::{
    BookingRepository, EventPublisher, FavoriteRepository, NewProperty, Property,
    PropertyRepository, SessionStore, UserRepository,
};
use serde::{Deserialize, Serialize};

/// Cover image used when a listing is created without one.
const DEFAULT_MAIN_IMAGE: &str =
    "https://images.unsplash.com/photo-1522708323590-d24dbb6b0267?w=800&h=600&fit=crop&crop=entropy&cs=tinysrgb";

/// Amenities arrive either as a list or as an already comma-joined string.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum Amenities {
    /// A list of amenity names.
    List(Vec<String>),
    /// A comma-joined string.
    Text(String),
}

impl Amenities {
    fn into_joined(self) -> String {
        match self {
            Self::List(items) => items.join(","),
            Self::Text(text) => text,
        }
    }
}

/// Body for `POST /owner/properties`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePropertyRequest {
    /// Listing title.
    #[serde(default)]
    pub name: String,
    /// Kind of property.
    #[serde(default, rename = "type")]
    pub property_type: String,
    /// "City, ST, Country" location string.
    #[serde(default)]
    pub location: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Nightly rate in dollars.
    pub pricing: Option<f64>,
    /// Amenity list.
    pub amenities: Option<Amenities>,
    /// Bedroom count, defaults to 1.
    pub bedrooms: Option<i32>,
    /// Bathroom count, defaults to 1.
    pub bathrooms: Option<i32>,
    /// Cover image URL.
    pub main_image: Option<String>,
    /// Display-only tax rate percentage, defaults to 0.
    pub tax_rate: Option<f64>,
}

/// An owner's listing with its accepted-booking count.
#[derive(Debug, Serialize)]
pub struct OwnerProperty {
    /// The listing fields.
    #[serde(flatten)]
    pub summary: PropertySummary,
    /// Always "active"; listings have no lifecycle yet.
    pub status: &'static str,
    /// Accepted bookings on this listing.
    pub total_bookings: i64,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Body for the owner's listing overview.
#[derive(Debug, Serialize)]
pub struct OwnerPropertiesResponse {
    /// Listings, newest first.
    pub properties: Vec<OwnerProperty>,
}

/// Body after creating a listing.
#[derive(Debug, Serialize)]
pub struct CreatePropertyResponse {
    /// What happened.
    pub message: String,
    /// The created listing.
    pub property: PropertySummary,
}

fn owner_property(property: &Property, total_bookings: i64) -> OwnerProperty {
    OwnerProperty {
        summary: PropertySummary::from(property),
        status: "active",
        total_bookings,
        created_at: property.created_at,
    }
}

/// `GET /owner/properties`
pub async fn list_properties<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
) -> Result<Json<OwnerPropertiesResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let user = require_user(&state.users, &state.sessions, token).await?;
    let properties = state.properties.list_by_owner(user.id).await?;
    let counts = state.properties.accepted_booking_counts(user.id).await?;

    let properties = properties
        .iter()
        .map(|p| owner_property(p, counts.get(&p.id).copied().unwrap_or(0)))
        .collect();
    Ok(Json(OwnerPropertiesResponse { properties }))
}

/// `POST /owner/properties`
pub async fn create_property<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    AppJson(request): AppJson<CreatePropertyRequest>,
) -> Result<(StatusCode, Json<CreatePropertyResponse>), AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let user = require_user(&state.users, &state.sessions, token).await?;

    let Some(pricing) = request.pricing else {
        return Err(AppError::bad_request("Missing required fields"));
    };
    if request.name.is_empty() || request.property_type.is_empty() || request.location.is_empty() {
        return Err(AppError::bad_request("Missing required fields"));
    }

    let (city, state_code, country) = split_location(&request.location);
    let bedrooms = request.bedrooms.unwrap_or(1);
    let property = state
        .properties
        .create_property(NewProperty {
            owner_id: user.id,
            name: request.name,
            description: request.description,
            city,
            state: state_code,
            country,
            property_type: request.property_type,
            price_per_night: pricing,
            bedrooms,
            bathrooms: request.bathrooms.unwrap_or(1),
            max_guests: bedrooms * 2,
            amenities: request.amenities.map(Amenities::into_joined),
            main_image: Some(
                request
                    .main_image
                    .unwrap_or_else(|| DEFAULT_MAIN_IMAGE.to_string()),
            ),
            tax_rate: request.tax_rate.unwrap_or(0.0),
        })
        .await?;

    tracing::info!(property_id = %property.id, "Property created");
    Ok((
        StatusCode::CREATED,
        Json(CreatePropertyResponse {
            message: "Property created successfully".to_string(),
            property: PropertySummary::from(&property),
        }),
    ))
}

/// `GET /owner/bookings`
pub async fn list_bookings<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
) -> Result<Json<BookingListResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let user = require_user(&state.users, &state.sessions, token).await?;
    let bookings = state.bookings.list_for_owner(user.id).await?;
    Ok(Json(BookingListResponse { bookings }))
}
