//! Public property search and detail.

use crate::error::AppError;
use crate::state::AppState;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use hostly_concierge::Concierge;
use hostly_core::{
    BookingRepository, EventPublisher, FavoriteRepository, Property, PropertyId,
    PropertyRepository, PropertySearch, SessionStore, UserRepository,
};
use serde::{Deserialize, Serialize};

/// Query string for `GET /properties/search`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Location substring.
    pub location: Option<String>,
    /// Check-in date, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Check-out date, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Minimum guest capacity.
    pub guests: Option<String>,
}

/// A listing as shown in search results.
#[derive(Debug, Serialize)]
pub struct PropertySummary {
    /// Property id.
    pub id: PropertyId,
    /// Listing title.
    pub name: String,
    /// "City, State" display location.
    pub location: String,
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
    /// Amenities as a list.
    pub amenities: Vec<String>,
    /// Cover image URL.
    pub main_image: Option<String>,
    /// Display-only tax rate percentage.
    pub tax_rate: f64,
}

impl From<&Property> for PropertySummary {
    fn from(property: &Property) -> Self {
        Self {
            id: property.id,
            name: property.name.clone(),
            location: property.location(),
            property_type: property.property_type.clone(),
            price_per_night: property.price_per_night,
            bedrooms: property.bedrooms,
            bathrooms: property.bathrooms,
            max_guests: property.max_guests,
            amenities: property.amenity_list(),
            main_image: property.main_image.clone(),
            tax_rate: property.tax_rate,
        }
    }
}

/// Full listing detail, a summary plus the description.
#[derive(Debug, Serialize)]
pub struct PropertyDetail {
    /// The summary fields.
    #[serde(flatten)]
    pub summary: PropertySummary,
    /// Free-form description.
    pub description: Option<String>,
}

/// Body for search results.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    /// Matching listings, newest first.
    pub properties: Vec<PropertySummary>,
}

fn parse_date(raw: Option<&str>) -> Result<Option<NaiveDate>, AppError> {
    match raw {
        None | Some("") => Ok(None),
        Some(s) => s.parse().map(Some).map_err(|_| {
            AppError::bad_request("Invalid date format. Please use YYYY-MM-DD format.")
        }),
    }
}

/// `GET /properties/search`
pub async fn search<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    Query(params): Query<SearchParams>,
) -> Result<Json<SearchResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let search = PropertySearch {
        location: params.location.filter(|l| !l.is_empty()),
        start_date: parse_date(params.start_date.as_deref())?,
        end_date: parse_date(params.end_date.as_deref())?,
        guests: params.guests.as_deref().and_then(|g| g.parse().ok()),
    };
    search.validate_dates(chrono::Utc::now().date_naive())?;

    let properties = state.properties.search(&search).await?;
    Ok(Json(SearchResponse {
        properties: properties.iter().map(PropertySummary::from).collect(),
    }))
}

/// `GET /properties/:id`
pub async fn detail<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    Path(property_id): Path<PropertyId>,
) -> Result<Json<PropertyDetail>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    let property = state.properties.get_property(property_id).await?;
    Ok(Json(PropertyDetail {
        description: property.description.clone(),
        summary: PropertySummary::from(&property),
    }))
}
