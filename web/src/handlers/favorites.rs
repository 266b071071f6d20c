//! Traveler favorites.

use crate::error::AppError;
use crate::extractors::{AppJson, SessionToken};
use crate::handlers::require_user;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use hostly_concierge::Concierge;
use hostly_core::{
    BookingRepository, EventPublisher, Favorite, FavoriteProperty, FavoriteRepository, PropertyId,
    PropertyRepository, SessionStore, UserRepository,
};
use serde::{Deserialize, Serialize};

/// Body for `POST /favorites`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddFavoriteRequest {
    /// Property to save.
    pub property_id: PropertyId,
}

/// A saved property as listed by the API, with a "City, State" location.
#[derive(Debug, Serialize)]
pub struct FavoriteSummary {
    /// Saved property id.
    pub property_id: PropertyId,
    /// Property name.
    pub name: String,
    /// "City, State" display location.
    pub location: String,
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

impl From<FavoriteProperty> for FavoriteSummary {
    fn from(favorite: FavoriteProperty) -> Self {
        Self {
            property_id: favorite.property_id,
            name: favorite.name,
            location: format!("{}, {}", favorite.city, favorite.state),
            property_type: favorite.property_type,
            price_per_night: favorite.price_per_night,
            bedrooms: favorite.bedrooms,
            bathrooms: favorite.bathrooms,
            max_guests: favorite.max_guests,
            main_image: favorite.main_image,
            favorited_at: favorite.favorited_at,
        }
    }
}

/// Body for the favorites list.
#[derive(Debug, Serialize)]
pub struct FavoriteListResponse {
    /// Saved properties, most recently saved first.
    pub favorites: Vec<FavoriteSummary>,
}

/// Body after saving a property.
#[derive(Debug, Serialize)]
pub struct AddFavoriteResponse {
    /// What happened.
    pub message: String,
    /// The created favorite.
    pub favorite: Favorite,
}

/// Body after removing a saved property.
#[derive(Debug, Serialize)]
pub struct RemoveFavoriteResponse {
    /// What happened.
    pub message: String,
}

/// Body for the membership check.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckFavoriteResponse {
    /// Whether the property is saved.
    pub is_favorite: bool,
}

/// `GET /favorites`
pub async fn list<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
) -> Result<Json<FavoriteListResponse>, AppError>
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
    let favorites = state.favorites.list_favorites(user.id).await?;
    Ok(Json(FavoriteListResponse {
        favorites: favorites.into_iter().map(FavoriteSummary::from).collect(),
    }))
}

/// `POST /favorites`
pub async fn add<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    AppJson(request): AppJson<AddFavoriteRequest>,
) -> Result<(StatusCode, Json<AddFavoriteResponse>), AppError>
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

    // Reject saves of nonexistent properties before touching the join table.
    state.properties.get_property(request.property_id).await?;

    let favorite = state
        .favorites
        .add_favorite(user.id, request.property_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(AddFavoriteResponse {
            message: "Property added to favorites".to_string(),
            favorite,
        }),
    ))
}

/// `DELETE /favorites/:propertyId`
pub async fn remove<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    Path(property_id): Path<PropertyId>,
) -> Result<Json<RemoveFavoriteResponse>, AppError>
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
    state.favorites.remove_favorite(user.id, property_id).await?;
    Ok(Json(RemoveFavoriteResponse {
        message: "Property removed from favorites".to_string(),
    }))
}

/// `GET /favorites/check/:propertyId`
pub async fn check<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    Path(property_id): Path<PropertyId>,
) -> Result<Json<CheckFavoriteResponse>, AppError>
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
    let is_favorite = state
        .favorites
        .list_favorites(user.id)
        .await?
        .iter()
        .any(|f| f.property_id == property_id);
    Ok(Json(CheckFavoriteResponse { is_favorite }))
}
