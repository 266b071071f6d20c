//! Traveler profile updates.

use crate::error::AppError;
use crate::extractors::{AppJson, SessionToken};
use crate::handlers::require_user;
use crate::state::AppState;
use axum::{extract::State, Json};
use hostly_concierge::Concierge;
use hostly_core::user::validate_email;
use hostly_core::{
    BookingRepository, EventPublisher, FavoriteRepository, ProfileUpdate, PropertyRepository,
    SessionStore, User, UserRepository,
};
use serde::Serialize;

/// Body wrapping the updated user.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    /// The updated user.
    pub user: User,
}

/// `PUT /traveler/profile`
pub async fn update_profile<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    AppJson(update): AppJson<ProfileUpdate>,
) -> Result<Json<ProfileResponse>, AppError>
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
    if let Some(email) = update.email.as_deref() {
        validate_email(email)?;
    }
    let user = state.users.update_profile(user.id, update).await?;
    Ok(Json(ProfileResponse { user }))
}
