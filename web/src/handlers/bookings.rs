//! Booking creation, listing, and the owner accept/cancel transitions.

use crate::error::AppError;
use crate::extractors::{AppJson, SessionToken};
use crate::handlers::require_user;
use crate::state::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use hostly_concierge::Concierge;
use hostly_core::{
    Booking, BookingCreated, BookingId, BookingRepository, BookingRequest, BookingStatus,
    BookingStatusUpdated, BookingWithProperty, EventPublisher, FavoriteRepository, NewBooking,
    PropertyId, PropertyRepository, SessionStore, UserRepository,
};
use serde::{Deserialize, Serialize};

/// Body for `POST /bookings`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    /// Property to book.
    pub property_id: PropertyId,
    /// Check-in date, `YYYY-MM-DD`.
    pub start_date: chrono::NaiveDate,
    /// Check-out date, `YYYY-MM-DD`.
    pub end_date: chrono::NaiveDate,
    /// Party size.
    pub guests: i32,
}

/// Body wrapping a booking plus a human-readable message.
#[derive(Debug, Serialize)]
pub struct BookingResponse {
    /// What happened.
    pub message: String,
    /// The affected booking.
    pub booking: Booking,
}

/// Body for the traveler's booking list.
#[derive(Debug, Serialize)]
pub struct BookingListResponse {
    /// Bookings, newest first.
    pub bookings: Vec<BookingWithProperty>,
}

fn spawn_created_event<E>(events: E, booking: &Booking)
where
    E: EventPublisher + Clone + 'static,
{
    let event = BookingCreated::from(booking);
    tokio::spawn(async move {
        if let Err(e) = events.publish_booking_created(&event).await {
            tracing::warn!(booking_id = %event.id, error = %e, "Failed to publish booking-created event");
        }
    });
}

fn spawn_status_event<E>(events: E, booking: &Booking)
where
    E: EventPublisher + Clone + 'static,
{
    let event = BookingStatusUpdated::from(booking);
    tokio::spawn(async move {
        if let Err(e) = events.publish_booking_status_updated(&event).await {
            tracing::warn!(booking_id = %event.id, error = %e, "Failed to publish booking-status-updated event");
        }
    });
}

/// `POST /bookings`
pub async fn create<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    AppJson(request): AppJson<CreateBookingRequest>,
) -> Result<(StatusCode, Json<BookingResponse>), AppError>
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

    let booking_request = BookingRequest {
        property_id: request.property_id,
        start_date: request.start_date,
        end_date: request.end_date,
        num_guests: request.guests,
    };
    booking_request.validate(chrono::Utc::now().date_naive())?;

    let property = state
        .properties
        .get_property(booking_request.property_id)
        .await?;
    booking_request.check_capacity(&property)?;

    let quote = booking_request.quote(property.price_per_night);
    let booking = state
        .bookings
        .create_booking(NewBooking {
            property_id: booking_request.property_id,
            traveler_id: user.id,
            start_date: booking_request.start_date,
            end_date: booking_request.end_date,
            num_guests: booking_request.num_guests,
            total_price: quote.total_price,
        })
        .await?;

    tracing::info!(booking_id = %booking.id, nights = quote.nights, "Booking request created");
    spawn_created_event(state.events.clone(), &booking);

    Ok((
        StatusCode::CREATED,
        Json(BookingResponse {
            message: "Booking request created successfully".to_string(),
            booking,
        }),
    ))
}

/// `GET /bookings/me`
pub async fn list_mine<U, P, B, F, S, E, C>(
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
    let bookings = state.bookings.list_for_traveler(user.id).await?;
    Ok(Json(BookingListResponse { bookings }))
}

async fn transition<U, P, B, F, S, E, C>(
    state: &AppState<U, P, B, F, S, E, C>,
    token: SessionToken,
    booking_id: BookingId,
    status: BookingStatus,
    message: &str,
) -> Result<Json<BookingResponse>, AppError>
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

    let booking = state.bookings.get_booking(booking_id).await?;
    let property = state.properties.get_property(booking.property_id).await?;
    if property.owner_id != user.id {
        return Err(AppError::forbidden("Not authorized"));
    }

    let booking = state.bookings.update_status(booking_id, status).await?;
    tracing::info!(booking_id = %booking.id, status = status.as_str(), "Booking status updated");
    spawn_status_event(state.events.clone(), &booking);

    Ok(Json(BookingResponse {
        message: message.to_string(),
        booking,
    }))
}

/// `POST /bookings/:id/accept`
pub async fn accept<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    transition(
        &state,
        token,
        booking_id,
        BookingStatus::Accepted,
        "Booking accepted successfully",
    )
    .await
}

/// `POST /bookings/:id/cancel`
pub async fn cancel<U, P, B, F, S, E, C>(
    State(state): State<AppState<U, P, B, F, S, E, C>>,
    token: SessionToken,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, AppError>
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    transition(
        &state,
        token,
        booking_id,
        BookingStatus::Cancelled,
        "Booking cancelled successfully",
    )
    .await
}
