//! Router composition.

use crate::handlers::{agent, auth, bookings, favorites, health, owner, properties, traveler};
use crate::middleware::correlation_id_layer;
use crate::state::AppState;
use axum::http::{header, HeaderValue, Method};
use axum::{
    routing::{delete, get, post, put},
    Router,
};
use hostly_concierge::Concierge;
use hostly_core::{
    BookingRepository, EventPublisher, FavoriteRepository, PropertyRepository, SessionStore,
    UserRepository,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full application router, nested under `/api`.
///
/// # Routes
///
/// ## Auth
/// - `POST /api/auth/register`
/// - `POST /api/auth/login`
/// - `POST /api/auth/logout`
/// - `GET /api/auth/me`
///
/// ## Properties
/// - `GET /api/properties/search`
/// - `GET /api/properties/:id`
///
/// ## Bookings
/// - `POST /api/bookings`
/// - `GET /api/bookings/me`
/// - `POST /api/bookings/:id/accept`
/// - `POST /api/bookings/:id/cancel`
///
/// ## Favorites
/// - `GET /api/favorites`
/// - `POST /api/favorites`
/// - `DELETE /api/favorites/:propertyId`
/// - `GET /api/favorites/check/:propertyId`
///
/// ## Traveler / Owner
/// - `PUT /api/traveler/profile`
/// - `GET /api/traveler/favorites`
/// - `GET /api/owner/properties`
/// - `POST /api/owner/properties`
/// - `GET /api/owner/bookings`
///
/// ## Agent
/// - `POST /api/agent/concierge`
/// - `POST /api/agent/property-recommendations`
/// - `POST /api/agent/pricing-suggestions`
/// - `POST /api/agent/property-description`
/// - `POST /api/agent/welcome-message`
///
/// ## Health
/// - `GET /api/health`
pub fn app_router<U, P, B, F, S, E, C>(
    state: AppState<U, P, B, F, S, E, C>,
    cors_origin: &HeaderValue,
) -> Router
where
    U: UserRepository + Clone + 'static,
    P: PropertyRepository + Clone + 'static,
    B: BookingRepository + Clone + 'static,
    F: FavoriteRepository + Clone + 'static,
    S: SessionStore + Clone + 'static,
    E: EventPublisher + Clone + 'static,
    C: Concierge + Clone + 'static,
{
    // Credentialed CORS: the session cookie only flows when the exact
    // frontend origin is allowed, never a wildcard.
    let cors = CorsLayer::new()
        .allow_origin(cors_origin.clone())
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    let api = Router::new()
        .route("/health", get(health::health))
        .route("/auth/register", post(auth::register::<U, P, B, F, S, E, C>))
        .route("/auth/login", post(auth::login::<U, P, B, F, S, E, C>))
        .route("/auth/logout", post(auth::logout::<U, P, B, F, S, E, C>))
        .route("/auth/me", get(auth::me::<U, P, B, F, S, E, C>))
        .route("/properties/search", get(properties::search::<U, P, B, F, S, E, C>))
        .route("/properties/:id", get(properties::detail::<U, P, B, F, S, E, C>))
        .route("/bookings", post(bookings::create::<U, P, B, F, S, E, C>))
        .route("/bookings/me", get(bookings::list_mine::<U, P, B, F, S, E, C>))
        .route("/bookings/:id/accept", post(bookings::accept::<U, P, B, F, S, E, C>))
        .route("/bookings/:id/cancel", post(bookings::cancel::<U, P, B, F, S, E, C>))
        .route("/favorites", get(favorites::list::<U, P, B, F, S, E, C>))
        .route("/favorites", post(favorites::add::<U, P, B, F, S, E, C>))
        .route("/favorites/:propertyId", delete(favorites::remove::<U, P, B, F, S, E, C>))
        .route("/favorites/check/:propertyId", get(favorites::check::<U, P, B, F, S, E, C>))
        .route("/traveler/profile", put(traveler::update_profile::<U, P, B, F, S, E, C>))
        .route("/traveler/favorites", get(favorites::list::<U, P, B, F, S, E, C>))
        .route("/owner/properties", get(owner::list_properties::<U, P, B, F, S, E, C>))
        .route("/owner/properties", post(owner::create_property::<U, P, B, F, S, E, C>))
        .route("/owner/bookings", get(owner::list_bookings::<U, P, B, F, S, E, C>))
        .route("/agent/concierge", post(agent::travel_plan::<U, P, B, F, S, E, C>))
        .route(
            "/agent/property-recommendations",
            post(agent::property_recommendations::<U, P, B, F, S, E, C>),
        )
        .route(
            "/agent/pricing-suggestions",
            post(agent::pricing_suggestions::<U, P, B, F, S, E, C>),
        )
        .route(
            "/agent/property-description",
            post(agent::property_description::<U, P, B, F, S, E, C>),
        )
        .route(
            "/agent/welcome-message",
            post(agent::welcome_message::<U, P, B, F, S, E, C>),
        )
        .with_state(state);

    Router::new()
        .nest("/api", api)
        .layer(correlation_id_layer())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
