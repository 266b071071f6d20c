//! # Hostly web
//!
//! The Axum HTTP surface for the Hostly marketplace, nested under `/api`.
//!
//! Handlers are generic over the provider traits in `hostly-core` and the
//! [`hostly_concierge::Concierge`] seam, so the same router runs against
//! Postgres, Kafka, and the live concierge in production and against
//! in-memory implementations in tests.
//!
//! # Request Flow
//!
//! 1. **HTTP request** arrives at an Axum handler
//! 2. **Session cookie** is resolved to a user where the route requires one
//! 3. **Domain validation** runs in `hostly-core` (dates, capacity, roles)
//! 4. **Providers** persist and fetch through the repository traits
//! 5. **Events** are published fire-and-forget; a broker failure never
//!    surfaces to the HTTP response
//! 6. **Errors** map to the `{ code, message }` JSON body via [`AppError`]
//!
//! # Example
//!
//! ```ignore
//! use hostly_web::{app_router, AppState};
//!
//! let state = AppState {
//!     users: user_store,
//!     properties: property_store,
//!     bookings: booking_store,
//!     favorites: favorite_store,
//!     sessions: session_store,
//!     events: event_bus,
//!     concierge,
//! };
//! let app = app_router(state, &"http://localhost:5173".parse()?);
//! axum::serve(listener, app).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use error::AppError;
pub use extractors::{AppJson, CorrelationId, SessionToken, SESSION_COOKIE};
pub use middleware::{correlation_id_layer, CORRELATION_ID_HEADER};
pub use router::app_router;
pub use state::AppState;

/// Result type alias for web handlers.
pub type WebResult<T> = Result<T, AppError>;
