//! Error types for domain and storage operations.

use thiserror::Error;

/// Result type alias for domain operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the domain rules and every provider.
///
/// The web layer maps these onto HTTP statuses: validation → 400,
/// authentication → 401, ownership → 403, missing resources → 404,
/// conflicts → 409, storage/infrastructure → 500/503.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Request failed a business rule or shape check.
    #[error("{0}")]
    Validation(String),

    /// No session, or the credentials did not match.
    #[error("Invalid email or password")]
    InvalidCredentials,

    /// The caller is not allowed to act on this resource.
    #[error("Not authorized")]
    NotAuthorized,

    /// Requested resource does not exist.
    #[error("{resource} not found")]
    NotFound {
        /// Human-readable resource name ("Property", "Booking", ...).
        resource: &'static str,
    },

    /// Uniqueness conflict (duplicate email, duplicate favorite pair).
    #[error("{0}")]
    Conflict(String),

    /// Session has expired.
    #[error("Session has expired")]
    SessionExpired,

    /// Session not found.
    #[error("Session not found")]
    SessionNotFound,

    /// Database operation failed.
    #[error("Database error: {0}")]
    Database(String),

    /// Password hashing or verification failed.
    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    /// A required dependency is unavailable.
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    /// Catch-all for unexpected internal failures.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a not-found error.
    #[must_use]
    pub const fn not_found(resource: &'static str) -> Self {
        Self::NotFound { resource }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_the_resource() {
        let err = Error::not_found("Property");
        assert_eq!(err.to_string(), "Property not found");
    }

    #[test]
    fn validation_message_passes_through() {
        let err = Error::Validation("Check-in date cannot be in the past".into());
        assert_eq!(err.to_string(), "Check-in date cannot be in the past");
    }
}
