//! Error types for web handlers.
//!
//! [`AppError`] bridges domain errors and HTTP responses via Axum's
//! `IntoResponse`. The JSON body is `{ code, message }`; internal details
//! stay in the logs.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

/// Application error type for web handlers.
#[derive(Debug)]
pub struct AppError {
    /// HTTP status code.
    status: StatusCode,
    /// User-facing message.
    message: String,
    /// Stable code for client error handling.
    code: String,
    /// Internal error, logged but never exposed.
    source: Option<anyhow::Error>,
}

impl AppError {
    /// Create a new application error.
    #[must_use]
    pub const fn new(status: StatusCode, message: String, code: String) -> Self {
        Self {
            status,
            message,
            code,
            source: None,
        }
    }

    /// Attach a source error for logging.
    #[must_use]
    pub fn with_source(mut self, source: anyhow::Error) -> Self {
        self.source = Some(source);
        self
    }

    /// 400 Bad Request.
    #[must_use]
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::BAD_REQUEST,
            message.into(),
            "BAD_REQUEST".to_string(),
        )
    }

    /// 401 Unauthorized.
    #[must_use]
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::UNAUTHORIZED,
            message.into(),
            "UNAUTHORIZED".to_string(),
        )
    }

    /// 403 Forbidden.
    #[must_use]
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::FORBIDDEN,
            message.into(),
            "FORBIDDEN".to_string(),
        )
    }

    /// 404 Not Found.
    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::NOT_FOUND,
            message.into(),
            "NOT_FOUND".to_string(),
        )
    }

    /// 409 Conflict.
    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message.into(), "CONFLICT".to_string())
    }

    /// 500 Internal Server Error.
    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::INTERNAL_SERVER_ERROR,
            message.into(),
            "INTERNAL_SERVER_ERROR".to_string(),
        )
    }

    /// 503 Service Unavailable.
    #[must_use]
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(
            StatusCode::SERVICE_UNAVAILABLE,
            message.into(),
            "SERVICE_UNAVAILABLE".to_string(),
        )
    }

    /// The HTTP status this error maps to.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

/// Error response body (JSON).
#[derive(Debug, Serialize)]
struct ErrorResponse {
    code: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            if let Some(source) = &self.source {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    error = %source,
                    "Internal server error"
                );
            } else {
                tracing::error!(
                    status = %self.status,
                    code = %self.code,
                    message = %self.message,
                    "Internal server error"
                );
            }
        }

        let body = ErrorResponse {
            code: self.code,
            message: self.message,
        };

        (self.status, Json(body)).into_response()
    }
}

impl From<hostly_core::Error> for AppError {
    fn from(err: hostly_core::Error) -> Self {
        use hostly_core::Error;
        match err {
            Error::Validation(message) => Self::bad_request(message),
            Error::InvalidCredentials => Self::unauthorized(err.to_string()),
            Error::NotAuthorized => Self::forbidden("Not authorized"),
            Error::NotFound { .. } => Self::not_found(err.to_string()),
            Error::Conflict(message) => Self::conflict(message),
            Error::SessionExpired | Error::SessionNotFound => {
                Self::unauthorized("Authentication required")
            }
            Error::Database(_) | Error::PasswordHash(_) | Error::Internal(_) => {
                Self::internal("An internal error occurred").with_source(anyhow::anyhow!(err))
            }
            Error::Unavailable(message) => Self::unavailable(message),
        }
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::internal("An internal error occurred").with_source(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_code() {
        let err = AppError::bad_request("Invalid input");
        assert_eq!(err.to_string(), "[BAD_REQUEST] Invalid input");
    }

    #[test]
    fn domain_errors_map_to_statuses() {
        let cases = [
            (
                hostly_core::Error::Validation("bad".into()),
                StatusCode::BAD_REQUEST,
            ),
            (
                hostly_core::Error::InvalidCredentials,
                StatusCode::UNAUTHORIZED,
            ),
            (hostly_core::Error::NotAuthorized, StatusCode::FORBIDDEN),
            (
                hostly_core::Error::not_found("Property"),
                StatusCode::NOT_FOUND,
            ),
            (
                hostly_core::Error::Conflict("dup".into()),
                StatusCode::CONFLICT,
            ),
            (hostly_core::Error::SessionExpired, StatusCode::UNAUTHORIZED),
            (
                hostly_core::Error::Database("boom".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                hostly_core::Error::Unavailable("kafka".into()),
                StatusCode::SERVICE_UNAVAILABLE,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).status(), status);
        }
    }

    #[test]
    fn internals_are_masked() {
        let err = AppError::from(hostly_core::Error::Database("password table".into()));
        assert_eq!(err.to_string(), "[INTERNAL_SERVER_ERROR] An internal error occurred");
    }
}
