//! Error types for the concierge client.

use thiserror::Error;

/// Errors from the chat-completions API client.
///
/// Malformed model output is NOT an error: every operation has a static
/// fallback payload for that case. These errors cover the transport only.
#[derive(Debug, Error)]
pub enum ConciergeError {
    /// Missing `GROQ_API_KEY` environment variable.
    #[error("Missing GROQ_API_KEY environment variable")]
    MissingApiKey,

    /// The underlying HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuildFailed(String),

    /// HTTP request failed.
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Response body could not be parsed.
    #[error("Response parsing failed: {0}")]
    ResponseParseFailed(String),

    /// Rate limited by the API.
    #[error("Rate limited - too many requests")]
    RateLimited,

    /// Invalid API key.
    #[error("Unauthorized - invalid API key")]
    Unauthorized,

    /// API returned an unexpected status.
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Error body from the API.
        message: String,
    },
}
