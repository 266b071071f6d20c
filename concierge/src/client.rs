//! HTTP client for the chat-completions API.

use crate::chat::{ChatRequest, ChatResponse};
use crate::error::ConciergeError;
use reqwest::{Client, StatusCode};
use std::time::Duration;

const DEFAULT_API_URL: &str = "https://api.groq.com/openai/v1";

/// Chat-completions API client.
#[derive(Clone)]
pub struct ChatClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl ChatClient {
    /// Create a client with the API key from `GROQ_API_KEY`.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::MissingApiKey`] if the variable is not set,
    /// or [`ConciergeError::ClientBuildFailed`] if the HTTP client cannot be
    /// constructed.
    pub fn from_env() -> Result<Self, ConciergeError> {
        let api_key =
            std::env::var("GROQ_API_KEY").map_err(|_| ConciergeError::MissingApiKey)?;
        Self::new(api_key)
    }

    /// Create a client with an explicit API key. Requests time out after 30
    /// seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError::ClientBuildFailed`] if the HTTP client
    /// cannot be constructed.
    pub fn new(api_key: String) -> Result<Self, ConciergeError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ConciergeError::ClientBuildFailed(e.to_string()))?;
        Ok(Self {
            client,
            api_key,
            api_url: DEFAULT_API_URL.to_string(),
        })
    }

    /// Override the API base URL (tests point this at a mock server).
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Send a chat request and return the completion.
    ///
    /// # Errors
    ///
    /// Returns [`ConciergeError`] variants for network failures, auth
    /// problems, rate limiting, and unparseable bodies.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse, ConciergeError> {
        let response = self
            .client
            .post(format!("{}/chat/completions", self.api_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ConciergeError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<ChatResponse>()
                .await
                .map_err(|e| ConciergeError::ResponseParseFailed(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(ConciergeError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(ConciergeError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(ConciergeError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_builds_with_groq_default() {
        let client = ChatClient::new("test-key".to_string()).unwrap();
        assert_eq!(client.api_url, DEFAULT_API_URL);
    }

    #[test]
    fn api_url_override() {
        let client = ChatClient::new("test-key".to_string())
            .unwrap()
            .with_api_url("http://localhost:1");
        assert_eq!(client.api_url, "http://localhost:1");
    }
}
