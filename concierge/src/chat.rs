//! Chat-completions request and response types (OpenAI-compatible wire
//! format, as served by Groq).

use serde::{Deserialize, Serialize};

/// Model used for every concierge operation.
pub const MODEL: &str = "llama-3.1-8b-instant";

/// A single chat message.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// "system", "user" or "assistant".
    pub role: String,
    /// Message text.
    pub content: String,
}

impl ChatMessage {
    /// Build a system message.
    #[must_use]
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    /// Build a user message.
    #[must_use]
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// Request to the chat-completions endpoint.
#[derive(Clone, Debug, Serialize)]
pub struct ChatRequest {
    /// Model identifier.
    pub model: String,
    /// Conversation: one system message and one user prompt.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f64,
    /// Maximum tokens to generate.
    pub max_tokens: u32,
}

impl ChatRequest {
    /// Build a request with the standard model and defaults.
    #[must_use]
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            model: MODEL.to_string(),
            messages,
            temperature: 0.7,
            max_tokens: 1024,
        }
    }

    /// Builder: set the temperature.
    #[must_use]
    pub const fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Builder: set the token limit.
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }
}

/// Response from the chat-completions endpoint.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatResponse {
    /// Completion choices; the first one carries the answer.
    pub choices: Vec<ChatChoice>,
}

/// One completion choice.
#[derive(Clone, Debug, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatMessage,
}

impl ChatResponse {
    /// Text of the first choice, empty if the API returned none.
    #[must_use]
    pub fn first_content(&self) -> &str {
        self.choices
            .first()
            .map_or("", |choice| choice.message.content.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_builder_sets_sampling() {
        let request = ChatRequest::new(vec![ChatMessage::user("hi")])
            .with_temperature(0.3)
            .with_max_tokens(3000);
        assert_eq!(request.model, MODEL);
        assert!((request.temperature - 0.3).abs() < f64::EPSILON);
        assert_eq!(request.max_tokens, 3000);
    }

    #[test]
    fn first_content_handles_empty_choices() {
        let response = ChatResponse { choices: vec![] };
        assert_eq!(response.first_content(), "");
    }
}
