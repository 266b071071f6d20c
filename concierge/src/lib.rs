//! # Hostly concierge
//!
//! LLM-backed assistant operations for the marketplace: travel plans,
//! property recommendations, pricing suggestions, listing copy, and guest
//! welcome messages.
//!
//! Every operation is a single chat-completions round trip against a
//! Groq-style OpenAI-compatible endpoint, followed by lenient JSON
//! extraction. When the model's answer is unusable the operation returns a
//! static fallback payload rather than an error; transport failures are the
//! only [`ConciergeError`]s a caller sees.
//!
//! ## Example
//!
//! ```no_run
//! use hostly_concierge::{ChatClient, Concierge, ConciergeService};
//! use hostly_concierge::types::{TravelerPreferences, TripDetails};
//!
//! # async fn example() -> Result<(), hostly_concierge::ConciergeError> {
//! let concierge = ConciergeService::new(ChatClient::from_env()?);
//!
//! let trip = TripDetails {
//!     location: "San Jose, CA".to_string(),
//!     start_date: "2025-11-11".parse().unwrap(),
//!     end_date: "2025-11-14".parse().unwrap(),
//!     party_type: "family".to_string(),
//!     guests: 4,
//! };
//! let plan = concierge.travel_plan(&trip, &TravelerPreferences::default()).await?;
//! println!("{} days planned", plan.plan.len());
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod chat;
pub mod client;
pub mod error;
pub mod extract;
pub mod service;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod mocks;

pub use chat::{ChatMessage, ChatRequest, ChatResponse, MODEL};
pub use client::ChatClient;
pub use error::ConciergeError;
pub use extract::extract_json;
pub use service::{Concierge, ConciergeService};
