//! Concierge service tests against a mocked chat-completions endpoint.

use hostly_concierge::types::{
    MarketContext, PropertyDetails, TravelerPreferences, TripDetails,
};
use hostly_concierge::{ChatClient, Concierge, ConciergeError, ConciergeService};
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion_body(content: &str) -> serde_json::Value {
    json!({
        "choices": [
            { "message": { "role": "assistant", "content": content } }
        ]
    })
}

fn service(server: &MockServer) -> ConciergeService {
    ConciergeService::new(
        ChatClient::new("test-key".to_string())
            .unwrap()
            .with_api_url(server.uri()),
    )
}

fn trip() -> TripDetails {
    TripDetails {
        location: "San Jose, CA".to_string(),
        start_date: "2025-11-11".parse().unwrap(),
        end_date: "2025-11-14".parse().unwrap(),
        party_type: "family".to_string(),
        guests: 4,
    }
}

#[tokio::test]
async fn travel_plan_parses_json_wrapped_in_prose() {
    let server = MockServer::start().await;

    let content = r#"Here is your itinerary:
{"plan":[{"date":"2025-11-11","morning":"Museum","afternoon":"Rose Garden","evening":"Dinner downtown"}],
 "activities":[{"title":"San Jose Museum of Art","address":"110 S Market St","tags":["art"],"childFriendly":true,"wheelchair":true}],
 "restaurants":[{"name":"Vegetarian House","cuisine":"Vegetarian Asian","price":"$$"}],
 "checklist":["Walking shoes","Sunscreen"]}
Enjoy your trip!"#;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(body_partial_json(json!({
            "model": "llama-3.1-8b-instant",
            "temperature": 0.3
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion_body(content)))
        .mount(&server)
        .await;

    let plan = service(&server)
        .travel_plan(&trip(), &TravelerPreferences::default())
        .await
        .unwrap();

    assert_eq!(plan.plan.len(), 1);
    assert_eq!(plan.activities[0].title, "San Jose Museum of Art");
    assert!(plan.activities[0].child_friendly);
    assert_eq!(plan.checklist, vec!["Walking shoes", "Sunscreen"]);
}

#[tokio::test]
async fn travel_plan_falls_back_on_malformed_output() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body("Sorry, I cannot produce JSON today.")),
        )
        .mount(&server)
        .await;

    let plan = service(&server)
        .travel_plan(&trip(), &TravelerPreferences::default())
        .await
        .unwrap();

    // The static fallback plan, not an error.
    assert_eq!(plan.activities[0].title, "Local Museum Visit");
    assert!(!plan.checklist.is_empty());
}

#[tokio::test]
async fn pricing_falls_back_on_wrong_shape() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion_body(r#"{"price": "about a hundred"}"#)),
        )
        .mount(&server)
        .await;

    let property = PropertyDetails {
        location: "Tahoe, CA".to_string(),
        property_type: "cabin".to_string(),
        bedrooms: 2,
        bathrooms: 1,
        amenities: vec!["hot tub".to_string()],
    };

    let pricing = service(&server)
        .pricing_suggestions(&property, &MarketContext::default())
        .await
        .unwrap();

    assert!((pricing.base_price - 100.0).abs() < f64::EPSILON);
    assert!((pricing.weekend_multiplier - 1.2).abs() < f64::EPSILON);
}

#[tokio::test]
async fn rate_limit_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let err = service(&server)
        .travel_plan(&trip(), &TravelerPreferences::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ConciergeError::RateLimited));
}

#[tokio::test]
async fn unauthorized_surfaces_as_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = service(&server)
        .travel_plan(&trip(), &TravelerPreferences::default())
        .await
        .unwrap_err();

    assert!(matches!(err, ConciergeError::Unauthorized));
}
