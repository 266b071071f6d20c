//! End-to-end API tests over in-memory providers.

use axum_test::{TestServer, TestServerConfig};
use chrono::{Duration, Utc};
use hostly_concierge::mocks::StaticConcierge;
use hostly_core::mocks::{MemoryBackend, RecordingEventPublisher};
use hostly_core::{BookingStatus, NewProperty, PropertyRepository, UserId};
use hostly_web::{app_router, AppState};
use serde_json::{json, Value};

fn test_server(backend: MemoryBackend, events: RecordingEventPublisher) -> TestServer {
    let state = AppState {
        users: backend.clone(),
        properties: backend.clone(),
        bookings: backend.clone(),
        favorites: backend.clone(),
        sessions: backend,
        events,
        concierge: StaticConcierge::new(),
    };
    let app = app_router(state, &"http://localhost:5173".parse().unwrap());
    let config = TestServerConfig {
        save_cookies: true,
        ..TestServerConfig::default()
    };
    TestServer::new_with_config(app, config).unwrap()
}

fn server() -> TestServer {
    test_server(MemoryBackend::new(), RecordingEventPublisher::new())
}

async fn register(server: &TestServer, name: &str, email: &str) -> Value {
    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": name,
            "email": email,
            "password": "hunter22",
            "role": "owner",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    response.json::<Value>()
}

async fn seed_property(backend: &MemoryBackend, owner_id: UserId, price: f64) -> Value {
    let property = backend
        .create_property(NewProperty {
            owner_id,
            name: "Seaside Loft".to_string(),
            description: Some("Steps from the beach".to_string()),
            city: "Santa Cruz".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
            property_type: "apartment".to_string(),
            price_per_night: price,
            bedrooms: 2,
            bathrooms: 1,
            max_guests: 4,
            amenities: Some("wifi,parking".to_string()),
            main_image: None,
            tax_rate: 0.0,
        })
        .await
        .unwrap();
    serde_json::to_value(&property).unwrap()
}

fn owner_id(registered: &Value) -> UserId {
    UserId::parse(registered["user"]["id"].as_str().unwrap()).unwrap()
}

#[tokio::test]
async fn health_answers_ok() {
    let server = server();
    let response = server.get("/api/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
}

#[tokio::test]
async fn register_login_me_logout_round_trip() {
    let server = server();

    let registered = register(&server, "Ada", "ada@example.com").await;
    assert_eq!(registered["user"]["email"], "ada@example.com");
    assert_eq!(registered["user"]["role"], "owner");
    assert!(registered["user"].get("password_hash").is_none());

    // The register cookie authenticates /auth/me.
    let me = server.get("/api/auth/me").await;
    me.assert_status_ok();
    assert_eq!(me.json::<Value>()["user"]["name"], "Ada");

    let logout = server.post("/api/auth/logout").await;
    logout.assert_status_ok();
    assert_eq!(logout.json::<Value>()["ok"], true);

    let login = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": "hunter22" }))
        .await;
    login.assert_status_ok();
    assert_eq!(login.json::<Value>()["user"]["name"], "Ada");
}

#[tokio::test]
async fn logout_destroys_the_server_side_session() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    register(&server, "Ada", "ada@example.com").await;
    assert_eq!(backend.session_count().unwrap(), 1);

    server.post("/api/auth/logout").await.assert_status_ok();
    assert_eq!(backend.session_count().unwrap(), 0);
}

#[tokio::test]
async fn a_session_for_a_deleted_user_is_purged() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Ada", "ada@example.com").await;

    // The account vanishes out from under the live session.
    backend.delete_user(owner_id(&registered)).unwrap();

    let me = server.get("/api/auth/me").await;
    me.assert_status_ok();
    me.assert_json(&json!({ "user": null }));
    assert_eq!(backend.session_count().unwrap(), 0);
}

#[tokio::test]
async fn me_is_null_without_a_session() {
    let server = server();
    let response = server.get("/api/auth/me").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "user": null }));
}

#[tokio::test]
async fn duplicate_email_conflicts() {
    let server = server();
    register(&server, "Ada", "ada@example.com").await;

    let response = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Other Ada",
            "email": "ada@example.com",
            "password": "hunter22",
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["message"], "Email already exists");
}

#[tokio::test]
async fn register_rejects_missing_fields_and_bad_role() {
    let server = server();

    let missing = server
        .post("/api/auth/register")
        .json(&json!({ "email": "ada@example.com", "password": "x", "name": "" }))
        .await;
    missing.assert_status_bad_request();
    assert_eq!(
        missing.json::<Value>()["message"],
        "Missing required fields"
    );

    let bad_role = server
        .post("/api/auth/register")
        .json(&json!({
            "name": "Ada",
            "email": "ada@example.com",
            "password": "hunter22",
            "role": "admin",
        }))
        .await;
    bad_role.assert_status_bad_request();
    assert_eq!(bad_role.json::<Value>()["message"], "Invalid role");
}

#[tokio::test]
async fn login_failures_never_say_which_part_was_wrong() {
    let server = server();
    register(&server, "Ada", "ada@example.com").await;

    let unknown = server
        .post("/api/auth/login")
        .json(&json!({ "email": "nobody@example.com", "password": "hunter22" }))
        .await;
    unknown.assert_status_unauthorized();
    assert_eq!(
        unknown.json::<Value>()["message"],
        "Invalid email or password"
    );

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "email": "ada@example.com", "password": "wrong" }))
        .await;
    wrong_password.assert_status_unauthorized();
    assert_eq!(
        wrong_password.json::<Value>()["message"],
        "Invalid email or password"
    );
}

#[tokio::test]
async fn search_lists_properties_with_display_fields() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Olive", "olive@example.com").await;
    seed_property(&backend, owner_id(&registered), 150.0).await;

    let response = server.get("/api/properties/search").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    let properties = body["properties"].as_array().unwrap();
    assert_eq!(properties.len(), 1);
    assert_eq!(properties[0]["location"], "Santa Cruz, CA");
    assert_eq!(properties[0]["amenities"], json!(["wifi", "parking"]));
}

#[tokio::test]
async fn search_validates_dates() {
    let server = server();

    let garbled = server
        .get("/api/properties/search")
        .add_query_param("startDate", "june-first")
        .add_query_param("endDate", "2030-06-05")
        .await;
    garbled.assert_status_bad_request();
    assert_eq!(
        garbled.json::<Value>()["message"],
        "Invalid date format. Please use YYYY-MM-DD format."
    );

    let backwards = server
        .get("/api/properties/search")
        .add_query_param("startDate", "2030-06-05")
        .add_query_param("endDate", "2030-06-01")
        .await;
    backwards.assert_status_bad_request();
    assert_eq!(
        backwards.json::<Value>()["message"],
        "Check-out date must be after check-in date."
    );
}

#[tokio::test]
async fn property_detail_includes_description() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Olive", "olive@example.com").await;
    let property = seed_property(&backend, owner_id(&registered), 150.0).await;

    let response = server
        .get(&format!("/api/properties/{}", property["id"].as_str().unwrap()))
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.json::<Value>()["description"],
        "Steps from the beach"
    );

    let missing = server
        .get(&format!("/api/properties/{}", uuid::Uuid::new_v4()))
        .await;
    missing.assert_status_not_found();
    assert_eq!(missing.json::<Value>()["message"], "Property not found");
}

#[tokio::test]
async fn booking_quote_is_nights_times_rate() {
    let backend = MemoryBackend::new();
    let events = RecordingEventPublisher::new();
    let server = test_server(backend.clone(), events.clone());
    let registered = register(&server, "Olive", "olive@example.com").await;
    let property = seed_property(&backend, owner_id(&registered), 100.0).await;

    let start = Utc::now().date_naive() + Duration::days(10);
    let end = start + Duration::days(3);
    let response = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": property["id"],
            "startDate": start,
            "endDate": end,
            "guests": 2,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Booking request created successfully");
    assert_eq!(body["booking"]["total_price"], 300.0);
    assert_eq!(body["booking"]["status"], "pending");

    // The publish is spawned; give it a few turns of the runtime.
    for _ in 0..10 {
        if !events.created_events().is_empty() {
            break;
        }
        tokio::task::yield_now().await;
    }
    let created = events.created_events();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].num_guests, 2);
}

#[tokio::test]
async fn booking_validation_rejections() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Olive", "olive@example.com").await;
    let property = seed_property(&backend, owner_id(&registered), 100.0).await;
    let start = Utc::now().date_naive() + Duration::days(10);

    let past = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": property["id"],
            "startDate": Utc::now().date_naive() - Duration::days(1),
            "endDate": start,
            "guests": 2,
        }))
        .await;
    past.assert_status_bad_request();
    assert_eq!(
        past.json::<Value>()["message"],
        "Check-in date cannot be in the past"
    );

    let overfull = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": property["id"],
            "startDate": start,
            "endDate": start + Duration::days(2),
            "guests": 9,
        }))
        .await;
    overfull.assert_status_bad_request();
    assert_eq!(
        overfull.json::<Value>()["message"],
        "Maximum 4 guests allowed for this property"
    );

    let ghost = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": uuid::Uuid::new_v4(),
            "startDate": start,
            "endDate": start + Duration::days(2),
            "guests": 2,
        }))
        .await;
    ghost.assert_status_not_found();
}

#[tokio::test]
async fn malformed_bodies_answer_in_the_standard_error_shape() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Olive", "olive@example.com").await;
    let property = seed_property(&backend, owner_id(&registered), 100.0).await;
    let start = Utc::now().date_naive() + Duration::days(10);

    // A dropped field must not surface axum's plain-text 422.
    let missing_field = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": property["id"],
            "startDate": start,
            "guests": 2,
        }))
        .await;
    missing_field.assert_status_bad_request();
    let body = missing_field.json::<Value>();
    assert_eq!(body["message"], "Missing required fields");
    assert_eq!(body["code"], "BAD_REQUEST");

    let bad_uuid = server
        .post("/api/favorites")
        .json(&json!({ "propertyId": "not-a-uuid" }))
        .await;
    bad_uuid.assert_status_bad_request();
    assert_eq!(
        bad_uuid.json::<Value>()["message"],
        "Missing required fields"
    );
}

#[tokio::test]
async fn booking_requires_a_session() {
    let server = server();
    let start = Utc::now().date_naive() + Duration::days(10);
    let response = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": uuid::Uuid::new_v4(),
            "startDate": start,
            "endDate": start + Duration::days(2),
            "guests": 2,
        }))
        .await;
    response.assert_status_unauthorized();
    assert_eq!(
        response.json::<Value>()["message"],
        "Authentication required"
    );
}

#[tokio::test]
async fn only_the_owner_may_accept_a_booking() {
    let backend = MemoryBackend::new();
    let events = RecordingEventPublisher::new();
    let server = test_server(backend.clone(), events.clone());

    let owner = register(&server, "Olive", "olive@example.com").await;
    let property = seed_property(&backend, owner_id(&owner), 100.0).await;

    // The traveler's session replaces the owner's in the cookie jar.
    register(&server, "Tess", "tess@example.com").await;
    let start = Utc::now().date_naive() + Duration::days(10);
    let booking = server
        .post("/api/bookings")
        .json(&json!({
            "propertyId": property["id"],
            "startDate": start,
            "endDate": start + Duration::days(2),
            "guests": 2,
        }))
        .await
        .json::<Value>();
    let booking_id = booking["booking"]["id"].as_str().unwrap().to_string();

    let forbidden = server
        .post(&format!("/api/bookings/{booking_id}/accept"))
        .await;
    forbidden.assert_status_forbidden();
    assert_eq!(forbidden.json::<Value>()["message"], "Not authorized");

    // Back as the owner, the transition goes through.
    server
        .post("/api/auth/login")
        .json(&json!({ "email": "olive@example.com", "password": "hunter22" }))
        .await
        .assert_status_ok();
    let accepted = server
        .post(&format!("/api/bookings/{booking_id}/accept"))
        .await;
    accepted.assert_status_ok();
    let body = accepted.json::<Value>();
    assert_eq!(body["message"], "Booking accepted successfully");
    assert_eq!(body["booking"]["status"], "accepted");

    for _ in 0..10 {
        if !events.status_events().is_empty() {
            break;
        }
        tokio::task::yield_now().await;
    }
    let updates = events.status_events();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].status, BookingStatus::Accepted);
}

#[tokio::test]
async fn favorites_round_trip_and_conflict() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Tess", "tess@example.com").await;
    let property = seed_property(&backend, owner_id(&registered), 100.0).await;
    let property_id = property["id"].as_str().unwrap().to_string();

    let added = server
        .post("/api/favorites")
        .json(&json!({ "propertyId": property_id }))
        .await;
    added.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(
        added.json::<Value>()["message"],
        "Property added to favorites"
    );

    let duplicate = server
        .post("/api/favorites")
        .json(&json!({ "propertyId": property_id }))
        .await;
    duplicate.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(
        duplicate.json::<Value>()["message"],
        "Property already in favorites"
    );

    let check = server
        .get(&format!("/api/favorites/check/{property_id}"))
        .await;
    check.assert_status_ok();
    assert_eq!(check.json::<Value>()["isFavorite"], true);

    let list = server.get("/api/favorites").await;
    list.assert_status_ok();
    let favorites = list.json::<Value>();
    assert_eq!(favorites["favorites"][0]["location"], "Santa Cruz, CA");

    let removed = server.delete(&format!("/api/favorites/{property_id}")).await;
    removed.assert_status_ok();

    let gone = server.delete(&format!("/api/favorites/{property_id}")).await;
    gone.assert_status_not_found();
}

#[tokio::test]
async fn owner_dashboard_lists_properties_with_booking_counts() {
    let backend = MemoryBackend::new();
    let server = test_server(backend.clone(), RecordingEventPublisher::new());
    let registered = register(&server, "Olive", "olive@example.com").await;
    seed_property(&backend, owner_id(&registered), 100.0).await;

    let response = server.get("/api/owner/properties").await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["properties"][0]["status"], "active");
    assert_eq!(body["properties"][0]["total_bookings"], 0);
}

#[tokio::test]
async fn owner_creates_a_property_from_the_listing_form() {
    let server = server();
    register(&server, "Olive", "olive@example.com").await;

    let response = server
        .post("/api/owner/properties")
        .json(&json!({
            "name": "Hilltop Villa",
            "type": "villa",
            "location": "Napa, CA, USA",
            "pricing": 400.0,
            "amenities": ["pool", "wifi"],
            "bedrooms": 3,
        }))
        .await;
    response.assert_status(axum::http::StatusCode::CREATED);
    let body = response.json::<Value>();
    assert_eq!(body["message"], "Property created successfully");
    assert_eq!(body["property"]["location"], "Napa, CA");
    assert_eq!(body["property"]["max_guests"], 6);
    assert_eq!(body["property"]["amenities"], json!(["pool", "wifi"]));

    let missing = server
        .post("/api/owner/properties")
        .json(&json!({ "name": "No price", "type": "villa", "location": "Napa" }))
        .await;
    missing.assert_status_bad_request();
    assert_eq!(missing.json::<Value>()["message"], "Missing required fields");
}

#[tokio::test]
async fn profile_update_merges_fields() {
    let server = server();
    register(&server, "Tess", "tess@example.com").await;

    let response = server
        .put("/api/traveler/profile")
        .json(&json!({ "city": "Portland", "about_me": "Loves trains" }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["user"]["city"], "Portland");
    assert_eq!(body["user"]["about_me"], "Loves trains");
    assert_eq!(body["user"]["name"], "Tess");
}

#[tokio::test]
async fn concierge_answers_with_a_plan() {
    let server = server();

    let response = server
        .post("/api/agent/concierge")
        .json(&json!({
            "booking": {
                "location": "San Jose, CA",
                "startDate": "2030-06-01",
                "endDate": "2030-06-04",
                "partyType": "family",
                "guests": 4,
            },
            "preferences": { "budget": "medium" },
        }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert!(body["plan"].is_array());
    assert!(body["checklist"].is_array());
}

#[tokio::test]
async fn concierge_rejects_missing_sections() {
    let server = server();

    let response = server
        .post("/api/agent/concierge")
        .json(&json!({ "booking": { "location": "San Jose, CA" } }))
        .await;
    response.assert_status_bad_request();
    assert_eq!(
        response.json::<Value>()["message"],
        "Missing required fields: booking and preferences"
    );

    let partial = server
        .post("/api/agent/concierge")
        .json(&json!({
            "booking": { "location": "San Jose, CA" },
            "preferences": {},
        }))
        .await;
    partial.assert_status_bad_request();
    assert_eq!(
        partial.json::<Value>()["message"],
        "Missing required booking fields: location, startDate, endDate, partyType, guests"
    );
}

#[tokio::test]
async fn pricing_suggestions_fall_back_to_defaults() {
    let server = server();

    let response = server
        .post("/api/agent/pricing-suggestions")
        .json(&json!({
            "propertyData": {
                "location": "Napa, CA",
                "propertyType": "villa",
                "bedrooms": 3,
                "bathrooms": 2,
            },
        }))
        .await;
    response.assert_status_ok();
    let body = response.json::<Value>();
    assert_eq!(body["basePrice"], 100.0);
    assert_eq!(body["weekendMultiplier"], 1.2);
}

#[tokio::test]
async fn correlation_id_is_echoed() {
    let server = server();
    let id = uuid::Uuid::new_v4();
    let response = server
        .get("/api/health")
        .add_header(
            axum::http::HeaderName::from_static("x-correlation-id"),
            axum::http::HeaderValue::from_str(&id.to_string()).unwrap(),
        )
        .await;
    response.assert_status_ok();
    assert_eq!(
        response.headers().get("X-Correlation-ID").unwrap().to_str().unwrap(),
        id.to_string()
    );
}
