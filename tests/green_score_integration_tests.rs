use std::sync::Arc;
use std::time::Duration;

use std::collections::BTreeMap;

use ecoscore::api::{
    CategoryFailure, CategoryKey, CategoryMetrics, Coordinates, GreenScoreClient,
    GreenScoreResult, ScoreCategory, ScoreClient, ScoreError, Services, ZipLookup,
    ZippopotamLookup,
};
use ecoscore::core::route::{Page, Route};
use ecoscore::core::state::App;
use ecoscore::core::{Action, Effect, update};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const TIMEOUT: Duration = Duration::from_secs(5);

/// A full response: every category the client knows, one of them failed.
fn full_response(zip: &str) -> serde_json::Value {
    serde_json::json!({
        "zip": zip,
        "coordinates": [29.7174, -95.4018],
        "overall_score": 82,
        "scores": {
            "air_quality": { "score": 74, "max_aqi": 48, "primary_pollutant": "O3" },
            "tree_canopy": { "score": 70, "percentage": 23.456 },
            "pavement": { "score": 55.5, "percentage": 61.2 },
            "static_flood_risk": { "score": 40, "zones": ["AE", "X"], "in_100_year": true, "sfha": true },
            "riverine_flood_risk": { "score": 45, "nearest_flood_distance_km": 1.26 },
            "traffic": { "error": "upstream timed out", "timeout": true },
            "green_space": { "score": 88, "nearest_distance_m": 412.7, "num_parks": 3.0 },
            "toxic_sites": { "score": 90, "num_sites": 2, "nearest_distance_miles": 1.5 },
            "demographics": {
                "total_population": 31000,
                "percent_male": 48.25,
                "percent_female": 51.75,
                "median_age": 34.2,
                "percent_white": 58.4,
                "percent_black": 8.9,
                "percent_hispanic": 17.3,
                "median_income": 125000,
                "poverty_rate": 9.1
            },
            "water_availability": { "score": 65, "water_features": 4 },
            "transit_access": { "score": 77, "stops_count": 19 },
            "sea_level_rise": { "score": 95, "inundated_feet": { "3": false, "10": true, "6": true } }
        }
    })
}

/// `full_response` as the client should hand it over: every value unchanged.
fn expected_full_result(zip: &str) -> GreenScoreResult {
    let success = |metrics: CategoryMetrics| ScoreCategory::Success(metrics);
    let scores: BTreeMap<String, ScoreCategory> = [
        (
            "air_quality",
            success(CategoryMetrics {
                score: Some(74.0),
                max_aqi: Some(48.0),
                primary_pollutant: Some("O3".to_string()),
                ..Default::default()
            }),
        ),
        (
            "tree_canopy",
            success(CategoryMetrics {
                score: Some(70.0),
                percentage: Some(23.456),
                ..Default::default()
            }),
        ),
        (
            "pavement",
            success(CategoryMetrics {
                score: Some(55.5),
                percentage: Some(61.2),
                ..Default::default()
            }),
        ),
        (
            "static_flood_risk",
            success(CategoryMetrics {
                score: Some(40.0),
                zones: Some(serde_json::json!(["AE", "X"])),
                in_100_year: Some(true),
                sfha: Some(serde_json::json!(true)),
                ..Default::default()
            }),
        ),
        (
            "riverine_flood_risk",
            success(CategoryMetrics {
                score: Some(45.0),
                nearest_flood_distance_km: Some(1.26),
                ..Default::default()
            }),
        ),
        (
            "traffic",
            ScoreCategory::Failure(CategoryFailure {
                error: "upstream timed out".to_string(),
                timeout: true,
            }),
        ),
        (
            "green_space",
            success(CategoryMetrics {
                score: Some(88.0),
                nearest_distance_m: Some(412.7),
                num_parks: Some(3.0),
                ..Default::default()
            }),
        ),
        (
            "toxic_sites",
            success(CategoryMetrics {
                score: Some(90.0),
                num_sites: Some(2.0),
                nearest_distance_miles: Some(1.5),
                ..Default::default()
            }),
        ),
        (
            "demographics",
            success(CategoryMetrics {
                total_population: Some(31000.0),
                percent_male: Some(48.25),
                percent_female: Some(51.75),
                median_age: Some(34.2),
                percent_white: Some(58.4),
                percent_black: Some(8.9),
                percent_hispanic: Some(17.3),
                median_income: Some(125000.0),
                poverty_rate: Some(9.1),
                ..Default::default()
            }),
        ),
        (
            "water_availability",
            success(CategoryMetrics {
                score: Some(65.0),
                water_features: Some(4.0),
                ..Default::default()
            }),
        ),
        (
            "transit_access",
            success(CategoryMetrics {
                score: Some(77.0),
                stops_count: Some(19.0),
                ..Default::default()
            }),
        ),
        (
            "sea_level_rise",
            success(CategoryMetrics {
                score: Some(95.0),
                inundated_feet: Some(serde_json::json!({ "3": false, "10": true, "6": true })),
                ..Default::default()
            }),
        ),
    ]
    .into_iter()
    .map(|(key, category)| (key.to_string(), category))
    .collect();

    GreenScoreResult {
        zip: zip.to_string(),
        coordinates: Coordinates {
            lat: 29.7174,
            lng: -95.4018,
        },
        scores,
        overall_score: Some(82.0),
    }
}

async fn mount_score(server: &MockServer, zip: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/green-score"))
        .and(query_param("zip", zip))
        .respond_with(response)
        .mount(server)
        .await;
}

async fn mount_zip(server: &MockServer, zip: &str, status: u16) {
    Mock::given(method("GET"))
        .and(path(format!("/us/{zip}")))
        .respond_with(ResponseTemplate::new(status))
        .mount(server)
        .await;
}

/// Services wired to mock servers for both the backend and the ZIP directory.
fn services(score_server: &MockServer, zip_server: &MockServer) -> Services {
    Services::new(
        Arc::new(GreenScoreClient::new(Some(score_server.uri()))),
        Arc::new(ZippopotamLookup::new(Some(zip_server.uri()), TIMEOUT)),
        TIMEOUT,
    )
}

/// Carries out effects until the reducer stops asking for work.
async fn drive(app: &mut App, services: &Services, mut effect: Effect) {
    while let Some(action) = services.perform(effect).await {
        effect = update(app, action);
    }
}

// ============================================================================
// Score Client Tests
// ============================================================================

#[tokio::test]
async fn test_client_decodes_full_response() {
    let server = MockServer::start().await;
    mount_score(
        &server,
        "77005",
        ResponseTemplate::new(200).set_body_json(full_response("77005")),
    )
    .await;

    let client = GreenScoreClient::new(Some(server.uri()));
    let result = client.fetch_score("77005", TIMEOUT).await.unwrap();

    assert_eq!(result, expected_full_result("77005"));
    assert_eq!(result.categories().len(), 12);

    match result.category(CategoryKey::TreeCanopy) {
        Some(ScoreCategory::Success(m)) => assert_eq!(m.percentage, Some(23.456)),
        other => panic!("Expected tree canopy success, got {:?}", other),
    }
    match result.category(CategoryKey::Traffic) {
        Some(ScoreCategory::Failure(f)) => {
            assert_eq!(f.error, "upstream timed out");
            assert!(f.timeout);
        }
        other => panic!("Expected traffic failure, got {:?}", other),
    }
    match result.category(CategoryKey::SeaLevelRise) {
        Some(ScoreCategory::Success(m)) => assert_eq!(m.inundated_levels(), vec!["6", "10"]),
        other => panic!("Expected sea level success, got {:?}", other),
    }
    match result.category(CategoryKey::Demographics) {
        Some(ScoreCategory::Success(m)) => {
            assert_eq!(m.score, None);
            assert_eq!(m.total_population, Some(31000.0));
        }
        other => panic!("Expected demographics success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_client_trailing_slash_in_base_url() {
    let server = MockServer::start().await;
    mount_score(
        &server,
        "10001",
        ResponseTemplate::new(200).set_body_json(full_response("10001")),
    )
    .await;

    let client = GreenScoreClient::new(Some(format!("{}/", server.uri())));
    let result = client.fetch_score("10001", TIMEOUT).await;
    assert!(result.is_ok(), "Expected success, got {:?}", result);
}

#[tokio::test]
async fn test_client_http_error() {
    let server = MockServer::start().await;
    mount_score(
        &server,
        "77005",
        ResponseTemplate::new(500).set_body_string("Internal Server Error"),
    )
    .await;

    let client = GreenScoreClient::new(Some(server.uri()));
    let err = client.fetch_score("77005", TIMEOUT).await.unwrap_err();
    assert_eq!(err, ScoreError::Http { status: 500 });
    assert_eq!(err.user_message(), "Failed to load the eco-score. Please try again.");
}

#[tokio::test]
async fn test_client_error_body_is_no_data() {
    let server = MockServer::start().await;
    mount_score(
        &server,
        "99999",
        ResponseTemplate::new(200).set_body_json(serde_json::json!({"error": "ZIP not found"})),
    )
    .await;

    let client = GreenScoreClient::new(Some(server.uri()));
    let err = client.fetch_score("99999", TIMEOUT).await.unwrap_err();
    assert!(matches!(err, ScoreError::NoData(_)), "Expected NoData, got {:?}", err);
    assert_eq!(err.user_message(), "No data found for this zipcode.");
}

#[tokio::test]
async fn test_client_garbage_body_is_decode_error() {
    let server = MockServer::start().await;
    mount_score(
        &server,
        "77005",
        ResponseTemplate::new(200).set_body_string("<html>not json</html>"),
    )
    .await;

    let client = GreenScoreClient::new(Some(server.uri()));
    let err = client.fetch_score("77005", TIMEOUT).await.unwrap_err();
    assert!(matches!(err, ScoreError::Decode(_)), "Expected Decode, got {:?}", err);
}

#[tokio::test]
async fn test_client_timeout() {
    let server = MockServer::start().await;
    mount_score(
        &server,
        "77005",
        ResponseTemplate::new(200)
            .set_body_json(full_response("77005"))
            .set_delay(Duration::from_millis(500)),
    )
    .await;

    let client = GreenScoreClient::new(Some(server.uri()));
    let err = client
        .fetch_score("77005", Duration::from_millis(20))
        .await
        .unwrap_err();
    assert_eq!(err, ScoreError::Timeout);
    assert_eq!(err.user_message(), "Request timed out. Please try again.");
}

#[tokio::test]
async fn test_unconfigured_client_fails_without_network() {
    let client = GreenScoreClient::new(None);
    assert!(!client.is_configured());
    let err = client.fetch_score("77005", TIMEOUT).await.unwrap_err();
    assert!(matches!(err, ScoreError::Config(_)), "Expected Config, got {:?}", err);
}

// ============================================================================
// ZIP Lookup Tests
// ============================================================================

#[tokio::test]
async fn test_zip_lookup_found_and_missing() {
    let server = MockServer::start().await;
    mount_zip(&server, "77005", 200).await;
    mount_zip(&server, "00000", 404).await;

    let lookup = ZippopotamLookup::new(Some(server.uri()), TIMEOUT);
    assert!(lookup.exists("77005").await);
    assert!(!lookup.exists("00000").await);
}

#[tokio::test]
async fn test_zip_lookup_slow_directory_reads_as_missing() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/us/77005"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let lookup = ZippopotamLookup::new(Some(server.uri()), Duration::from_millis(20));
    assert!(!lookup.exists("77005").await);
}

// ============================================================================
// Flow Scenarios
// ============================================================================

#[tokio::test]
async fn test_flow_home_to_score() {
    let score_server = MockServer::start().await;
    let zip_server = MockServer::start().await;
    mount_score(
        &score_server,
        "77005",
        ResponseTemplate::new(200).set_body_json(full_response("77005")),
    )
    .await;
    mount_zip(&zip_server, "77005", 200).await;
    let services = services(&score_server, &zip_server);

    let mut app = App::new();
    assert_eq!(update(&mut app, Action::Start), Effect::None);
    assert_eq!(app.page, Page::Input);

    let effect = update(&mut app, Action::SubmitZip("77005".to_string()));
    assert!(matches!(effect, Effect::CheckZip { .. }));
    drive(&mut app, &services, effect).await;

    assert_eq!(app.page, Page::Score);
    assert_eq!(app.zip, "77005");
    assert_eq!(app.result.as_ref().unwrap().overall_score, Some(82.0));
    assert!(app.error.is_none());
    assert!(!app.is_loading);
}

#[tokio::test]
async fn test_flow_nonexistent_zip_stays_on_input() {
    let score_server = MockServer::start().await;
    let zip_server = MockServer::start().await;
    mount_zip(&zip_server, "00000", 404).await;
    Mock::given(method("GET"))
        .and(path("/green-score"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&score_server)
        .await;
    let services = services(&score_server, &zip_server);

    let mut app = App::new();
    update(&mut app, Action::Start);
    let effect = update(&mut app, Action::SubmitZip("00000".to_string()));
    drive(&mut app, &services, effect).await;

    assert_eq!(app.page, Page::Input);
    assert_eq!(
        app.zip_error.as_deref(),
        Some("That ZIP code does not exist. Please try another.")
    );
    assert!(!app.checking_zip);
}

#[tokio::test]
async fn test_flow_malformed_zip_never_hits_network() {
    let mut app = App::new();
    update(&mut app, Action::Start);
    let effect = update(&mut app, Action::SubmitZip("7700".to_string()));
    assert_eq!(effect, Effect::None);
    assert_eq!(
        app.zip_error.as_deref(),
        Some("Please enter a valid 5-digit U.S. ZIP code.")
    );
}

#[tokio::test]
async fn test_flow_deep_link_fetches_once() {
    let score_server = MockServer::start().await;
    let zip_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/green-score"))
        .and(query_param("zip", "10001"))
        .respond_with(ResponseTemplate::new(200).set_body_json(full_response("10001")))
        .expect(1)
        .mount(&score_server)
        .await;
    let services = services(&score_server, &zip_server);

    let mut app = App::new();
    let effect = update(&mut app, Action::Navigate(Route::parse("/score?zip=10001")));
    assert_eq!(app.page, Page::Score);

    // Re-entering while the fetch is outstanding starts nothing new
    let again = update(&mut app, Action::Navigate(Route::parse("/score?zip=10001")));
    assert_eq!(again, Effect::None);

    drive(&mut app, &services, effect).await;
    assert!(app.has_result_for("10001"));

    // Re-entering with the result cached starts nothing either
    let cached = update(&mut app, Action::Navigate(Route::parse("/score?zip=10001")));
    assert_eq!(cached, Effect::None);
    assert_eq!(app.page, Page::Score);
}

#[tokio::test]
async fn test_flow_backend_failure_lands_on_score_with_message() {
    let score_server = MockServer::start().await;
    let zip_server = MockServer::start().await;
    mount_score(&score_server, "77005", ResponseTemplate::new(503)).await;
    mount_zip(&zip_server, "77005", 200).await;
    let services = services(&score_server, &zip_server);

    let mut app = App::new();
    update(&mut app, Action::Start);
    let effect = update(&mut app, Action::SubmitZip("77005".to_string()));
    drive(&mut app, &services, effect).await;

    assert_eq!(app.page, Page::Score);
    assert!(app.result.is_none());
    assert_eq!(
        app.error.as_deref(),
        Some("Failed to load the eco-score. Please try again.")
    );
}

#[tokio::test]
async fn test_flow_stale_completion_is_dropped() {
    let score_server = MockServer::start().await;
    let zip_server = MockServer::start().await;
    mount_score(
        &score_server,
        "77005",
        ResponseTemplate::new(200).set_body_json(full_response("77005")),
    )
    .await;
    let services = services(&score_server, &zip_server);

    let mut app = App::new();
    let effect = update(&mut app, Action::Navigate(Route::parse("/score?zip=77005")));

    // User leaves before the response arrives
    update(&mut app, Action::GoHome);
    let late = services.perform(effect).await.unwrap();
    assert_eq!(update(&mut app, late), Effect::None);

    assert_eq!(app.page, Page::Home);
    assert!(app.result.is_none());
}
