// tests/server_routes.rs
//
// HTTP surface tests: a real server on an ephemeral port in front of a
// mocked vehicle-data provider.

use automart::config::UpstreamConfig;
use automart::connectors::CarApiClient;
use automart::lookup::VehicleLookup;
use automart::pricing::{PriceEstimator, PriceTable};
use automart::server;
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENT_YEAR: i32 = 2025;

/// Starts the app against `upstream` and returns its base URL.
async fn spawn_app(upstream: &MockServer) -> String {
    let config = UpstreamConfig {
        base_url: upstream.uri(),
        ..UpstreamConfig::default()
    };
    let estimator =
        PriceEstimator::with_current_year(Arc::new(PriceTable::embedded().unwrap()), CURRENT_YEAR);
    let lookup = VehicleLookup::new(
        CarApiClient::new(&config).shared(),
        estimator,
        Duration::from_secs(5),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = server::router(Arc::new(lookup));
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn get_json(url: &str) -> (u16, Value) {
    let response = reqwest::get(url).await.unwrap();
    let status = response.status().as_u16();
    (status, response.json().await.unwrap())
}

async fn mount_camry(upstream: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/trims/v2"))
        .and(query_param("make", "Toyota"))
        .and(query_param("model", "Camry"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "trim": "LE", "description": "LE 4dr Sedan", "msrp": 24425 },
                { "id": 2, "trim": "XLE", "description": "XLE 4dr Sedan" }
            ]
        })))
        .mount(upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/engines/v2"))
        .and(query_param("make", "Toyota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "trim_id": 1, "engine_type": "gas", "cylinders": "I4", "size": 2.5, "horsepower_hp": 203 }
            ]
        })))
        .mount(upstream)
        .await;
    // Anything else has no data.
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(upstream)
        .await;
}

#[tokio::test]
async fn test_car_lookup_success() {
    let upstream = MockServer::start().await;
    mount_camry(&upstream).await;
    let base = spawn_app(&upstream).await;

    let (status, body) = get_json(&format!("{}/api/car?make=Toyota&model=Camry&year=2020", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);

    let vehicle = &body["vehicle"];
    assert_eq!(vehicle["year"], 2020);
    assert_eq!(vehicle["make"], "Toyota");
    assert_eq!(vehicle["total_trims"], 2);
    assert_eq!(vehicle["source"], "live");

    let le = &vehicle["trims"][0];
    assert_eq!(le["trim_name"], "LE");
    assert_eq!(le["engine"], "2.5L I4 gas");
    assert_eq!(le["horsepower"], "203 HP");
    assert_eq!(le["fuel_type"], "N/A");
    assert_eq!(le["estimated_price"], 8500);
    assert_eq!(le["price_method"], "api_msrp");
    assert_eq!(le["price_label"], "MSRP Verified");

    let xle = &vehicle["trims"][1];
    assert!(xle.get("estimated_price").is_none());
    assert!(xle.get("msrp").is_none());
}

#[tokio::test]
async fn test_car_lookup_all_years_label() {
    let upstream = MockServer::start().await;
    mount_camry(&upstream).await;
    let base = spawn_app(&upstream).await;

    let (status, body) = get_json(&format!("{}/api/car?make=Toyota&model=Camry", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["vehicle"]["year"], "All Years");
}

#[tokio::test]
async fn test_car_lookup_rejects_bad_input() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let (status, body) = get_json(&format!("{}/api/car?make=Toyota", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Missing required parameters: make and model.");
    assert!(body["example"].is_string());

    let (status, body) = get_json(&format!("{}/api/car?make=Toyota&model=Camry&year=1990", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"], "Invalid year \"1990\". Must be between 1995 and 2027.");

    // Rejected before any upstream call.
    assert!(upstream.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_car_lookup_no_data() {
    let upstream = MockServer::start().await;
    mount_camry(&upstream).await;
    let base = spawn_app(&upstream).await;

    let (status, body) = get_json(&format!("{}/api/car?make=Foo&model=Bar&year=2020", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "No data found for 2020 Foo Bar.");
    assert!(body["suggestions"].as_str().unwrap().contains("Toyota Camry 2020"));
}

#[tokio::test]
async fn test_listings_with_provider_down() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let (status, body) = get_json(&format!("{}/api/years", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], true);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["years"][0], CURRENT_YEAR + 1);

    let (status, body) = get_json(&format!("{}/api/makes", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["source"], "fallback");
    assert_eq!(body["count"], 42);

    let (status, body) = get_json(&format!("{}/api/models?make=Toyota", base)).await;
    assert_eq!(status, 502);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_models_endpoint() {
    let upstream = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models/v2"))
        .and(query_param("make", "Toyota"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [ { "id": 1, "name": "Camry" }, { "id": 2, "name": "Corolla" } ]
        })))
        .mount(&upstream)
        .await;
    Mock::given(method("GET"))
        .and(path("/models/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .mount(&upstream)
        .await;
    let base = spawn_app(&upstream).await;

    let (status, body) = get_json(&format!("{}/api/models?make=Toyota", base)).await;
    assert_eq!(status, 200);
    assert_eq!(body["count"], 2);
    assert_eq!(body["models"][1]["name"], "Corolla");

    let (status, body) = get_json(&format!("{}/api/models", base)).await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], false);

    let (status, body) = get_json(&format!("{}/api/models?make=Yugo&year=2020", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["error"], "No models found for \"Yugo\" in 2020.");
}

#[tokio::test]
async fn test_frontend_and_fallback_routes() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    for route in ["/", "/search/toyota"] {
        let response = reqwest::get(format!("{}{}", base, route)).await.unwrap();
        assert_eq!(response.status().as_u16(), 200);
        let html = response.text().await.unwrap();
        assert!(html.contains("<title>AutoMart"), "route {}", route);
        assert!(html.contains("t.price_label"), "route {}", route);
    }

    let (status, body) = get_json(&format!("{}/api/unknown", base)).await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_cors_allows_any_origin() {
    let upstream = MockServer::start().await;
    let base = spawn_app(&upstream).await;

    let response = reqwest::Client::new()
        .get(format!("{}/api/years", base))
        .header("Origin", "http://example.com")
        .send()
        .await
        .unwrap();
    assert_eq!(
        response
            .headers()
            .get("access-control-allow-origin")
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
}
