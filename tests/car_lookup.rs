// tests/car_lookup.rs
//
// End-to-end lookups through the real HTTP connector against a mocked
// vehicle-data provider.

use automart::config::UpstreamConfig;
use automart::connectors::CarApiClient;
use automart::error::LookupError;
use automart::lookup::VehicleLookup;
use automart::models::{DataSource, PriceMethod, VehicleQuery, YearLabel};
use automart::pricing::{PriceEstimator, PriceTable};
use serde_json::json;
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CURRENT_YEAR: i32 = 2025;

fn lookup_against(server: &MockServer, source_timeout: Duration) -> VehicleLookup {
    let upstream = UpstreamConfig {
        base_url: server.uri(),
        ..UpstreamConfig::default()
    };
    let estimator =
        PriceEstimator::with_current_year(Arc::new(PriceTable::embedded().unwrap()), CURRENT_YEAR);
    VehicleLookup::new(CarApiClient::new(&upstream).shared(), estimator, source_timeout)
}

fn camry_trims() -> serde_json::Value {
    json!({
        "collection": { "count": 3 },
        "data": [
            { "id": 101, "trim": "LE", "submodel": "Camry", "description": "LE 4dr Sedan (2.5L 4cyl 8A)", "msrp": 24425 },
            { "id": 102, "trim": "SE", "submodel": "Camry", "description": "SE 4dr Sedan (2.5L 4cyl 8A)", "msrp": "25,945" },
            { "id": 103, "trim": "LE", "submodel": "Camry", "description": "LE 4dr Sedan (2.5L 4cyl 8A)", "msrp": 26000 }
        ]
    })
}

fn camry_engines() -> serde_json::Value {
    json!({
        "data": [
            {
                "trim_id": 101,
                "engine_type": "gas",
                "fuel_type": "regular unleaded",
                "cylinders": "I4",
                "size": 2.5,
                "horsepower_hp": 203,
                "torque_ft_lbs": 184,
                "drive_type": "front wheel drive",
                "transmission": "8-speed automatic"
            }
        ]
    })
}

#[tokio::test]
async fn test_lookup_merges_trims_and_engines() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trims/v2"))
        .and(query_param("make", "Toyota"))
        .and(query_param("model", "Camry"))
        .and(query_param("year", "2020"))
        .respond_with(ResponseTemplate::new(200).set_body_json(camry_trims()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/engines/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(camry_engines()))
        .mount(&server)
        .await;

    let lookup = lookup_against(&server, Duration::from_secs(5));
    let result = lookup
        .lookup(&VehicleQuery::new("Toyota", "Camry", Some(2020)))
        .await
        .unwrap();

    assert_eq!(result.source, DataSource::Live);
    assert_eq!(result.year, YearLabel::Year(2020));
    // The repeated LE row is dropped.
    assert_eq!(result.total_trims, 2);

    let le = &result.trims[0];
    assert_eq!(le.trim_name, "LE");
    assert_eq!(le.engine.engine, "2.5L I4 gas");
    assert_eq!(le.engine.horsepower, "203 HP");
    let pricing = le.pricing.unwrap();
    assert_eq!(pricing.msrp, 24425);
    assert_eq!(pricing.depreciation_pct, 65);
    assert_eq!(pricing.estimated_price, 8500);
    assert_eq!(pricing.price_method, PriceMethod::ApiMsrp);

    let se = &result.trims[1];
    assert_eq!(se.trim_name, "SE");
    assert_eq!(se.engine.engine, "N/A");
    assert_eq!(se.pricing.unwrap().estimated_price, 9100);
}

#[tokio::test]
async fn test_failed_engines_call_degrades_to_fallback() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trims/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(camry_trims()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/engines/v2"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let lookup = lookup_against(&server, Duration::from_secs(5));
    let result = lookup
        .lookup(&VehicleQuery::new("Toyota", "Camry", None))
        .await
        .unwrap();

    assert_eq!(result.source, DataSource::Fallback);
    assert_eq!(result.year, YearLabel::AllYears);
    assert_eq!(result.total_trims, 2);
    assert!(result.trims.iter().all(|t| t.engine.engine == "N/A"));
}

#[tokio::test]
async fn test_slow_trims_call_times_out_alone() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trims/v2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(camry_trims())
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/engines/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "trim_id": 7, "trim": "XSE", "trim_description": "XSE 4dr Sedan", "horsepower_hp": "301", "engine_type": "gas" }
            ]
        })))
        .mount(&server)
        .await;

    let lookup = lookup_against(&server, Duration::from_millis(300));
    let result = lookup
        .lookup(&VehicleQuery::new("Toyota", "Camry", Some(2022)))
        .await
        .unwrap();

    assert_eq!(result.source, DataSource::Fallback);
    assert_eq!(result.total_trims, 1);
    assert_eq!(result.trims[0].trim_name, "XSE");
    assert_eq!(result.trims[0].description.as_deref(), Some("XSE 4dr Sedan"));
    assert_eq!(result.trims[0].engine.horsepower, "301 HP");
    assert!(result.trims[0].pricing.is_none());
}

#[tokio::test]
async fn test_empty_upstream_is_no_data() {
    let server = MockServer::start().await;
    for endpoint in ["/trims/v2", "/engines/v2"] {
        Mock::given(method("GET"))
            .and(path(endpoint))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
            .mount(&server)
            .await;
    }

    let lookup = lookup_against(&server, Duration::from_secs(5));
    let err = lookup
        .lookup(&VehicleQuery::new("Foo", "Bar", Some(2020)))
        .await
        .unwrap_err();

    assert_eq!(err.status_code(), 404);
    assert_eq!(err.to_string(), "No data found for 2020 Foo Bar.");
}

#[tokio::test]
async fn test_listings_fall_back_when_provider_is_down() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let lookup = lookup_against(&server, Duration::from_secs(5));

    let (years, source) = lookup.years().await;
    assert_eq!(source, DataSource::Fallback);
    assert_eq!(years.first(), Some(&(CURRENT_YEAR + 1)));
    assert_eq!(years.last(), Some(&1995));

    let (makes, source) = lookup.makes(Some(2020)).await;
    assert_eq!(source, DataSource::Fallback);
    assert!(makes.iter().any(|m| m.name == "Toyota"));

    let err = lookup.models("Toyota", None).await.unwrap_err();
    assert!(matches!(err, LookupError::UpstreamUnavailable { .. }));
    assert_eq!(err.status_code(), 502);
}

#[tokio::test]
async fn test_models_from_provider() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/models/v2"))
        .and(query_param("make", "Toyota"))
        .and(query_param("year", "2020"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                { "id": 1, "name": "Camry", "make": { "id": 9, "name": "Toyota" } },
                { "id": 2, "name": "Corolla", "make": "Toyota" },
                { "id": 3, "name": "Camry" }
            ]
        })))
        .mount(&server)
        .await;

    let lookup = lookup_against(&server, Duration::from_secs(5));
    let models = lookup.models("Toyota", Some(2020)).await.unwrap();

    let names: Vec<_> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["Camry", "Corolla"]);
    assert_eq!(models[0].id, 3);
    assert_eq!(models[1].make.as_deref(), Some("Toyota"));
}

#[tokio::test]
async fn test_null_data_counts_as_answered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/trims/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(camry_trims()))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/engines/v2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": null })))
        .mount(&server)
        .await;

    let lookup = lookup_against(&server, Duration::from_secs(5));
    let result = lookup
        .lookup(&VehicleQuery::new("Toyota", "Camry", Some(2020)))
        .await
        .unwrap();

    assert_eq!(result.source, DataSource::Live);
    assert_eq!(result.total_trims, 2);
}
