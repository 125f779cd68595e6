// src/server/mod.rs

//! HTTP server for the car lookup UI.
//!
//! Provides a web server that:
//! - Serves a single-page frontend (search form + trim cards)
//! - Exposes REST endpoints for years, makes, models and full car lookups
//! - Maps lookup errors to distinct, human-readable JSON answers

mod frontend;

use crate::error::LookupError;
use crate::lookup::{validate_query, VehicleLookup};
use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use log::{error, info};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};

/// Raw query-string parameters; validation happens in the handlers.
type Params = Query<HashMap<String, String>>;

/// Shared state for the HTTP handlers.
pub struct ServerState {
    lookup: Arc<VehicleLookup>,
}

/// The server that serves the web UI and API endpoints.
pub struct CarServer {
    state: Arc<ServerState>,
    port: u16,
}

impl CarServer {
    /// Creates a new server.
    ///
    /// # Arguments
    /// * `lookup` - Lookup pipeline shared by all requests
    /// * `port` - Port to listen on
    pub fn new(lookup: Arc<VehicleLookup>, port: u16) -> Self {
        Self {
            state: Arc::new(ServerState { lookup }),
            port,
        }
    }

    /// Starts the web server.
    /// This method runs until the server is shut down.
    pub async fn run(self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let app = build_router(self.state);

        let addr = std::net::SocketAddr::from(([0, 0, 0, 0], self.port));
        info!("Car lookup server starting on http://{}", addr);

        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app).await?;

        Ok(())
    }
}

/// Builds the application router around a lookup pipeline.
pub fn router(lookup: Arc<VehicleLookup>) -> Router {
    build_router(Arc::new(ServerState { lookup }))
}

fn build_router(state: Arc<ServerState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(serve_frontend))
        .route("/api/years", get(list_years))
        .route("/api/makes", get(list_makes))
        .route("/api/models", get(list_models))
        .route("/api/car", get(get_car))
        .fallback(fallback)
        .layer(cors)
        .with_state(state)
}

/// GET / - Serves the search frontend
async fn serve_frontend() -> Html<&'static str> {
    Html(frontend::FRONTEND_HTML)
}

/// Unknown API paths get a JSON 404; everything else gets the frontend.
async fn fallback(uri: Uri) -> Response {
    if uri.path().starts_with("/api/") {
        return (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Unknown API endpoint" })),
        )
            .into_response();
    }
    Html(frontend::FRONTEND_HTML).into_response()
}

fn param<'a>(params: &'a HashMap<String, String>, key: &str) -> Option<&'a str> {
    params.get(key).map(String::as_str)
}

/// Optional year filter for listings. Anything unparseable means "no filter".
fn year_filter(params: &HashMap<String, String>) -> Option<i32> {
    param(params, "year").and_then(|y| y.trim().parse().ok())
}

/// GET /api/years - Available model years
async fn list_years(State(state): State<Arc<ServerState>>) -> Json<serde_json::Value> {
    let (years, source) = state.lookup.years().await;
    Json(json!({
        "success": true,
        "years": years,
        "source": source,
    }))
}

/// GET /api/makes?year= - Makes, optionally for one year
async fn list_makes(
    State(state): State<Arc<ServerState>>,
    Query(params): Params,
) -> Json<serde_json::Value> {
    let (makes, source) = state.lookup.makes(year_filter(&params)).await;
    Json(json!({
        "success": true,
        "count": makes.len(),
        "makes": makes,
        "source": source,
    }))
}

/// GET /api/models?make=&year= - Models for a make
async fn list_models(State(state): State<Arc<ServerState>>, Query(params): Params) -> Response {
    let make = param(&params, "make").unwrap_or_default();
    match state.lookup.models(make, year_filter(&params)).await {
        Ok(models) => Json(json!({
            "success": true,
            "count": models.len(),
            "models": models,
        }))
        .into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /api/car?make=&model=&year= - Specs and estimated prices for every trim
async fn get_car(State(state): State<Arc<ServerState>>, Query(params): Params) -> Response {
    let query = match validate_query(
        param(&params, "make"),
        param(&params, "model"),
        param(&params, "year"),
        state.lookup.current_year(),
    ) {
        Ok(q) => q,
        Err(e) => return error_response(&e),
    };

    // A panic inside the lookup stays confined to this task.
    let lookup = state.lookup.clone();
    let outcome = tokio::spawn(async move { lookup.lookup(&query).await })
        .await
        .unwrap_or_else(|e| Err(LookupError::InternalFailure(e.to_string())));

    match outcome {
        Ok(vehicle) => Json(json!({ "success": true, "vehicle": vehicle })).into_response(),
        Err(e) => error_response(&e),
    }
}

/// Render a lookup error as `{ success: false, error, ... }` with its status code.
fn error_response(err: &LookupError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let body = match err {
        LookupError::InvalidQuery(message) => json!({
            "success": false,
            "error": message,
            "example": "/api/car?make=Toyota&model=Camry&year=2022",
        }),
        LookupError::NoData {
            message,
            suggestion: Some(suggestion),
        } => json!({
            "success": false,
            "error": message,
            "suggestions": suggestion,
        }),
        LookupError::InternalFailure(detail) => {
            error!("Lookup failed: {}", detail);
            json!({
                "success": false,
                "error": "Internal server error while fetching car data.",
            })
        }
        other => json!({ "success": false, "error": other.to_string() }),
    };

    (status, Json(body)).into_response()
}
