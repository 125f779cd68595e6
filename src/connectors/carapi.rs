// src/connectors/carapi.rs
//
// HTTP client for a CarAPI-style vehicle-data service.
// Fetches years, makes, models, trims and engines over plain JSON GETs.

use crate::config::UpstreamConfig;
use crate::error::FetchError;
use crate::models::{EngineRecord, MakeInfo, ModelInfo, TrimRecord, VehicleQuery};
use crate::traits::{SharedProvider, VehicleDataProvider};
use async_trait::async_trait;
use log::debug;
use reqwest::header::ACCEPT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use std::sync::Arc;
use std::time::Duration;

/// `{ "data": [...] }` envelope used by the list endpoints.
/// A missing or null `data` means no records.
#[derive(Debug, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
struct Envelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    data: Vec<T>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Deserialize)]
struct ApiMake {
    id: Option<i64>,
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiModel {
    id: Option<i64>,
    name: Option<String>,
    #[serde(default)]
    make: Option<serde_json::Value>,
}

/// CarAPI client.
pub struct CarApiClient {
    base_url: String,
    http_client: reqwest::Client,
    timeout: Duration,
    page_limit: u32,
    list_limit: u32,
}

impl CarApiClient {
    pub fn new(config: &UpstreamConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            http_client: reqwest::Client::new(),
            timeout: config.timeout(),
            page_limit: config.page_limit,
            list_limit: config.list_limit,
        }
    }

    /// Wraps the client for sharing across handlers.
    pub fn shared(self) -> SharedProvider {
        Arc::new(self)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, path);
        debug!("CarApi: GET {} {:?}", url, query);

        let response = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/json")
            .query(query)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Status {
                status: status.as_u16(),
                body,
            });
        }

        response.json::<T>().await.map_err(|e| self.classify(e))
    }

    fn classify(&self, e: reqwest::Error) -> FetchError {
        if e.is_timeout() {
            FetchError::Timeout(self.timeout.as_secs())
        } else {
            FetchError::from(e)
        }
    }

    /// Query parameters shared by the trims and engines endpoints.
    fn vehicle_params(&self, query: &VehicleQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("make", query.make.clone()),
            ("model", query.model.clone()),
        ];
        if let Some(year) = query.year {
            params.push(("year", year.to_string()));
        }
        params.push(("limit", self.page_limit.to_string()));
        params
    }
}

#[async_trait]
impl VehicleDataProvider for CarApiClient {
    fn name(&self) -> &str {
        "CarAPI"
    }

    async fn years(&self) -> Result<Vec<i32>, FetchError> {
        self.get_json("years", &[]).await
    }

    async fn makes(&self, year: Option<i32>) -> Result<Vec<MakeInfo>, FetchError> {
        let mut params = vec![("limit", self.list_limit.to_string())];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }

        let body: Envelope<ApiMake> = self.get_json("makes/v2", &params).await?;
        Ok(body
            .data
            .into_iter()
            .filter_map(|m| {
                Some(MakeInfo {
                    id: m.id.unwrap_or_default(),
                    name: m.name.filter(|n| !n.trim().is_empty())?,
                })
            })
            .collect())
    }

    async fn models(&self, make: &str, year: Option<i32>) -> Result<Vec<ModelInfo>, FetchError> {
        let mut params = vec![
            ("limit", self.list_limit.to_string()),
            ("make", make.to_string()),
        ];
        if let Some(year) = year {
            params.push(("year", year.to_string()));
        }

        let body: Envelope<ApiModel> = self.get_json("models/v2", &params).await?;
        Ok(body
            .data
            .into_iter()
            .filter_map(|m| {
                // `make` is a plain name on some API versions and an object on others.
                let make = match m.make {
                    Some(serde_json::Value::String(s)) => Some(s),
                    Some(serde_json::Value::Object(obj)) => obj
                        .get("name")
                        .and_then(|v| v.as_str())
                        .map(|s| s.to_string()),
                    _ => None,
                };
                Some(ModelInfo {
                    id: m.id.unwrap_or_default(),
                    name: m.name.filter(|n| !n.trim().is_empty())?,
                    make,
                })
            })
            .collect())
    }

    async fn trims(&self, query: &VehicleQuery) -> Result<Vec<TrimRecord>, FetchError> {
        let body: Envelope<TrimRecord> = self
            .get_json("trims/v2", &self.vehicle_params(query))
            .await?;
        Ok(body.data)
    }

    async fn engines(&self, query: &VehicleQuery) -> Result<Vec<EngineRecord>, FetchError> {
        let body: Envelope<EngineRecord> = self
            .get_json("engines/v2", &self.vehicle_params(query))
            .await?;
        Ok(body.data)
    }
}
