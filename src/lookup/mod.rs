// src/lookup/mod.rs
//
// Car lookup pipeline: validate the query, fetch trims and engines
// concurrently (each under its own timeout), merge, and classify the outcome.

pub mod category;
pub mod fallback;
pub mod merge;

pub use category::infer_category;
pub use merge::TrimMerger;

use crate::error::{FetchError, LookupError};
use crate::models::{
    valid_year_range, DataSource, MakeInfo, ModelInfo, VehicleQuery, VehicleResult, YearLabel,
};
use crate::pricing::PriceEstimator;
use crate::traits::SharedProvider;
use log::{info, warn};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

/// Validate raw query parameters into a `VehicleQuery`.
///
/// Make and model are required; a blank year means "all years".
pub fn validate_query(
    make: Option<&str>,
    model: Option<&str>,
    year: Option<&str>,
    current_year: i32,
) -> Result<VehicleQuery, LookupError> {
    let make = make.map(str::trim).filter(|s| !s.is_empty());
    let model = model.map(str::trim).filter(|s| !s.is_empty());
    let (make, model) = match (make, model) {
        (Some(make), Some(model)) => (make, model),
        _ => {
            return Err(LookupError::InvalidQuery(
                "Missing required parameters: make and model.".to_string(),
            ))
        }
    };

    let year = match year.map(str::trim).filter(|s| !s.is_empty()) {
        None => None,
        Some(raw) => {
            let range = valid_year_range(current_year);
            match raw.parse::<i32>() {
                Ok(y) if range.contains(&y) => Some(y),
                _ => {
                    return Err(LookupError::InvalidQuery(format!(
                        "Invalid year \"{}\". Must be between {} and {}.",
                        raw,
                        range.start(),
                        range.end()
                    )))
                }
            }
        }
    };

    Ok(VehicleQuery::new(make, model, year))
}

/// Runs lookups against a provider with a shared, read-only estimator.
pub struct VehicleLookup {
    provider: SharedProvider,
    estimator: PriceEstimator,
    source_timeout: Duration,
}

impl VehicleLookup {
    pub fn new(provider: SharedProvider, estimator: PriceEstimator, source_timeout: Duration) -> Self {
        Self {
            provider,
            estimator,
            source_timeout,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.estimator.current_year()
    }

    /// Run one upstream call under the per-source timeout. Hitting the timeout
    /// drops (cancels) only this call.
    async fn settle<T, F>(&self, label: &str, call: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        let outcome = match tokio::time::timeout(self.source_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(self.source_timeout.as_secs())),
        };
        if let Err(e) = &outcome {
            warn!("{}: {} unavailable: {}", self.provider.name(), label, e);
        }
        outcome
    }

    /// Full car lookup: trims and engines merged into normalized trims.
    pub async fn lookup(&self, query: &VehicleQuery) -> Result<VehicleResult, LookupError> {
        let (trims, engines) = tokio::join!(
            self.settle("trims", self.provider.trims(query)),
            self.settle("engines", self.provider.engines(query)),
        );

        let degraded = trims.is_err() || engines.is_err();
        let trims = trims.unwrap_or_default();
        let engines = engines.unwrap_or_default();

        if trims.is_empty() && engines.is_empty() {
            return Err(LookupError::no_data(&query.describe()));
        }

        let merged = TrimMerger::new(&self.estimator).merge(query, &trims, &engines);
        info!(
            "Lookup {}: {} trims, {} engines -> {} results",
            query.describe(),
            trims.len(),
            engines.len(),
            merged.len()
        );

        Ok(VehicleResult {
            year: YearLabel::from(query.year),
            make: query.make.clone(),
            model: query.model.clone(),
            total_trims: merged.len(),
            trims: merged,
            source: if degraded {
                DataSource::Fallback
            } else {
                DataSource::Live
            },
        })
    }

    /// Available model years; generated locally when the provider cannot answer.
    pub async fn years(&self) -> (Vec<i32>, DataSource) {
        match self.settle("years", self.provider.years()).await {
            Ok(years) if !years.is_empty() => (years, DataSource::Live),
            _ => (fallback::fallback_years(self.current_year()), DataSource::Fallback),
        }
    }

    /// Makes, optionally for one year; a curated list when the provider cannot answer.
    pub async fn makes(&self, year: Option<i32>) -> (Vec<MakeInfo>, DataSource) {
        match self.settle("makes", self.provider.makes(year)).await {
            Ok(makes) if !makes.is_empty() => (makes, DataSource::Live),
            _ => (fallback::popular_makes(), DataSource::Fallback),
        }
    }

    /// Models for a make. Duplicate names collapse to one entry.
    pub async fn models(&self, make: &str, year: Option<i32>) -> Result<Vec<ModelInfo>, LookupError> {
        let make = make.trim();
        if make.is_empty() {
            return Err(LookupError::InvalidQuery(
                "The \"make\" query parameter is required.".to_string(),
            ));
        }

        let models = self
            .settle("models", self.provider.models(make, year))
            .await
            .map_err(|source| LookupError::UpstreamUnavailable {
                message: "Failed to fetch models. The vehicle data provider may be temporarily unavailable."
                    .to_string(),
                source,
            })?;

        if models.is_empty() {
            return Err(LookupError::no_models(make, year));
        }
        Ok(dedup_models(models))
    }
}

/// Collapse models sharing a name: the slot of the first, the record of the last.
fn dedup_models(models: Vec<ModelInfo>) -> Vec<ModelInfo> {
    let mut slots: HashMap<String, usize> = HashMap::new();
    let mut unique: Vec<ModelInfo> = Vec::new();
    for model in models {
        match slots.get(&model.name) {
            Some(&idx) => unique[idx] = model,
            None => {
                slots.insert(model.name.clone(), unique.len());
                unique.push(model);
            }
        }
    }
    unique
}
