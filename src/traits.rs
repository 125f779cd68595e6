// src/traits.rs

use crate::error::FetchError;
use crate::models::{EngineRecord, MakeInfo, ModelInfo, TrimRecord, VehicleQuery};
use async_trait::async_trait;
use std::sync::Arc;

/// Source of vehicle data (years, makes, models, trims, engines).
///
/// Each call may fail or time out independently; callers decide how to degrade.
#[async_trait]
pub trait VehicleDataProvider: Send + Sync {
    /// Returns the name of this provider (for logging).
    fn name(&self) -> &str;

    async fn years(&self) -> Result<Vec<i32>, FetchError>;

    async fn makes(&self, year: Option<i32>) -> Result<Vec<MakeInfo>, FetchError>;

    async fn models(&self, make: &str, year: Option<i32>) -> Result<Vec<ModelInfo>, FetchError>;

    /// Trim metadata (name, description, MSRP) for a make/model/year.
    async fn trims(&self, query: &VehicleQuery) -> Result<Vec<TrimRecord>, FetchError>;

    /// Engine metadata for a make/model/year, keyed to trims by `trim_id`.
    async fn engines(&self, query: &VehicleQuery) -> Result<Vec<EngineRecord>, FetchError>;
}

/// Provider handle shared between the server and lookups.
pub type SharedProvider = Arc<dyn VehicleDataProvider>;
