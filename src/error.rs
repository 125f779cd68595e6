// src/error.rs
//
// Error taxonomy for car lookups. Upstream failures are absorbed per source
// inside the lookup; only invalid input and "no data at all" reach the user
// as distinct messages.

use thiserror::Error;

/// Failure of a single call to the vehicle-data provider.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request failed: {0}")]
    Http(String),

    #[error("upstream returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("failed to parse response: {0}")]
    Decode(String),

    #[error("request timed out after {0}s")]
    Timeout(u64),
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            FetchError::Decode(e.to_string())
        } else {
            FetchError::Http(e.to_string())
        }
    }
}

/// Errors surfaced by a car lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Missing make/model or year out of range. Never reaches the merger.
    #[error("{0}")]
    InvalidQuery(String),

    /// The provider could not be reached for a request that has no local fallback.
    #[error("{message}")]
    UpstreamUnavailable {
        message: String,
        #[source]
        source: FetchError,
    },

    /// The provider answered, but had nothing for the query.
    #[error("{message}")]
    NoData {
        message: String,
        suggestion: Option<String>,
    },

    /// A defect during merge/estimation.
    #[error("internal failure: {0}")]
    InternalFailure(String),
}

impl LookupError {
    /// Neither trims nor engines came back for a car lookup.
    pub fn no_data(vehicle: &str) -> Self {
        LookupError::NoData {
            message: format!("No data found for {}.", vehicle),
            suggestion: Some(
                "The free tier covers many years. Check your spelling or try: Toyota Camry 2020"
                    .to_string(),
            ),
        }
    }

    /// No models listed for a make (and year).
    pub fn no_models(make: &str, year: Option<i32>) -> Self {
        let scope = year.map(|y| format!(" in {}", y)).unwrap_or_default();
        LookupError::NoData {
            message: format!("No models found for \"{}\"{}.", make, scope),
            suggestion: None,
        }
    }

    /// HTTP status code the server answers with.
    pub fn status_code(&self) -> u16 {
        match self {
            LookupError::InvalidQuery(_) => 400,
            LookupError::NoData { .. } => 404,
            LookupError::UpstreamUnavailable { .. } => 502,
            LookupError::InternalFailure(_) => 500,
        }
    }
}
