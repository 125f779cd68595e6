// src/models.rs

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Earliest model year accepted by a lookup.
pub const MIN_MODEL_YEAR: i32 = 1995;

/// How far past the current year a lookup may reach (next-year models).
pub const MAX_YEARS_AHEAD: i32 = 2;

/// Placeholder rendered for any engine field the upstream left out.
pub const UNKNOWN_FIELD: &str = "N/A";

// =============================================================================
// Vehicle Categories
// =============================================================================

/// Vehicle category used for default MSRPs and value-retention multipliers.
///
/// The two luxury variants only exist as default-price buckets; they are never
/// inferred from a trim description.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Sedan,
    Suv,
    Truck,
    Sports,
    Van,
    LuxurySedan,
    LuxurySuv,
    #[serde(other)]
    Unknown,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Sedan => "sedan",
            Category::Suv => "suv",
            Category::Truck => "truck",
            Category::Sports => "sports",
            Category::Van => "van",
            Category::LuxurySedan => "luxury_sedan",
            Category::LuxurySuv => "luxury_suv",
            Category::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sedan" => Ok(Category::Sedan),
            "suv" => Ok(Category::Suv),
            "truck" => Ok(Category::Truck),
            "sports" => Ok(Category::Sports),
            "van" => Ok(Category::Van),
            "luxury_sedan" => Ok(Category::LuxurySedan),
            "luxury_suv" => Ok(Category::LuxurySuv),
            "unknown" => Ok(Category::Unknown),
            other => Err(format!("Unknown vehicle category: {}", other)),
        }
    }
}

// =============================================================================
// Pricing Results
// =============================================================================

/// Where the base MSRP of an estimate came from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceMethod {
    /// MSRP reported by the vehicle-data provider.
    ApiMsrp,
    /// MSRP from the local price table.
    LocalMsrp,
    /// Category default, no model-specific MSRP known.
    EstimatedDefault,
}

impl PriceMethod {
    /// Short label the frontend shows next to a price.
    pub fn label(&self) -> &'static str {
        match self {
            PriceMethod::ApiMsrp => "MSRP Verified",
            PriceMethod::LocalMsrp => "Estimated (Local)",
            PriceMethod::EstimatedDefault => "Rough Estimate",
        }
    }
}

/// Output of the price estimator. Never persisted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub estimated_price: i64,
    pub msrp: i64,
    /// Whole percent, 0..=90.
    pub depreciation_pct: u32,
    pub vehicle_age: u32,
    pub method: PriceMethod,
}

// =============================================================================
// Queries
// =============================================================================

/// A validated car lookup request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VehicleQuery {
    pub make: String,
    pub model: String,
    /// None means unfiltered / latest data.
    pub year: Option<i32>,
}

impl VehicleQuery {
    pub fn new(make: impl Into<String>, model: impl Into<String>, year: Option<i32>) -> Self {
        Self {
            make: make.into(),
            model: model.into(),
            year,
        }
    }

    /// Human-readable label such as "2020 Toyota Camry" or "Toyota Camry".
    pub fn describe(&self) -> String {
        match self.year {
            Some(year) => format!("{} {} {}", year, self.make, self.model),
            None => format!("{} {}", self.make, self.model),
        }
    }
}

/// Inclusive range of model years a query may ask for.
pub fn valid_year_range(current_year: i32) -> std::ops::RangeInclusive<i32> {
    MIN_MODEL_YEAR..=current_year + MAX_YEARS_AHEAD
}

// =============================================================================
// Normalized Output
// =============================================================================

/// Engine/drivetrain fields of a trim, already formatted for display.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSpec {
    pub engine: String,
    pub fuel_type: String,
    pub horsepower: String,
    pub torque: String,
    pub transmission: String,
    pub drive_type: String,
    pub cylinders: String,
}

impl EngineSpec {
    /// Spec used when no engine record matches a trim.
    pub fn unknown() -> Self {
        Self {
            engine: UNKNOWN_FIELD.to_string(),
            fuel_type: UNKNOWN_FIELD.to_string(),
            horsepower: UNKNOWN_FIELD.to_string(),
            torque: UNKNOWN_FIELD.to_string(),
            transmission: UNKNOWN_FIELD.to_string(),
            drive_type: UNKNOWN_FIELD.to_string(),
            cylinders: UNKNOWN_FIELD.to_string(),
        }
    }
}

/// Pricing block attached to a trim. Present only when the upstream supplied
/// a real MSRP for that trim, so the four fields are set or unset together.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct TrimPricing {
    pub msrp: i64,
    pub estimated_price: i64,
    pub depreciation_pct: u32,
    pub price_method: PriceMethod,
    /// Display badge for `price_method`.
    pub price_label: &'static str,
}

impl From<PricingResult> for TrimPricing {
    fn from(result: PricingResult) -> Self {
        Self {
            msrp: result.msrp,
            estimated_price: result.estimated_price,
            depreciation_pct: result.depreciation_pct,
            price_method: result.method,
            price_label: result.method.label(),
        }
    }
}

/// One merged trim/engine record.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NormalizedTrim {
    pub trim_name: String,
    pub submodel: Option<String>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub engine: EngineSpec,
    #[serde(flatten)]
    pub pricing: Option<TrimPricing>,
}

impl NormalizedTrim {
    /// Composite key used for deduplication.
    pub fn dedup_key(&self) -> (&str, Option<&str>) {
        (self.trim_name.as_str(), self.description.as_deref())
    }
}

/// Year shown on a result: a concrete year, or "All Years" for unfiltered lookups.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum YearLabel {
    Year(i32),
    AllYears,
}

impl From<Option<i32>> for YearLabel {
    fn from(year: Option<i32>) -> Self {
        year.map(YearLabel::Year).unwrap_or(YearLabel::AllYears)
    }
}

impl Serialize for YearLabel {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            YearLabel::Year(year) => serializer.serialize_i32(*year),
            YearLabel::AllYears => serializer.serialize_str("All Years"),
        }
    }
}

impl fmt::Display for YearLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            YearLabel::Year(year) => write!(f, "{}", year),
            YearLabel::AllYears => write!(f, "All Years"),
        }
    }
}

/// Whether a result came straight from the provider or was degraded/generated locally.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Live,
    Fallback,
}

/// Full answer to a car lookup.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct VehicleResult {
    pub year: YearLabel,
    pub make: String,
    pub model: String,
    pub total_trims: usize,
    pub trims: Vec<NormalizedTrim>,
    pub source: DataSource,
}

// =============================================================================
// Catalog Listings
// =============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MakeInfo {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelInfo {
    pub id: i64,
    pub name: String,
    pub make: Option<String>,
}

// =============================================================================
// Raw Provider Types (Used for JSON parsing only)
// =============================================================================

/// Trim record as returned by the vehicle-data provider. Every field may be missing.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct TrimRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, rename = "trim", deserialize_with = "lenient_string")]
    pub trim_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub submodel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "lenient_positive")]
    pub msrp: Option<f64>,
}

/// Engine record as returned by the vehicle-data provider, keyed to a trim by `trim_id`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
pub struct EngineRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub trim_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub engine_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub fuel_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub cylinders: Option<String>,
    #[serde(default, rename = "size", deserialize_with = "lenient_positive")]
    pub size_liters: Option<f64>,
    #[serde(default, deserialize_with = "lenient_positive")]
    pub horsepower_hp: Option<f64>,
    #[serde(default, deserialize_with = "lenient_positive")]
    pub torque_ft_lbs: Option<f64>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub drive_type: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub transmission: Option<String>,
    // Trim metadata repeated on engine rows; used when the trims call yields nothing.
    #[serde(default, rename = "trim", deserialize_with = "lenient_string")]
    pub trim_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub submodel: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub trim_description: Option<String>,
}

/// Accepts strings, numbers and booleans; blank strings and other shapes become None.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.and_then(|v| match v {
        serde_json::Value::String(s) => {
            let trimmed = s.trim();
            (!trimmed.is_empty()).then(|| trimmed.to_string())
        }
        serde_json::Value::Number(n) => Some(n.to_string()),
        serde_json::Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }))
}

/// Accepts numbers or numeric strings; keeps only finite values above zero.
fn lenient_positive<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    let number = match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().replace(',', "").parse::<f64>().ok(),
        _ => None,
    };
    Ok(number.filter(|n| n.is_finite() && *n > 0.0))
}
