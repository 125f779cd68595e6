// src/pricing/table.rs
//
// Reference price table: per-model base MSRPs, category defaults and the set
// of luxury makes. Loaded once at startup and shared read-only.

use crate::models::Category;
use log::{info, warn};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

/// Seed table compiled into the binary, used when no table file is configured.
const EMBEDDED_PRICE_DATA: &str = include_str!("../../data/price_data.json");

/// Base MSRP used when the defaults section has no entry for a category.
pub const FALLBACK_BASE_MSRP: f64 = 32000.0;

/// Model-level entry of the price table.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
pub struct ModelPrice {
    pub base_msrp: f64,
    #[serde(default)]
    pub category: Option<Category>,
}

#[derive(Debug, Deserialize)]
struct DefaultPrice {
    base_msrp: f64,
}

/// On-disk shape: make names at the top level next to two reserved keys.
#[derive(Debug, Deserialize)]
struct RawPriceTable {
    #[serde(rename = "_defaults", default)]
    defaults: HashMap<String, DefaultPrice>,
    #[serde(rename = "_luxury_brands", default)]
    luxury_brands: Vec<String>,
    #[serde(flatten)]
    makes: HashMap<String, HashMap<String, ModelPrice>>,
}

/// Immutable reference price data.
#[derive(Clone, Debug, Default)]
pub struct PriceTable {
    makes: HashMap<String, HashMap<String, ModelPrice>>,
    defaults: HashMap<Category, f64>,
    luxury_brands: HashSet<String>,
}

impl PriceTable {
    /// Load the table from a JSON file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read price table: {}", e))?;
        let table = Self::from_json(&contents)?;
        info!(
            "PriceTable: Loaded {} makes from {}",
            table.makes.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    /// Parse the table from a JSON string.
    pub fn from_json(s: &str) -> Result<Self, String> {
        let raw: RawPriceTable =
            serde_json::from_str(s).map_err(|e| format!("Failed to parse price table: {}", e))?;

        let mut defaults = HashMap::new();
        for (key, entry) in raw.defaults {
            match key.parse::<Category>() {
                Ok(category) => {
                    defaults.insert(category, entry.base_msrp);
                }
                Err(e) => warn!("PriceTable: Skipping default entry: {}", e),
            }
        }

        Ok(Self {
            makes: raw.makes,
            defaults,
            luxury_brands: raw.luxury_brands.into_iter().collect(),
        })
    }

    /// The seed table shipped with the binary.
    pub fn embedded() -> Result<Self, String> {
        Self::from_json(EMBEDDED_PRICE_DATA)
    }

    /// Model entry for an exact (make, model) pair.
    pub fn model_price(&self, make: &str, model: &str) -> Option<&ModelPrice> {
        self.makes.get(make).and_then(|models| models.get(model))
    }

    /// Default base MSRP for a category bucket.
    pub fn default_msrp(&self, category: Category) -> Option<f64> {
        self.defaults.get(&category).copied()
    }

    pub fn is_luxury(&self, make: &str) -> bool {
        self.luxury_brands.contains(make)
    }

    pub fn make_count(&self) -> usize {
        self.makes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SMALL_TABLE: &str = r#"{
        "_defaults": {
            "sedan": { "base_msrp": 28000 },
            "luxury_suv": { "base_msrp": 65000 },
            "hovercraft": { "base_msrp": 1 }
        },
        "_luxury_brands": ["BMW"],
        "Toyota": {
            "Camry": { "base_msrp": 28400, "category": "sedan" },
            "Mystery": { "base_msrp": 10000 }
        }
    }"#;

    #[test]
    fn test_parse_reserved_keys_and_makes() {
        let table = PriceTable::from_json(SMALL_TABLE).unwrap();
        assert_eq!(table.make_count(), 1);
        assert_eq!(table.default_msrp(Category::Sedan), Some(28000.0));
        assert_eq!(table.default_msrp(Category::LuxurySuv), Some(65000.0));
        assert_eq!(table.default_msrp(Category::Truck), None);
        assert!(table.is_luxury("BMW"));
        assert!(!table.is_luxury("Toyota"));
    }

    #[test]
    fn test_model_lookup_is_exact() {
        let table = PriceTable::from_json(SMALL_TABLE).unwrap();
        let camry = table.model_price("Toyota", "Camry").unwrap();
        assert_eq!(camry.base_msrp, 28400.0);
        assert_eq!(camry.category, Some(Category::Sedan));
        assert_eq!(table.model_price("Toyota", "Mystery").unwrap().category, None);
        assert!(table.model_price("toyota", "Camry").is_none());
        assert!(table.model_price("Toyota", "Supra").is_none());
    }

    #[test]
    fn test_embedded_table_loads() {
        let table = PriceTable::embedded().unwrap();
        assert_eq!(table.model_price("Toyota", "Camry").unwrap().base_msrp, 28400.0);
        assert_eq!(table.model_price("BMW", "X5").unwrap().base_msrp, 63200.0);
        assert_eq!(table.default_msrp(Category::Sports), Some(50000.0));
        assert_eq!(table.default_msrp(Category::Unknown), Some(FALLBACK_BASE_MSRP));
        assert!(table.is_luxury("Ferrari"));
    }

    #[test]
    fn test_malformed_table_is_an_error() {
        assert!(PriceTable::from_json("[1, 2, 3]").is_err());
        assert!(PriceTable::from_json(r#"{"Toyota": {"Camry": {"category": "sedan"}}}"#).is_err());
    }
}
