// src/lookup/merge.rs
//
// Joins independently fetched trim and engine collections into normalized
// trims, attaches verified pricing, and removes duplicates.

use super::category::infer_category;
use crate::models::{
    EngineRecord, EngineSpec, NormalizedTrim, TrimPricing, TrimRecord, VehicleQuery, UNKNOWN_FIELD,
};
use crate::pricing::PriceEstimator;
use std::collections::{HashMap, HashSet};

const DEFAULT_TRIM_NAME: &str = "Base";

/// Merges trim and engine records for one query.
pub struct TrimMerger<'a> {
    estimator: &'a PriceEstimator,
}

impl<'a> TrimMerger<'a> {
    pub fn new(estimator: &'a PriceEstimator) -> Self {
        Self { estimator }
    }

    /// Produce the ordered, deduplicated trims for a query.
    ///
    /// Returns an empty list only when both inputs are empty; the caller turns
    /// that into a "no data" answer.
    pub fn merge(
        &self,
        query: &VehicleQuery,
        trims: &[TrimRecord],
        engines: &[EngineRecord],
    ) -> Vec<NormalizedTrim> {
        let merged = if !trims.is_empty() {
            let engine_map = build_engine_map(engines);
            trims
                .iter()
                .map(|trim| {
                    let engine = trim.id.as_deref().and_then(|id| engine_map.get(id).copied());
                    self.normalize_trim(query, trim, engine)
                })
                .collect()
        } else {
            engines.iter().map(normalize_engine_only).collect()
        };

        dedup_trims(merged)
    }

    fn normalize_trim(
        &self,
        query: &VehicleQuery,
        trim: &TrimRecord,
        engine: Option<&EngineRecord>,
    ) -> NormalizedTrim {
        let category = infer_category(trim.description.as_deref());

        // Only an upstream MSRP earns a price; no local or default substitutes here.
        let pricing = trim.msrp.filter(|m| *m > 0.0).map(|msrp| {
            let year = query.year.unwrap_or_else(|| self.estimator.current_year());
            TrimPricing::from(self.estimator.estimate_price(
                &query.make,
                &query.model,
                year,
                Some(msrp),
                category,
            ))
        });

        NormalizedTrim {
            trim_name: trim
                .trim_name
                .clone()
                .unwrap_or_else(|| DEFAULT_TRIM_NAME.to_string()),
            submodel: trim.submodel.clone(),
            description: trim.description.clone(),
            engine: engine.map(engine_spec).unwrap_or_else(EngineSpec::unknown),
            pricing,
        }
    }
}

/// Engine lookup keyed by trim id. A later engine row for the same trim replaces
/// an earlier one.
fn build_engine_map(engines: &[EngineRecord]) -> HashMap<&str, &EngineRecord> {
    engines
        .iter()
        .filter_map(|engine| engine.trim_id.as_deref().map(|id| (id, engine)))
        .collect()
}

/// Trim synthesized from an engine row when the trims call produced nothing.
/// There is no MSRP channel on this path, so pricing stays unset.
fn normalize_engine_only(engine: &EngineRecord) -> NormalizedTrim {
    NormalizedTrim {
        trim_name: engine
            .trim_name
            .clone()
            .unwrap_or_else(|| DEFAULT_TRIM_NAME.to_string()),
        submodel: engine.submodel.clone(),
        description: engine.trim_description.clone(),
        engine: engine_spec(engine),
        pricing: None,
    }
}

/// Format an engine record for display.
pub fn engine_spec(engine: &EngineRecord) -> EngineSpec {
    EngineSpec {
        engine: describe_engine(engine),
        fuel_type: or_unknown(engine.fuel_type.as_deref()),
        horsepower: engine
            .horsepower_hp
            .map(|hp| format!("{} HP", hp))
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
        torque: engine
            .torque_ft_lbs
            .map(|t| format!("{} lb-ft", t))
            .unwrap_or_else(|| UNKNOWN_FIELD.to_string()),
        transmission: or_unknown(engine.transmission.as_deref()),
        drive_type: or_unknown(engine.drive_type.as_deref()),
        cylinders: or_unknown(engine.cylinders.as_deref()),
    }
}

/// "2.5L I4 gas" when the displacement is known, else the engine type alone.
fn describe_engine(engine: &EngineRecord) -> String {
    match engine.size_liters {
        Some(size) => {
            let displacement = format!("{}L", size);
            [
                Some(displacement.as_str()),
                engine.cylinders.as_deref(),
                engine.engine_type.as_deref(),
            ]
            .iter()
            .flatten()
            .copied()
            .collect::<Vec<_>>()
            .join(" ")
        }
        None => or_unknown(engine.engine_type.as_deref()),
    }
}

fn or_unknown(value: Option<&str>) -> String {
    value.unwrap_or(UNKNOWN_FIELD).to_string()
}

/// Drop later trims sharing (trim_name, description) with an earlier one.
pub fn dedup_trims(trims: Vec<NormalizedTrim>) -> Vec<NormalizedTrim> {
    let mut seen: HashSet<(String, Option<String>)> = HashSet::new();
    trims
        .into_iter()
        .filter(|trim| {
            let (name, description) = trim.dedup_key();
            seen.insert((name.to_string(), description.map(|d| d.to_string())))
        })
        .collect()
}
