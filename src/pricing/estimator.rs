// src/pricing/estimator.rs
//
// Depreciation-based resale price estimate.
//
// Formula:
//   price = max(msrp * (1 - depreciation(age)) * multiplier, msrp * 0.10)
//   rounded to the nearest 100.

use super::resolver::resolve_base_msrp;
use super::table::PriceTable;
use crate::models::{Category, PricingResult};
use chrono::Datelike;
use std::sync::Arc;

/// First-year depreciation.
const FIRST_YEAR_RATE: f64 = 0.20;
/// Cumulative depreciation after two years.
const SECOND_YEAR_RATE: f64 = 0.35;
/// Additional depreciation per year from year three on.
const YEARLY_RATE: f64 = 0.10;
const MAX_DEPRECIATION: f64 = 0.90;

/// Estimates never drop below this fraction of the base MSRP.
const PRICE_FLOOR_FRACTION: f64 = 0.10;
const LUXURY_MULTIPLIER: f64 = 0.97;

/// Fraction of value lost at the given age in years.
pub fn depreciation_rate(age: u32) -> f64 {
    match age {
        0 => 0.0,
        1 => FIRST_YEAR_RATE,
        2 => SECOND_YEAR_RATE,
        _ => (SECOND_YEAR_RATE + (age - 2) as f64 * YEARLY_RATE).min(MAX_DEPRECIATION),
    }
}

/// Value-retention multiplier. The luxury discount stacks on the category factor.
pub fn category_multiplier(category: Option<Category>, luxury: bool) -> f64 {
    let base = match category {
        Some(Category::Truck) => 1.05,
        Some(Category::Suv) => 1.02,
        Some(Category::Sports) => 0.92,
        _ => 1.0,
    };
    if luxury {
        base * LUXURY_MULTIPLIER
    } else {
        base
    }
}

/// Round half up to the nearest 100.
pub fn round_to_hundred(value: f64) -> i64 {
    ((value / 100.0 + 0.5).floor() * 100.0) as i64
}

/// Pure price estimator bound to a reference table and a "current year".
#[derive(Clone, Debug)]
pub struct PriceEstimator {
    table: Arc<PriceTable>,
    current_year: i32,
}

impl PriceEstimator {
    /// Creates an estimator using the system clock's year.
    pub fn new(table: Arc<PriceTable>) -> Self {
        Self::with_current_year(table, chrono::Utc::now().year())
    }

    /// Creates an estimator pinned to a specific current year.
    pub fn with_current_year(table: Arc<PriceTable>, current_year: i32) -> Self {
        Self {
            table,
            current_year,
        }
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// Estimate the resale price of a vehicle. Total: always returns a result.
    pub fn estimate_price(
        &self,
        make: &str,
        model: &str,
        year: i32,
        api_msrp: Option<f64>,
        category: Option<Category>,
    ) -> PricingResult {
        // Widened so any i32 year is accepted; future years count as new.
        let age = i64::from(self.current_year) - i64::from(year);
        let vehicle_age = age.clamp(0, i64::from(u32::MAX)) as u32;

        let resolved = resolve_base_msrp(&self.table, make, model, api_msrp, category);
        let base_msrp = resolved.base_msrp;

        let rate = depreciation_rate(vehicle_age);
        let multiplier = category_multiplier(resolved.category, self.table.is_luxury(make));

        let depreciated = base_msrp * (1.0 - rate) * multiplier;
        let floored = depreciated.max(base_msrp * PRICE_FLOOR_FRACTION);

        PricingResult {
            estimated_price: round_to_hundred(floored),
            msrp: base_msrp.round() as i64,
            depreciation_pct: (rate * 100.0).round() as u32,
            vehicle_age,
            method: resolved.method,
        }
    }
}
