// src/pricing/resolver.rs
//
// Decides which MSRP source to trust for an estimate:
//   1. provider MSRP (when > 0)
//   2. local price table entry for (make, model)
//   3. category default, with luxury makes upgraded to the luxury buckets

use super::table::{PriceTable, FALLBACK_BASE_MSRP};
use crate::models::{Category, PriceMethod};

/// A base MSRP together with its provenance and the category pricing should use.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ResolvedMsrp {
    pub base_msrp: f64,
    pub method: PriceMethod,
    /// Caller category, or the table's category when the table supplied the MSRP.
    pub category: Option<Category>,
}

/// Resolve the base MSRP in strict priority order.
///
/// When `api_msrp` is positive neither the table nor the defaults are consulted.
pub fn resolve_base_msrp(
    table: &PriceTable,
    make: &str,
    model: &str,
    api_msrp: Option<f64>,
    category: Option<Category>,
) -> ResolvedMsrp {
    if let Some(msrp) = api_msrp.filter(|m| *m > 0.0) {
        return ResolvedMsrp {
            base_msrp: msrp,
            method: PriceMethod::ApiMsrp,
            category,
        };
    }

    if let Some(entry) = table.model_price(make, model).filter(|e| e.base_msrp > 0.0) {
        return ResolvedMsrp {
            base_msrp: entry.base_msrp,
            method: PriceMethod::LocalMsrp,
            category: category.or(entry.category),
        };
    }

    let key = default_key(table, make, category);
    ResolvedMsrp {
        base_msrp: table.default_msrp(key).unwrap_or(FALLBACK_BASE_MSRP),
        method: PriceMethod::EstimatedDefault,
        category,
    }
}

/// Defaults bucket for a make/category pair.
///
/// The luxury upgrade happens before the defaults lookup and only for sedans and SUVs.
pub fn default_key(table: &PriceTable, make: &str, category: Option<Category>) -> Category {
    let key = category.unwrap_or(Category::Unknown);
    if !table.is_luxury(make) {
        return key;
    }
    match key {
        Category::Sedan => Category::LuxurySedan,
        Category::Suv => Category::LuxurySuv,
        other => other,
    }
}
