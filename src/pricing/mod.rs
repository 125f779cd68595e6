// src/pricing/mod.rs
//
// Resale price estimation: reference price table, MSRP source resolution and
// the depreciation formula.

pub mod estimator;
pub mod resolver;
pub mod table;

pub use estimator::{category_multiplier, depreciation_rate, PriceEstimator};
pub use resolver::{resolve_base_msrp, ResolvedMsrp};
pub use table::{ModelPrice, PriceTable};
