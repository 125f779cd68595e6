// src/lookup/fallback.rs
//
// Locally generated listings served when the provider cannot answer.

use crate::models::{MakeInfo, MIN_MODEL_YEAR};

const POPULAR_MAKES: &[&str] = &[
    "Acura", "Alfa Romeo", "Aston Martin", "Audi", "Bentley", "BMW", "Buick", "Cadillac",
    "Chevrolet", "Chrysler", "Dodge", "Ferrari", "Fiat", "Ford", "Genesis", "GMC", "Honda",
    "Hyundai", "Infiniti", "Jaguar", "Jeep", "Kia", "Lamborghini", "Land Rover", "Lexus",
    "Lincoln", "Lotus", "Maserati", "Mazda", "McLaren", "Mercedes-Benz", "Mini", "Mitsubishi",
    "Nissan", "Porsche", "Ram", "Rolls-Royce", "Subaru", "Tesla", "Toyota", "Volkswagen",
    "Volvo",
];

/// Model years from next year down to the oldest supported year.
pub fn fallback_years(current_year: i32) -> Vec<i32> {
    (MIN_MODEL_YEAR..=current_year + 1).rev().collect()
}

/// Curated list of common makes, numbered from 1.
pub fn popular_makes() -> Vec<MakeInfo> {
    POPULAR_MAKES
        .iter()
        .enumerate()
        .map(|(i, name)| MakeInfo {
            id: i as i64 + 1,
            name: name.to_string(),
        })
        .collect()
}
