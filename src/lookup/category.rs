// src/lookup/category.rs
//
// Body-style inference from free-text trim descriptions.

use crate::models::Category;

/// Ordered (substring, category) rules. First match wins, so "Crew Cab Sedan"
/// would be a sedan and "Convertible Van" a sports car.
pub const CATEGORY_RULES: &[(&str, Category)] = &[
    ("sedan", Category::Sedan),
    ("suv", Category::Suv),
    ("truck", Category::Truck),
    ("cab", Category::Truck),
    ("coupe", Category::Sports),
    ("convertible", Category::Sports),
    ("van", Category::Van),
];

/// Infer a category from a trim description (case-insensitive substring match).
pub fn infer_category(description: Option<&str>) -> Option<Category> {
    let text = description?.to_lowercase();
    CATEGORY_RULES
        .iter()
        .find(|(needle, _)| text.contains(needle))
        .map(|(_, category)| *category)
}
