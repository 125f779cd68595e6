// src/lib.rs

// 1. Data Structures (The "Nouns")
// explicit 'pub' makes them available to main.rs
pub mod models;
pub mod error;

// 2. Interfaces (The "Contract")
pub mod traits;

// 3. Settings (The "Knobs")
pub mod config;

// 4. Adapters (The "Plumbing")
pub mod connectors;

// 5. Valuation (The "Appraiser")
pub mod pricing;

// 6. Lookup Pipeline (The "Orchestrator")
pub mod lookup;

// 7. HTTP Surface (The "Storefront")
pub mod server;
