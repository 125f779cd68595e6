// src/connectors/mod.rs
//
// Adapters to external vehicle-data providers.

pub mod carapi;

pub use carapi::CarApiClient;
