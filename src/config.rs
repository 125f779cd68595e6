// src/config.rs
//
// Configuration file parsing. Every section and key is optional; anything
// left out falls back to the defaults below.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_UPSTREAM_URL: &str = "https://carapi.app/api";

// =============================================================================
// Configuration Types
// =============================================================================

/// Root configuration structure.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub upstream: UpstreamConfig,
    #[serde(default)]
    pub pricing: PricingConfig,
}

/// Global settings.
#[derive(Debug, Default, Deserialize)]
pub struct GlobalConfig {
    /// Log level used when RUST_LOG is not set
    pub log_level: Option<String>,
}

/// HTTP server settings.
#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

/// Vehicle-data provider settings.
#[derive(Clone, Debug, Deserialize)]
pub struct UpstreamConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-call timeout; a call over budget counts as "no data from this source"
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Page size for trim/engine queries
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,
    /// Page size for make/model listings
    #[serde(default = "default_list_limit")]
    pub list_limit: u32,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            page_limit: default_page_limit(),
            list_limit: default_list_limit(),
        }
    }
}

impl UpstreamConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

fn default_base_url() -> String {
    DEFAULT_UPSTREAM_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    12
}

fn default_page_limit() -> u32 {
    50
}

fn default_list_limit() -> u32 {
    100
}

/// Reference price table settings.
#[derive(Debug, Default, Deserialize)]
pub struct PricingConfig {
    /// JSON price table; None uses the table compiled into the binary
    pub price_table: Option<PathBuf>,
}

// =============================================================================
// Configuration Loading
// =============================================================================

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(&path)
            .map_err(|e| format!("Failed to read config file: {}", e))?;
        Self::from_str(&contents)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(s: &str) -> Result<Self, String> {
        toml::from_str(s).map_err(|e| format!("Failed to parse config: {}", e))
    }

    /// Port to listen on: explicit override, then `PORT`, then the file.
    pub fn resolve_port(&self, cli_port: Option<u16>) -> u16 {
        cli_port
            .or_else(|| std::env::var("PORT").ok().and_then(|p| p.parse().ok()))
            .unwrap_or(self.server.port)
    }
}

// =============================================================================
// Default Configuration
// =============================================================================

/// Returns a default configuration string for documentation.
pub fn default_config_template() -> &'static str {
    r#"# AutoMart Configuration
#
# Every key is optional. Omitted values use the defaults shown here.

[global]
# Used when RUST_LOG is not set
log_level = "info"

[server]
# PORT environment variable and --port take precedence
port = 3000

[upstream]
# Vehicle-data provider (trims, engines, makes, models, years)
base_url = "https://carapi.app/api"
# Per-call timeout in seconds
timeout_secs = 12
# Page size for trims/engines
page_limit = 50
# Page size for makes/models
list_limit = 100

[pricing]
# Reference price table (JSON). Comment out to use the built-in table.
# price_table = "data/price_data.json"
"#
}

// =============================================================================
// Tests
// =============================================================================
