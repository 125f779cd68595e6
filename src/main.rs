// src/main.rs
//
// Car lookup and price estimation service.
// Serves the search UI and JSON API by default; `estimate` and `lookup`
// modes run a single query from the command line.

use automart::config::{default_config_template, Config};
use automart::connectors::CarApiClient;
use automart::lookup::{validate_query, VehicleLookup};
use automart::models::Category;
use automart::pricing::{PriceEstimator, PriceTable};
use automart::server::CarServer;
use clap::Parser;
use log::info;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "automart")]
#[command(about = "Car specs lookup with estimated market prices")]
struct Args {
    /// Mode of operation: serve, estimate or lookup
    #[arg(long, default_value = "serve")]
    mode: String,

    /// Path to configuration file (TOML)
    #[arg(long, short)]
    config: Option<String>,

    /// Port for the HTTP server (overrides PORT and the config file)
    #[arg(long)]
    port: Option<u16>,

    /// Path to a price table (JSON) replacing the built-in one
    #[arg(long)]
    price_table: Option<String>,

    /// Vehicle make (estimate and lookup modes)
    #[arg(long)]
    make: Option<String>,

    /// Vehicle model (estimate and lookup modes)
    #[arg(long)]
    model: Option<String>,

    /// Model year (estimate and lookup modes)
    #[arg(long)]
    year: Option<String>,

    /// Known MSRP in dollars (estimate mode)
    #[arg(long)]
    msrp: Option<f64>,

    /// Body category, e.g. sedan, suv, sports (estimate mode)
    #[arg(long)]
    category: Option<String>,

    /// Generate a default configuration file
    #[arg(long)]
    generate_config: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    // Handle config generation
    if args.generate_config {
        println!("{}", default_config_template());
        return;
    }

    let config = load_config(&args);
    init_logging(&config);

    match args.mode.as_str() {
        "serve" => run_serve_mode(&args, &config).await,
        "estimate" => run_estimate_mode(&args, &config),
        "lookup" => run_lookup_mode(&args, &config).await,
        _ => {
            eprintln!("Unknown mode: {}. Use: serve, estimate, or lookup", args.mode);
            std::process::exit(1);
        }
    }
}

// =============================================================================
// Serve Mode: HTTP API + web UI
// =============================================================================

async fn run_serve_mode(args: &Args, config: &Config) {
    let lookup = build_lookup(args, config);
    let port = config.resolve_port(args.port);

    let server = CarServer::new(Arc::new(lookup), port);
    println!("Car lookup available at http://localhost:{}", port);
    if let Err(e) = server.run().await {
        eprintln!("Server error: {}", e);
        std::process::exit(1);
    }
}

// =============================================================================
// Estimate Mode: single price estimate, no upstream calls
// =============================================================================

fn run_estimate_mode(args: &Args, config: &Config) {
    let (make, model) = require_vehicle(args);
    let estimator = PriceEstimator::new(load_price_table(args, config));

    let year = match args.year.as_deref() {
        Some(raw) => match raw.trim().parse::<i32>() {
            Ok(y) => y,
            Err(_) => {
                eprintln!("Invalid year: {}", raw);
                std::process::exit(1);
            }
        },
        None => estimator.current_year(),
    };

    let category = match args.category.as_deref() {
        Some(raw) => match raw.parse::<Category>() {
            Ok(c) => Some(c),
            Err(e) => {
                eprintln!("{}", e);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let result = estimator.estimate_price(make, model, year, args.msrp, category);
    info!(
        "Estimate {} {} {}: ${} ({})",
        year,
        make,
        model,
        result.estimated_price,
        result.method.label()
    );
    print_json(&result);
}

// =============================================================================
// Lookup Mode: one live lookup printed as JSON
// =============================================================================

async fn run_lookup_mode(args: &Args, config: &Config) {
    let lookup = build_lookup(args, config);

    let query = match validate_query(
        args.make.as_deref(),
        args.model.as_deref(),
        args.year.as_deref(),
        lookup.current_year(),
    ) {
        Ok(q) => q,
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    };

    match lookup.lookup(&query).await {
        Ok(vehicle) => print_json(&vehicle),
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }
}

// =============================================================================
// Helpers
// =============================================================================

fn load_config(args: &Args) -> Config {
    match &args.config {
        Some(path) => match Config::from_file(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config: {}", e);
                eprintln!("Use --generate-config to create a template.");
                std::process::exit(1);
            }
        },
        None => Config::default(),
    }
}

/// RUST_LOG wins; otherwise the configured level, otherwise `info`.
fn init_logging(config: &Config) {
    let level = config.global.log_level.as_deref().unwrap_or("info");
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_price_table(args: &Args, config: &Config) -> Arc<PriceTable> {
    let path = args
        .price_table
        .clone()
        .map(std::path::PathBuf::from)
        .or_else(|| config.pricing.price_table.clone());

    let table = match &path {
        Some(p) => PriceTable::from_file(p),
        None => PriceTable::embedded(),
    };

    match table {
        Ok(t) => {
            info!("Price table: {} makes loaded", t.make_count());
            Arc::new(t)
        }
        Err(e) => {
            eprintln!("Failed to load price table: {}", e);
            std::process::exit(1);
        }
    }
}

fn build_lookup(args: &Args, config: &Config) -> VehicleLookup {
    let estimator = PriceEstimator::new(load_price_table(args, config));
    let provider = CarApiClient::new(&config.upstream).shared();
    VehicleLookup::new(provider, estimator, config.upstream.timeout())
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize result: {}", e);
            std::process::exit(1);
        }
    }
}

fn require_vehicle(args: &Args) -> (&str, &str) {
    match (args.make.as_deref(), args.model.as_deref()) {
        (Some(make), Some(model)) => (make, model),
        _ => {
            eprintln!("--make and --model are required for {} mode", args.mode);
            std::process::exit(1);
        }
    }
}
