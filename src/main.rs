use clap::Parser;
use geomonkey::utils::{logger, validation::Validate};
use geomonkey::{GeocoderRegistry, GeomonkeyConfig, InMemoryCache, TokioJobQueue};
use std::sync::Arc;

#[derive(Debug, Parser)]
#[command(name = "geomonkey")]
#[command(about = "Geocode an address through a configured backend, with caching")]
struct Cli {
    /// Free-text address to geocode
    address: String,

    /// Path to the TOML configuration file
    #[arg(long, default_value = "geomonkey.toml")]
    config: String,

    /// Named geocoder to use instead of the configured default
    #[arg(long)]
    geocoder: Option<String>,

    /// Enable verbose output
    #[arg(long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    logger::init_cli_logger(cli.verbose);
    tracing::info!("Starting geomonkey CLI");
    if cli.verbose {
        tracing::debug!("CLI arguments: {:?}", cli);
    }

    let config = GeomonkeyConfig::from_toml_file(&cli.config)?;
    if let Err(e) = config.validate() {
        tracing::error!("Configuration validation failed: {}", e);
        eprintln!("invalid configuration: {}", e);
        std::process::exit(1);
    }

    let registry = GeocoderRegistry::from_config(
        &config,
        Arc::new(InMemoryCache::new()),
        Arc::new(TokioJobQueue::new()),
    )?;

    let mut geocoder = registry.resolve(cli.geocoder.as_deref())?;
    tracing::info!("Geocoding via \"{}\"", geocoder.name());

    match geocoder.geocode(&cli.address).await {
        Ok(result) => {
            println!("{}", result.qualified_address);
            println!("{}, {}", result.latitude, result.longitude);
        }
        Err(e) => {
            tracing::error!("Geocoding failed: {}", e);
            eprintln!("{}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
