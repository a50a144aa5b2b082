use anyhow::Context;
use clap::Parser;
use route_overlap::{
    sdk::config::{OrsConfig, PlaceBackend, ProviderConfig},
    sdk::routing::{resolve_input, GeoPoint, NominatimProvider, OrsProvider, PlaceService},
    sdk::util::{
        log::init_logging,
        rate_limit::{nominatim_limiter, ors_limiter},
    },
    ProximityOverlap, RouteComparer,
};
use std::{fs, path::PathBuf, time::Duration};

/// Compare two driving routes: how much they overlap and where they meet
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Origin of the first route, as "lat,lon" or a place name to geocode
    #[arg(long)]
    origin_a: String,

    /// Destination of the first route
    #[arg(long)]
    destination_a: String,

    /// Origin of the second route
    #[arg(long)]
    origin_b: String,

    /// Destination of the second route
    #[arg(long)]
    destination_b: String,

    /// [Optional] Count points within this many metres as shared instead of exact matches
    #[arg(long)]
    tolerance_m: Option<f64>,

    /// [Optional] Write the comparison as JSON to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Log provider calls and pipeline stages
    #[arg(short, long)]
    verbose: bool,
}

async fn resolve(ors: &OrsProvider, label: &str, input: &str, timeout: Duration) -> anyhow::Result<GeoPoint> {
    resolve_input(ors, input, timeout)
        .await
        .with_context(|| format!("Could not resolve {} \"{}\"", label, input))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.verbose);

    // --- 1. Dependency Initialization ---
    let config = ProviderConfig::from_env().context("Invalid provider configuration")?;
    let timeout = config.request_timeout;
    let ors = match &config.ors {
        OrsConfig::Remote { api_key } => OrsProvider::remote(api_key.clone(), ors_limiter(), timeout)?,
        OrsConfig::Local { base_url } => OrsProvider::local(base_url.clone(), timeout)?,
    };
    let places = match config.places {
        PlaceBackend::Nominatim => PlaceService::Nominatim(NominatimProvider::new(
            config.nominatim_base_url.clone(),
            nominatim_limiter(),
            timeout,
        )?),
        PlaceBackend::Ors => PlaceService::Ors(ors.clone()),
    };

    // --- 2. Resolve inputs to coordinates ---
    let origin_a = resolve(&ors, "origin A", &cli.origin_a, timeout).await?;
    let destination_a = resolve(&ors, "destination A", &cli.destination_a, timeout).await?;
    let origin_b = resolve(&ors, "origin B", &cli.origin_b, timeout).await?;
    let destination_b = resolve(&ors, "destination B", &cli.destination_b, timeout).await?;

    // --- 3. Compare ---
    let mut comparer = RouteComparer::new(ors, places).with_call_timeout(timeout);
    if let Some(tolerance_m) = cli.tolerance_m.or(config.overlap_tolerance_m) {
        log::info!("Counting points within {} m as shared", tolerance_m);
        comparer = comparer.with_overlap_strategy(ProximityOverlap::new(tolerance_m));
    }

    let result = tokio::select! {
        result = comparer.compare(origin_a, destination_a, origin_b, destination_b) => result?,
        _ = tokio::signal::ctrl_c() => {
            log::warn!("Interrupted, abandoning comparison");
            return Ok(());
        }
    };

    // --- 4. Output Results ---
    log::info!("Overlap: {:.2}%", result.overlap.percentage);
    match (&result.entry_place, &result.exit_place) {
        (Some(entry), Some(exit)) => {
            log::info!("Entry intersection: {}", entry);
            log::info!("Exit intersection: {}", exit);
        }
        _ => log::info!("The routes never cross"),
    }

    let json_output = serde_json::to_string_pretty(&result)?;
    match cli.output {
        Some(path) => {
            fs::write(&path, json_output)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!("Comparison written to {}", path.display());
        }
        None => println!("{}", json_output),
    }

    Ok(())
}
