//! # Ligainsider Lineups
//!
//! Scrapes the probable starting elevens for every fixture of the current
//! Bundesliga matchday and writes them to a single JSON document.
//!
//! ## Usage
//!
//! ```sh
//! ligainsider_lineups
//! ligainsider_lineups --output ./lineups.json --concurrency 5
//! RUST_LOG=debug ligainsider_lineups
//! ```
//!
//! ## Architecture
//!
//! The application follows a pipeline architecture:
//! 1. **Indexing**: Discover fixtures from the matchday overview page
//! 2. **Fetching**: Download every team page (parallel, 10 at a time)
//! 3. **Extraction**: Pull up to eleven probable starters from each page
//! 4. **Output**: Write the fixtures, in overview order, to JSON
//!
//! A team page that cannot be fetched or parsed only costs that team its
//! lineup. The run fails only if the overview page or the output file fails.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod aggregate;
mod cli;
mod config;
mod coordinator;
mod dom;
mod error;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use config::Config;
use fetch::HttpFetcher;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("ligainsider_lineups starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    let config = match Config::resolve(&args).await {
        Ok(config) => config,
        Err(e) => {
            error!(error = %e, "Invalid configuration");
            return Err(e.into());
        }
    };

    let fetcher = HttpFetcher::new(&config.user_agent)?;

    let summary = match pipeline::run(&config, &fetcher).await {
        Ok(summary) => summary,
        Err(e) => {
            error!(error = %e, "Lineup run failed");
            return Err(e.into());
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        matches = summary.matches,
        teams_with_lineup = summary.teams_with_lineup,
        teams = summary.teams,
        path = %summary.output_path.display(),
        "Execution complete"
    );

    Ok(())
}
