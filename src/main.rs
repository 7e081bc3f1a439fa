//! # Wiki Neighbourhoods
//!
//! Collects every place linked from a Wikipedia list page (by default the
//! list of neighbourhoods in Hyderabad) and writes their coordinates,
//! administrative details and images to a JSON file.
//!
//! ## Usage
//!
//! ```sh
//! wiki_neighbourhoods -o neighborhoods_data_ss.json
//! ```
//!
//! ## Architecture
//!
//! The run is a single sequential pipeline:
//! 1. **Indexing**: read the list page and pair each place link with its section heading
//! 2. **Fetching**: download each place article, one at a time, in list order
//! 3. **Extraction**: pull name, coordinates, infobox rows and images into a record
//! 4. **Output**: write all records as one JSON array
//!
//! Places without coordinates or whose page cannot be fetched are skipped.
//! Failing to fetch the list page ends the run without writing output.

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod coordinates;
mod fetch;
mod models;
mod outputs;
mod scrapers;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use outputs::json;
use utils::ensure_writable_parent;

#[tokio::main]
#[instrument]
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
    info!("wiki_neighbourhoods starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");

    // Fail before scraping if the output can't be written
    if let Err(e) = ensure_writable_parent(&args.output).await {
        error!(
            path = %args.output.display(),
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let fetcher = HttpFetcher::new()?;

    let places = match scrapers::list::walk(&fetcher, &args.list_url, &args.base_url).await {
        Ok(places) => places,
        Err(e) => {
            error!(url = %args.list_url, error = %e, "Failed to scrape list page");
            return Err(e);
        }
    };

    if let Err(e) = json::write_places(&places, &args.output).await {
        error!(path = %args.output.display(), error = %e, "Failed to write JSON");
        return Err(e);
    }
    info!(
        path = %args.output.display(),
        total = places.len(),
        "All places saved"
    );

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
