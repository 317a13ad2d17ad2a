//! Read-only HTTP API over a dataset of preverb usages in Latin texts
//!
//! The dataset is a CSV table with one row per attested preverb-verb
//! combination. It is loaded once at startup, then served as preverb lists,
//! per-preverb usage statistics, per-meaning occurrence listings, and raw
//! paginated records.

mod api;
mod config;
mod dataset;
mod progress;
mod stats;
mod table;

use crate::{config::Config, progress::ProgressReport};
use anyhow::Context;
use clap::Parser;
use log::LevelFilter;
use std::{net::SocketAddr, num::NonZeroU32};
use tokio::net::TcpListener;

/// Serve statistics about Latin preverbs over HTTP
///
/// The dataset is fully loaded before the server starts listening, and any
/// problem with it aborts startup.
#[derive(Parser, Debug)]
#[command(version, author)]
struct Args {
    /// Location of the CSV dataset
    ///
    /// Can be a local path or an http(s) URL. Files whose name ends with
    /// ".gz" are decompressed on the fly.
    #[arg(short, long, default_value = "data/LG_preverbs.csv")]
    data: Box<str>,

    /// Address to listen on
    #[arg(short, long, default_value = "127.0.0.1:5000")]
    bind: SocketAddr,

    /// Language of the dataset rows that should be served
    ///
    /// The dataset covers several languages, but the API only exposes one
    /// of them. Rows from other languages are dropped at load time.
    #[arg(short, long, default_value = "Latin")]
    language: Box<str>,

    /// Number of records per page of the raw dataset, when the client does
    /// not ask for a specific page size
    #[arg(long, default_value = "50")]
    per_page: NonZeroU32,
}
//
impl Args {
    /// Decode and validate CLI arguments
    pub fn parse_and_check() -> Result<Self> {
        // Decode CLI arguments
        let args = Args::parse();

        // Check CLI arguments for basic sanity
        anyhow::ensure!(!args.data.trim().is_empty(), "no dataset location was given");
        anyhow::ensure!(
            !args.language.trim().is_empty(),
            "requested language is empty, this would exclude every dataset row"
        );
        Ok(args)
    }
}
//
#[tokio::main]
async fn main() -> Result<()> {
    // Set up logging
    if let Err(e) = setup_logging() {
        eprintln!("Failed to set up syslog logging, proceeding without logs: {e}");
    }

    // Decode CLI arguments
    let args = Args::parse_and_check()?;
    let config = Config::new(args);

    // Load the dataset before accepting any request
    log::info!("Loading dataset from {}", config.source);
    let report = ProgressReport::new();
    let dataset = table::load(&config, &report).await?;
    if dataset.is_empty() {
        log::warn!(
            "No {} record found in {}, all queries will come back empty",
            config.input.language,
            config.source
        );
    } else {
        log::info!("Loaded {} {} records", dataset.len(), config.input.language);
    }

    // Serve the API
    let app = api::router(dataset, &config);
    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("binding to {}", config.bind))?;
    log::info!("Serving the preverb API on {}", config.bind);
    axum::serve(listener, app)
        .await
        .context("serving HTTP requests")?;
    Ok(())
}

/// Use anyhow for Result type erasure
pub use anyhow::Result;

/// Set up logging
fn setup_logging() -> syslog::Result<()> {
    syslog::init(
        syslog::Facility::LOG_USER,
        if cfg!(feature = "log-trace") {
            LevelFilter::Trace
        } else if cfg!(debug_assertions) {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        },
        Some(env!("CARGO_PKG_NAME")),
    )
}
