//! Realized price fetcher - Entry Point
//!
//! Fetches the realized price series once, normalizes it and writes
//! `data/realized-price.json`. Exits non-zero on any failure.

use anyhow::Result;
use clap::Parser;
use rp_core::SeriesLayout;
use rp_fetcher::{AppConfig, Application};
use std::path::PathBuf;
use tracing::info;

/// Fetch the realized price series and write it as JSON.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via RP_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Output file path (overrides output.path)
    #[arg(short, long)]
    output: Option<String>,

    /// Output layout: records, columnar or last_column (overrides normalize.layout)
    #[arg(short, long)]
    layout: Option<SeriesLayout>,

    /// Normalize a captured response body from disk instead of calling the API
    #[arg(short, long)]
    input: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    rp_telemetry::init_logging()?;

    info!("Starting realized price fetcher v{}", env!("CARGO_PKG_VERSION"));

    let mut config = AppConfig::load(args.config.as_deref())?;
    if let Some(output) = args.output {
        config.output.path = output;
    }
    if let Some(layout) = args.layout {
        config.normalize.layout = layout;
    }
    info!(
        endpoint = %config.api.endpoint,
        layout = %config.normalize.layout,
        output = %config.output.path,
        "Configuration loaded"
    );

    let app = Application::new(config)?;

    let summary = match args.input {
        Some(input) => app.replay(&input)?,
        None => app.run().await?,
    };

    info!(
        records = summary.records,
        path = %summary.path.display(),
        "Done"
    );

    Ok(())
}
