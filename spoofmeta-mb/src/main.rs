//! spoofmeta-mb - Metadata Builder
//!
//! Normalizes heterogeneous speech-anti-spoofing dataset layouts into one
//! unified metadata table: dispatches to a dataset adapter, attaches audio
//! metrics via the prober, validates the schema contract, and writes the
//! table as CSV.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use spoofmeta_mb::services::metadata_writer;
use spoofmeta_mb::{config, pipeline};

/// Command-line arguments for spoofmeta-mb
#[derive(Parser, Debug)]
#[command(name = "spoofmeta-mb")]
#[command(about = "Unified metadata builder for speech anti-spoofing datasets")]
#[command(version)]
struct Args {
    /// Path to the dataset YAML config
    #[arg(short, long, env = "SPOOFMETA_CONFIG")]
    config: PathBuf,

    /// Output CSV path
    #[arg(short, long, env = "SPOOFMETA_OUT")]
    out: PathBuf,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "spoofmeta_mb=info,spoofmeta_common=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    info!("Starting spoofmeta-mb (Metadata Builder)");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Config: {}", args.config.display());

    let config = config::load_config(&args.config)
        .with_context(|| format!("failed to load config {}", args.config.display()))?;

    let rows = pipeline::build_metadata(&config)?;
    metadata_writer::write_metadata_csv(&rows, &args.out)?;

    info!(rows = rows.len(), "metadata build complete");
    Ok(())
}
