//! WSI Patcher - batch patch extraction for Whole Slide Images.
//!
//! This binary wires configuration, logging, the decode engine, and the
//! patch pipeline together.

use std::fs::OpenOptions;
use std::process::ExitCode;
use std::sync::Mutex;

use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use wsi_patcher::{Config, DecodeEngine, PatchPipeline};

fn main() -> ExitCode {
    let config = Config::parse();

    // Logging first: configuration errors must reach the persistent log.
    if let Err(e) = init_logging(&config) {
        eprintln!("Failed to initialize logging: {}", e);
        return ExitCode::FAILURE;
    }

    println!(
        "Starting wsi-patcher, check {} for progress...",
        config.log_file.display()
    );

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    info!("Configuration:");
    info!("  Slide dir: {}", config.slide_dir.display());
    info!("  Patch dir: {}", config.patch_dir.display());
    info!(
        "  Patch geometry: {}x{} with overlap {} (step {})",
        config.patch_dim,
        config.patch_dim,
        config.overlap,
        config.step()
    );
    info!("  Series: {}", config.series);
    if config.no_patch {
        info!("  Patching disabled, previews only");
    }
    if config.jpg_wsi {
        info!("  Previews: {}", config.jpg_dir.display());
    }

    // Engine lifecycle spans the whole run: initialized here, once, and
    // released when the pipeline is dropped after the last slide.
    let engine = match DecodeEngine::init(config.max_decode_bytes) {
        Ok(engine) => engine,
        Err(e) => {
            error!("Decode engine initialization failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let pipeline = PatchPipeline::new(engine, config.clone());

    let slides = match pipeline.discover_slides() {
        Ok(slides) => slides,
        Err(e) => {
            error!(
                "Failed to list slides in {}: {}",
                config.slide_dir.display(),
                e
            );
            return ExitCode::FAILURE;
        }
    };

    if slides.is_empty() {
        warn!("No slides found in {}", config.slide_dir.display());
    }
    info!("Launching run on {} slide(s)", slides.len());

    let manifest = pipeline.run(&slides);

    info!("Run finished, {} patches generated", manifest.total());
    println!("Successfully generated {} patches!", manifest.total());

    ExitCode::SUCCESS
}

/// Initialize the tracing/logging subsystem.
///
/// Two layers: human-readable console output, plus an append-only
/// timestamped file layer on the configured log path. Recoverable errors
/// during the run are logged there and never silently dropped.
fn init_logging(config: &Config) -> Result<(), String> {
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&config.log_file)
        .map_err(|e| format!("cannot open log file {}: {}", config.log_file.display(), e))?;

    let default_filter = if config.verbose {
        "wsi_patcher=debug"
    } else {
        "wsi_patcher=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_writer(Mutex::new(log_file)),
        )
        .init();

    Ok(())
}
