// src/main.rs

use std::io::{self, BufWriter};

use anyhow::Context;
use clap::Parser;
use log::info;

use sign_raster::cli::Cli;
use sign_raster::{render, RenderConfig};

fn main() -> anyhow::Result<()> {
    // Malformed sizes exit with usage before anything else runs.
    let cli = Cli::parse();

    // Logs go to stderr; stdout carries the bitmap.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_micros()
        .init();

    let config = RenderConfig::load().context("Failed to load render config")?;
    let size = match cli.size {
        Some(size) => size,
        None => {
            info!("No size given, using configured size {}", config.size);
            config.size
        }
    };

    let evaluator = config.build_evaluator();
    info!(
        "Rendering {:?} at {}x{} with stride {}",
        config.evaluator, size, size, config.stride
    );

    let stdout = io::stdout().lock();
    let summary = render(&evaluator, size, BufWriter::new(stdout))
        .with_context(|| format!("Failed to render {}x{} bitmap", size, size))?;

    info!(
        "Done: {} rows, {} x calls, {} y calls, {} xy calls",
        summary.rows, summary.x_calls, summary.y_calls, summary.xy_calls
    );
    Ok(())
}
