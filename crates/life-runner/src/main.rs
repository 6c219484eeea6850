//! Runs a Game of Life simulation and prints every generation.

mod telemetry;

use anyhow::{Context, Result};
use life_core::RunConfig;
use life_world::Simulation;
use std::io::{self, Write};
use tracing::info;

/// Path of an optional JSON run configuration.
const CONFIG_ENV: &str = "LIFE_CONFIG";

fn main() -> Result<()> {
    telemetry::init_telemetry()?;

    let config = load_config()?;
    info!(
        rows = config.world.rows,
        cols = config.world.cols,
        generations = config.generations,
        "Starting Game of Life runner"
    );

    let mut simulation = Simulation::new(config)?;

    let mut out = io::stdout().lock();
    let mut written: io::Result<()> = Ok(());
    let result = simulation.run_with(|_, world| {
        if written.is_ok() {
            written = write!(out, "{}", world);
        }
    });
    written.context("Failed to write world to stdout")?;
    out.flush()?;

    info!(result = %serde_json::to_string(&result)?, "Run finished");
    Ok(())
}

fn load_config() -> Result<RunConfig> {
    match std::env::var(CONFIG_ENV) {
        Ok(path) => {
            info!("Loading configuration from {}", path);
            RunConfig::load(&path).with_context(|| format!("Failed to load config from {}", path))
        }
        Err(_) => Ok(RunConfig::default()),
    }
}
