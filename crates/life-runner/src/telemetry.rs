//! Tracing subscriber setup for the runner.

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Set to `json` for structured log lines.
const LOG_FORMAT_ENV: &str = "LIFE_LOG_FORMAT";

pub fn init_telemetry() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,life_runner=debug,life_world=debug".into());

    let json = std::env::var(LOG_FORMAT_ENV)
        .map(|format| format.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the rendered grids.
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .try_init()?;
    } else {
        registry
            .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
            .try_init()?;
    }

    info!("Telemetry initialized");
    Ok(())
}
