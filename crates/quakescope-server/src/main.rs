//! Quakescope prediction server entry point.
//!
//! Loads configuration from the environment, loads the earthquake catalog,
//! configures the generation backend, and serves the prediction API until
//! shut down.
//!
//! # Architecture
//!
//! ```text
//! POST /predict --> ProximityFilter (catalog) --> summary --> prompt --> LLM --> JSON
//! ```

use anyhow::Context;
use quakescope_server::{LogFormat, ServiceConfig, prepare_state, start_server};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point.
///
/// Refuses to start when the generation API key is missing.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = ServiceConfig::from_env().context("failed to load configuration")?;

    init_tracing(config.log_format);
    info!("quakescope-server starting");
    info!(
        host = %config.server.host,
        port = config.server.port,
        dataset = %config.dataset_path.display(),
        backend = ?config.generation.backend_type,
        model = %config.generation.model,
        "configuration loaded"
    );

    let state = prepare_state(&config)
        .await
        .context("failed to prepare service state")?;

    start_server(&config.server, state)
        .await
        .context("server exited with error")?;

    Ok(())
}

/// Initialize structured logging.
fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true);

    match format {
        LogFormat::Pretty => builder.init(),
        LogFormat::Json => builder.json().init(),
    }
}
