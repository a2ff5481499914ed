//! `fission serve` command.

use anyhow::Result;
use std::sync::Arc;

use fission::api::{start_server, AppState};
use fission::config::Config;

use super::build_generator;

/// Start the HTTP API server and block until it exits.
pub(crate) async fn cmd_serve(mut config: Config, port: Option<u16>) -> Result<()> {
    if let Some(port) = port {
        config.server.port = port;
    }

    let generator = build_generator(&config)?;
    tracing::info!(
        llm_available = generator.is_available(),
        provider = generator.provider_name().unwrap_or("none"),
        cache_dir = %generator.cache().location().display(),
        "Starting Fission API"
    );

    let state = AppState::new(Arc::new(generator));
    start_server(&config.server, state)
        .await
        .map_err(|e| anyhow::anyhow!("API server error: {}", e))?;
    Ok(())
}
