//! Application setup and initialization
//!
//! All application initialization logic lives here rather than in main.rs,
//! so integration tests can build the same app against their own resources.

pub mod database;
pub mod routes;
pub mod server;
pub mod telemetry;

use crate::state::AppState;
use anyhow::{Context, Result};
use linktrend_core::Config;
use linktrend_processing::VideoProbe;
use std::sync::Arc;

/// Initialize the entire application
pub async fn initialize_app(config: Config) -> Result<(Arc<AppState>, axum::Router)> {
    telemetry::init_telemetry();

    tracing::info!("Configuration loaded");

    let pool = database::setup_database(&config).await?;

    let storage = linktrend_storage::create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let probe =
        VideoProbe::new(config.ffprobe_path.clone()).context("Invalid ffprobe configuration")?;

    let state = Arc::new(AppState::new(pool, storage, probe, config.clone()));

    let router = routes::setup_routes(&config, state.clone())?;

    Ok((state, router))
}
