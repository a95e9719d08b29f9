//! NutriWatch API Server
//!
//! Run with: cargo run
//!
//! # Configuration
//!
//! Reads `config.toml` from the usual locations, then applies
//! environment overrides:
//! - `NUTRIWATCH_DATA_DIR`: Read-only dataset directory
//! - `NUTRIWATCH_STATE_DIR`: Durable state directory
//! - `NUTRIWATCH_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `NUTRIWATCH_API_PORT`: Port to listen on (default: 8090)
//! - `NUTRIWATCH_INFERENCE_URL`: Hosted prediction model base URL
//! - `NUTRIWATCH_LOG_LEVEL` / `NUTRIWATCH_LOG_FORMAT`: Logging

use anyhow::Context;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use nutriwatch::api::{serve, AppState};
use nutriwatch::config::Config;
use nutriwatch::datasets::DatasetCatalog;
use nutriwatch::inference::{InferenceClient, InferenceConfig};
use nutriwatch::store::{FileStore, PredictionHistory};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load_default();
    init_tracing(&config);

    tracing::info!("Starting NutriWatch API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data directory: {}", config.datasets.data_dir);
    tracing::info!("State directory: {}", config.store.state_dir);

    let store = Arc::new(FileStore::new(&config.store.state_dir));
    let history = Arc::new(
        PredictionHistory::load(store)
            .await
            .context("failed to load prediction history")?,
    );
    tracing::info!("Loaded {} stored predictions", history.len().await);

    let datasets = DatasetCatalog::new(&config.datasets.data_dir);
    if !datasets.any_available() {
        tracing::warn!("No dataset artifacts found; analytics endpoints will serve empty data");
    }

    let inference = Arc::new(
        InferenceClient::new(InferenceConfig {
            base_url: config.inference.base_url.clone(),
            request_timeout_ms: config.inference.request_timeout_ms,
            enabled: config.inference.enabled,
        })
        .context("failed to build inference client")?,
    );

    if config.inference.enabled {
        // hosted model deployments sleep when idle; nudge it early
        let wake_client = Arc::clone(&inference);
        tokio::spawn(async move {
            match wake_client.wake().await {
                Ok(()) => tracing::info!("Inference service is awake"),
                Err(e) => tracing::warn!(error = %e, "Inference service wake-up failed"),
            }
        });
    } else {
        tracing::info!("Remote inference disabled; heuristic assessment answers all requests");
    }

    let api_config = config.api.clone();
    let state = AppState::new(history, datasets, inference, config);

    serve(state, &api_config).await?;

    tracing::info!("NutriWatch API server stopped");
    Ok(())
}

/// Initialize the tracing subscriber from the logging config.
fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "nutriwatch={},tower_http=info",
            config.logging.level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);

    if config.logging.format == "json" {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}
