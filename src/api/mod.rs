//! NutriWatch REST API
//!
//! HTTP API layer for NutriWatch, built with Axum.
//!
//! # Endpoints
//!
//! ## Predictions
//! - `POST /api/v1/predictions` - Run a prediction and store the record
//! - `GET /api/v1/predictions` - List stored records
//! - `DELETE /api/v1/predictions/:id` - Remove a record
//! - `GET /api/v1/predictions/export` - Download the history (csv/json)
//! - `GET /api/v1/predictions/analysis` - Aggregation bundle
//!
//! ## Analytics
//! - `GET /api/v1/analytics/summary` - District headline metrics
//! - `GET /api/v1/analytics/provinces` - Rate and risk averages
//! - `GET /api/v1/analytics/hotspots` - Top-K districts by risk
//! - `GET /api/v1/analytics/facility-matrix` - Weekday x province visits
//! - `GET /api/v1/analytics/policy-briefs` - Curated policy brief view
//! - `GET /api/v1/analytics/export` - District report download (csv)
//!
//! ## Datasets
//! - `GET /api/v1/datasets/:name` - Raw artifact passthrough
//!
//! ## Activity
//! - `GET /api/v1/activity` - Activity log
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! ## WebSocket
//! - `GET /api/v1/ws` - Notice stream

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;
pub mod ws;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::ApiConfig;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        // Prediction routes
        .route("/predictions", post(routes::predictions::create_prediction))
        .route("/predictions", get(routes::predictions::list_predictions))
        .route("/predictions/export", get(routes::export::export_predictions))
        .route("/predictions/analysis", get(routes::predictions::prediction_analysis))
        .route("/predictions/:id", delete(routes::predictions::delete_prediction))
        // Analytics routes
        .route("/analytics/summary", get(routes::analytics::district_summary))
        .route("/analytics/provinces", get(routes::analytics::province_averages))
        .route("/analytics/hotspots", get(routes::analytics::top_hotspots))
        .route("/analytics/facility-matrix", get(routes::analytics::facility_matrix))
        .route("/analytics/policy-briefs", get(routes::analytics::policy_briefs))
        .route("/analytics/export", get(routes::export::export_district_report))
        // Dataset routes
        .route("/datasets/:name", get(routes::datasets::get_dataset))
        // Activity log
        .route("/activity", get(routes::predictions::activity_log))
        // WebSocket route
        .route("/ws", get(ws::notice_stream));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()) // Configure properly in production
        .with_state(shared_state)
}

/// Start the API server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("NutriWatch API listening on {}", addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("NutriWatch API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
