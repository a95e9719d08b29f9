//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (ready to serve traffic)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;

/// GET /health/live
///
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Returns 200 once the history has been loaded. The service answers
/// even with an empty data directory, so datasets are not gated on.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    // the history is loaded before the router is built
    let _ = state.history.len().await;
    StatusCode::OK
}

/// GET /health
///
/// Full health status with component details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let datasets_ok = state.datasets.any_available();

    let datasets_status = if datasets_ok { "ok" } else { "missing" };
    let overall_status = if datasets_ok { "healthy" } else { "degraded" };

    Json(HealthResponse {
        status: overall_status.to_string(),
        datasets: datasets_status.to_string(),
        history_size: state.history.len().await,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
