//! Dataset Routes
//!
//! Raw passthrough of the read-only JSON artifacts.
//!
//! - GET /api/v1/datasets/:name

use axum::{
    extract::{Path, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// GET /api/v1/datasets/:name
///
/// Serves a known artifact as-is. An unknown name is a 404; a known but
/// missing file answers with JSON null so clients degrade gracefully.
pub async fn get_dataset(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> ApiResult<Json<serde_json::Value>> {
    state
        .datasets
        .raw(&name)
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("dataset {name}")))
}
