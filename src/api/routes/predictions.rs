//! Prediction Routes
//!
//! - POST /api/v1/predictions - Run a prediction and store the record
//! - GET /api/v1/predictions - List stored records
//! - DELETE /api/v1/predictions/:id - Remove a record
//! - GET /api/v1/predictions/analysis - Aggregation bundle
//! - GET /api/v1/activity - Activity log

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;

use crate::analytics;
use crate::api::dto::{AnalysisResponse, PredictionResponse};
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::events::Notice;
use crate::inference::resolve_prediction;
use crate::model::{PredictionInput, PredictionRecord};
use crate::store::ActivityEntry;

/// POST /api/v1/predictions
///
/// Calls the remote model and falls back to the heuristic assessment
/// when it is disabled or unreachable. The record is stored either way;
/// a degraded answer carries a warning instead of an error.
pub async fn create_prediction(
    State(state): State<Arc<AppState>>,
    Json(input): Json<PredictionInput>,
) -> ApiResult<(StatusCode, Json<PredictionResponse>)> {
    if input.region.trim().is_empty() {
        return Err(ApiError::Validation("region must not be empty".to_string()));
    }

    state.hub.publish(Notice::PredictionWait {
        url: state.inference.config().base_url.clone(),
    });

    let (remote, warning) = match state.inference.predict(&input).await {
        Ok(remote) => (Some(remote), None),
        Err(e) => {
            tracing::warn!(error = %e, "remote inference failed, using heuristic assessment");
            (
                None,
                Some(
                    "Prediction service unreachable; heuristic assessment used".to_string(),
                ),
            )
        }
    };

    let record = resolve_prediction(&input, remote);
    state.history.append(record.clone()).await?;

    state.hub.publish(Notice::PredictionCreated {
        id: record.id.clone(),
        region: record.region.clone(),
        category: record.risk_category,
    });

    tracing::info!(
        id = %record.id,
        region = %record.region,
        category = record.risk_category.as_str(),
        probability = record.probability,
        "prediction stored"
    );

    Ok((
        StatusCode::CREATED,
        Json(PredictionResponse { record, warning }),
    ))
}

/// GET /api/v1/predictions
pub async fn list_predictions(
    State(state): State<Arc<AppState>>,
) -> Json<Vec<PredictionRecord>> {
    Json(state.history.records().await)
}

/// DELETE /api/v1/predictions/:id
pub async fn delete_prediction(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    if state.history.delete(&id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::NotFound(format!("prediction {id}")))
    }
}

/// GET /api/v1/predictions/analysis
///
/// The full chart-ready aggregation bundle over the stored history.
pub async fn prediction_analysis(
    State(state): State<Arc<AppState>>,
) -> Json<AnalysisResponse> {
    let records = state.history.records().await;

    Json(AnalysisResponse {
        categories: analytics::risk_category_counts(&records),
        regions: analytics::region_risk_table(&records),
        timeline: analytics::timeline(&records),
        education: analytics::education_risk_table(&records),
        household_sizes: analytics::household_size_table(&records),
        income: analytics::income_risk_points(&records),
        food_insecurity: analytics::food_insecurity_levels(&records),
        water_sanitation: analytics::water_sanitation_quadrants(&records),
        age_groups: analytics::age_distribution(&records),
        metrics: analytics::headline_metrics(&records),
    })
}

/// GET /api/v1/activity
pub async fn activity_log(State(state): State<Arc<AppState>>) -> Json<Vec<ActivityEntry>> {
    Json(state.history.activity().await)
}
