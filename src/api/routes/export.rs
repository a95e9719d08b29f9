//! Export Routes
//!
//! Prediction history and district report downloads for offline
//! analysis.
//!
//! - GET /api/v1/predictions/export?format=csv|json
//! - GET /api/v1/analytics/export

use axum::{
    body::Body,
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use std::sync::Arc;

use crate::api::dto::ExportParams;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::events::Notice;
use crate::export;
use crate::store::ActivityKind;

/// GET /api/v1/predictions/export
///
/// Renders the stored history as an attachment download.
pub async fn export_predictions(
    State(state): State<Arc<AppState>>,
    Query(params): Query<ExportParams>,
) -> ApiResult<Response> {
    let records = state.history.records().await;
    let format = params.format.to_lowercase();

    let (body, content_type, extension) = match format.as_str() {
        "csv" => (export::predictions_csv(&records)?, "text/csv", "csv"),
        "json" => (
            export::predictions_json(&records)?,
            "application/json",
            "json",
        ),
        other => {
            return Err(ApiError::Validation(format!(
                "unsupported export format: {other}"
            )))
        }
    };

    state
        .history
        .log(
            format!("Exported {} predictions as {}", records.len(), extension),
            ActivityKind::Export,
        )
        .await?;

    state.hub.publish(Notice::ExportCompleted {
        format: extension.to_string(),
        count: records.len(),
    });

    let filename = format!(
        "nutriwatch_predictions_{}.{}",
        Utc::now().format("%Y%m%d_%H%M%S"),
        extension
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}

/// GET /api/v1/analytics/export
///
/// District analytics report as a CSV download.
pub async fn export_district_report(
    State(state): State<Arc<AppState>>,
) -> ApiResult<Response> {
    let districts = state.datasets.district_analytics();
    let body = export::district_report_csv(&districts)?;

    let filename = format!(
        "nutriwatch_districts_{}.csv",
        Utc::now().format("%Y%m%d_%H%M%S")
    );

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        Body::from(body),
    )
        .into_response())
}
