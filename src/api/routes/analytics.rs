//! Analytics Routes
//!
//! District and province aggregates computed over the read-only
//! dataset artifacts.
//!
//! - GET /api/v1/analytics/summary - District headline metrics
//! - GET /api/v1/analytics/provinces - Rate and risk averages
//! - GET /api/v1/analytics/hotspots?limit=k - Top-K districts by risk
//! - GET /api/v1/analytics/facility-matrix - Weekday x province visits
//! - GET /api/v1/analytics/policy-briefs - Curated policy brief view

use axum::{
    extract::{Query, State},
    Json,
};
use std::sync::Arc;

use crate::analytics;
use crate::api::dto::{
    DistrictSummaryResponse, FacilityMatrixResponse, HotspotParams, ProvincesResponse,
};
use crate::api::state::AppState;
use crate::datasets::policy_brief_view;
use crate::model::{DistrictAnalytics, PolicyBrief};

const DEFAULT_HOTSPOT_LIMIT: usize = 5;

/// GET /api/v1/analytics/summary
pub async fn district_summary(
    State(state): State<Arc<AppState>>,
) -> Json<DistrictSummaryResponse> {
    let districts = state.datasets.district_analytics();

    Json(DistrictSummaryResponse {
        total_districts: districts.len(),
        average_risk: analytics::average_risk(&districts),
        critical_count: analytics::critical_count(&districts),
        hotspots: analytics::hotspot_counts(&districts),
        recommendations: analytics::recommendation_counts(&districts),
    })
}

/// GET /api/v1/analytics/provinces
pub async fn province_averages(
    State(state): State<Arc<AppState>>,
) -> Json<ProvincesResponse> {
    let districts = state.datasets.district_analytics();
    let summaries = state.datasets.province_summary();

    Json(ProvincesResponse {
        rates: analytics::province_rate_averages(&districts),
        risk: analytics::province_risk_averages(&districts, &summaries),
    })
}

/// GET /api/v1/analytics/hotspots
///
/// The precomputed hotspot ranking when available, otherwise the
/// ranking is derived from the district analytics rows.
pub async fn top_hotspots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<HotspotParams>,
) -> Json<Vec<DistrictAnalytics>> {
    let limit = params.limit.unwrap_or(DEFAULT_HOTSPOT_LIMIT);

    let ranked = state.datasets.top_hotspots();
    let source = if ranked.is_empty() {
        state.datasets.district_analytics()
    } else {
        ranked
    };

    Json(analytics::top_risk_districts(&source, limit))
}

/// GET /api/v1/analytics/facility-matrix
pub async fn facility_matrix(
    State(state): State<Arc<AppState>>,
) -> Json<FacilityMatrixResponse> {
    let rows = state.datasets.child_survey();
    let matrix = analytics::facility_matrix(&rows);

    let colors = matrix
        .counts
        .iter()
        .map(|row| {
            row.iter()
                .map(|&count| analytics::heat_color(count, matrix.max_count))
                .collect()
        })
        .collect();

    Json(FacilityMatrixResponse {
        weekdays: matrix.weekdays,
        provinces: matrix.provinces,
        counts: matrix.counts,
        colors,
        max_count: matrix.max_count,
    })
}

/// GET /api/v1/analytics/policy-briefs
pub async fn policy_briefs(State(state): State<Arc<AppState>>) -> Json<Vec<PolicyBrief>> {
    let briefs = state.datasets.policy_briefs();
    Json(policy_brief_view(&briefs))
}
