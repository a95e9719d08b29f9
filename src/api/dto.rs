//! API Data Transfer Objects
//!
//! Request parameter and response body types for the HTTP layer.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::analytics::{
    AgeBandRow, CategoryCount, FoodInsecurityRow, HeadlineMetrics, IncomeRiskPoint,
    ProvinceRates, ProvinceRisk, QuadrantCount, RiskBreakdownRow, SizeRiskRow, TimelineBucket,
};
use crate::model::PredictionRecord;

// ============================================
// Request parameters
// ============================================

/// Query parameters for GET /predictions/export
#[derive(Debug, Deserialize)]
pub struct ExportParams {
    #[serde(default = "default_export_format")]
    pub format: String,
}

fn default_export_format() -> String {
    "csv".to_string()
}

/// Query parameters for GET /analytics/hotspots
#[derive(Debug, Deserialize)]
pub struct HotspotParams {
    pub limit: Option<usize>,
}

// ============================================
// Response bodies
// ============================================

/// Response for POST /predictions
#[derive(Debug, Serialize)]
pub struct PredictionResponse {
    pub record: PredictionRecord,
    /// Set when the remote model was unreachable and the heuristic
    /// assessment answered instead.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub warning: Option<String>,
}

/// Full prediction-level aggregation bundle (GET /predictions/analysis)
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub categories: Vec<CategoryCount>,
    pub regions: Vec<RiskBreakdownRow>,
    pub timeline: Vec<TimelineBucket>,
    pub education: Vec<RiskBreakdownRow>,
    pub household_sizes: Vec<SizeRiskRow>,
    pub income: Vec<IncomeRiskPoint>,
    pub food_insecurity: Vec<FoodInsecurityRow>,
    pub water_sanitation: Vec<QuadrantCount>,
    pub age_groups: Vec<AgeBandRow>,
    pub metrics: HeadlineMetrics,
}

/// District headline metrics (GET /analytics/summary)
#[derive(Debug, Serialize)]
pub struct DistrictSummaryResponse {
    pub total_districts: usize,
    pub average_risk: Option<f64>,
    pub critical_count: usize,
    pub hotspots: HashMap<String, usize>,
    pub recommendations: HashMap<String, usize>,
}

/// Province-level averages (GET /analytics/provinces)
#[derive(Debug, Serialize)]
pub struct ProvincesResponse {
    pub rates: Vec<ProvinceRates>,
    pub risk: Vec<ProvinceRisk>,
}

/// Facility-visit heat matrix with render colors
/// (GET /analytics/facility-matrix)
#[derive(Debug, Serialize)]
pub struct FacilityMatrixResponse {
    pub weekdays: Vec<&'static str>,
    pub provinces: Vec<String>,
    pub counts: Vec<Vec<usize>>,
    pub colors: Vec<Vec<String>>,
    pub max_count: usize,
}

/// Full health status (GET /health)
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub datasets: String,
    pub history_size: usize,
    pub uptime_seconds: u64,
    pub version: String,
}
