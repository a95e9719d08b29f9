//! Prediction and district report exports.
//!
//! CSV output goes through the `csv` writer so embedded commas, quotes,
//! and newlines are escaped per RFC 4180.

use thiserror::Error;

use crate::model::{DistrictAnalytics, PredictionRecord};

const PREDICTION_HEADER: [&str; 12] = [
    "ID",
    "Child Age",
    "Region",
    "Risk Category",
    "Probability",
    "Confidence",
    "Date",
    "Household Income",
    "Food Insecurity",
    "Water Access",
    "Sanitation Access",
    "Education Level",
];

const DISTRICT_HEADER: [&str; 8] = [
    "District",
    "Province",
    "Stunting_Rate",
    "Wasting_Rate",
    "Underweight_Rate",
    "RiskScore",
    "Hotspot",
    "Recommendations",
];

/// Errors from building an export payload.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("csv encoding failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("export buffer was not valid utf-8")]
    Encoding,
}

/// Render the prediction history as CSV, one line per record plus the
/// header.
pub fn predictions_csv(records: &[PredictionRecord]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(PREDICTION_HEADER)?;

    for record in records {
        writer.write_record(&[
            record.id.clone(),
            record.child_age.to_string(),
            record.region.clone(),
            record.risk_category.as_str().to_string(),
            record.probability.to_string(),
            record.confidence.to_string(),
            record.created_at.to_rfc3339(),
            record.input.household_income.to_string(),
            record.input.food_insecurity.to_string(),
            record.input.water_access.to_string(),
            record.input.sanitation_access.to_string(),
            record.input.education_level.as_str().to_string(),
        ])?;
    }

    finish(writer)
}

/// Render the prediction history as a pretty-printed JSON array.
pub fn predictions_json(records: &[PredictionRecord]) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Render district analytics rows as a CSV report. Recommendation lists
/// collapse into one semicolon-joined cell.
pub fn district_report_csv(districts: &[DistrictAnalytics]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(DISTRICT_HEADER)?;

    for d in districts {
        writer.write_record(&[
            d.district.clone(),
            d.province.clone(),
            d.stunting_rate.to_string(),
            d.wasting_rate.to_string(),
            d.underweight_rate.to_string(),
            d.risk_score.map(|s| s.to_string()).unwrap_or_default(),
            d.hotspot.clone().unwrap_or_default(),
            d.recommendations.join("; "),
        ])?;
    }

    finish(writer)
}

fn finish(writer: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let bytes = writer.into_inner().map_err(|_| ExportError::Encoding)?;
    String::from_utf8(bytes).map_err(|_| ExportError::Encoding)
}
