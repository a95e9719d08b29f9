//! Domain Model
//!
//! Core types shared across scoring, analytics, and the API:
//! prediction inputs and records, district/province analytics rows,
//! and lenient deserialization helpers for duck-typed source JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

// ============================================
// Prediction types
// ============================================

/// Household and child attributes submitted for a risk prediction.
///
/// Field names match the wire format accepted by the inference endpoint.
/// Binary factors are 0/1 integers, mirroring the survey encoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionInput {
    #[serde(deserialize_with = "lenient_f64", default)]
    pub age_months: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub household_income: f64,
    #[serde(deserialize_with = "lenient_f64", default = "one")]
    pub family_size: f64,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub food_insecurity: f64,
    #[serde(default)]
    pub breastfeeding: u8,
    #[serde(default)]
    pub vaccination_complete: u8,
    #[serde(default)]
    pub diarrhea_last_week: u8,
    #[serde(default)]
    pub clean_water_access: u8,
    #[serde(default)]
    pub improved_sanitation: u8,
    #[serde(deserialize_with = "lenient_f64", default)]
    pub stunting_risk_score: f64,
    pub rural_urban: Settlement,
    pub region: String,
    pub mother_education: EducationLevel,
}

fn one() -> f64 {
    1.0
}

/// Rural or urban residence category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Settlement {
    Rural,
    Urban,
}

/// Mother's education level, ordinal from none to higher education.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EducationLevel {
    None,
    Primary,
    Secondary,
    Higher,
}

impl EducationLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EducationLevel::None => "None",
            EducationLevel::Primary => "Primary",
            EducationLevel::Secondary => "Secondary",
            EducationLevel::Higher => "Higher",
        }
    }
}

/// Risk classification derived from a probability score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Classify a probability (0-100) using the fixed thresholds:
    /// >= 70 is High, >= 40 is Medium, everything below is Low.
    pub fn from_probability(probability: f64) -> Self {
        if probability >= 70.0 {
            RiskCategory::High
        } else if probability >= 40.0 {
            RiskCategory::Medium
        } else {
            RiskCategory::Low
        }
    }

    /// Parse a category label from a remote response. Only the exact
    /// Low/Medium/High labels are accepted; anything else is rejected so
    /// the locally derived category stands.
    pub fn parse(label: &str) -> Option<Self> {
        match label {
            "Low" => Some(RiskCategory::Low),
            "Medium" => Some(RiskCategory::Medium),
            "High" => Some(RiskCategory::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low",
            RiskCategory::Medium => "Medium",
            RiskCategory::High => "High",
        }
    }
}

/// Snapshot of the input fields echoed into a stored prediction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputEcho {
    pub household_income: f64,
    pub food_insecurity: f64,
    pub water_access: u8,
    pub sanitation_access: u8,
    pub education_level: EducationLevel,
    pub region: String,
    pub household_size: f64,
}

impl From<&PredictionInput> for InputEcho {
    fn from(input: &PredictionInput) -> Self {
        Self {
            household_income: input.household_income,
            food_insecurity: input.food_insecurity,
            water_access: input.clean_water_access,
            sanitation_access: input.improved_sanitation,
            education_level: input.mother_education,
            region: input.region.clone(),
            household_size: input.family_size,
        }
    }
}

/// A completed prediction. Created once per submission, never mutated,
/// deletable by id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictionRecord {
    pub id: String,
    pub child_age: f64,
    pub region: String,
    pub risk_category: RiskCategory,
    /// Risk probability in percent, rounded to one decimal.
    pub probability: f64,
    /// Model confidence in percent, rounded to one decimal.
    pub confidence: f64,
    pub notes: String,
    pub created_at: DateTime<Utc>,
    pub input: InputEcho,
}

// ============================================
// District / province analytics rows
// ============================================

/// Precomputed per-district analytics supplied as read-only JSON.
///
/// Source files are duck-typed; numeric fields may arrive as numbers,
/// numeric strings, or null, so deserialization is lenient throughout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistrictAnalytics {
    #[serde(rename = "District", default)]
    pub district: String,
    #[serde(rename = "Province", default)]
    pub province: String,
    #[serde(rename = "Stunting_Rate", deserialize_with = "lenient_f64", default)]
    pub stunting_rate: f64,
    #[serde(rename = "Wasting_Rate", deserialize_with = "lenient_f64", default)]
    pub wasting_rate: f64,
    #[serde(rename = "Underweight_Rate", deserialize_with = "lenient_f64", default)]
    pub underweight_rate: f64,
    #[serde(rename = "RiskScore", deserialize_with = "lenient_opt_f64", default)]
    pub risk_score: Option<f64>,
    #[serde(rename = "Hotspot", default)]
    pub hotspot: Option<String>,
    #[serde(rename = "Recommendations", default)]
    pub recommendations: Vec<String>,
}

/// Per-province summary row, optionally carrying a server-computed
/// average risk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvinceSummary {
    #[serde(rename = "Province", default)]
    pub province: String,
    #[serde(rename = "AvgRisk", deserialize_with = "lenient_opt_f64", default)]
    pub avg_risk: Option<f64>,
    #[serde(rename = "RiskScore", deserialize_with = "lenient_opt_f64", default)]
    pub risk_score: Option<f64>,
    #[serde(rename = "Stunting_Rate", deserialize_with = "lenient_f64", default)]
    pub stunting_rate: f64,
}

/// Short policy text attached to a province.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PolicyBrief {
    #[serde(rename = "Province", default)]
    pub province: String,
    #[serde(rename = "Summary", default)]
    pub summary: String,
}

/// A child-level survey row used for the facility-visit matrix.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChildSurveyRow {
    #[serde(rename = "Province", default)]
    pub province: String,
    /// Survey date, `YYYY-MM-DD`. Rows with unparseable dates are skipped.
    #[serde(rename = "Date", default)]
    pub date: String,
    /// Free-text answer describing where care was sought.
    #[serde(rename = "CareResponse", default)]
    pub care_response: String,
}

// ============================================
// Lenient deserialization
// ============================================

/// Deserialize a numeric field that may be a number, a numeric string,
/// null, or garbage. Unusable values become 0.
pub fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(lenient_opt_f64(deserializer)?.unwrap_or(0.0))
}

/// Deserialize a numeric field that may be absent or malformed.
/// Unusable values become `None` so callers can filter them out.
pub fn lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(coerce_f64(&value))
}

fn coerce_f64(value: &serde_json::Value) -> Option<f64> {
    match value {
        serde_json::Value::Number(n) => n.as_f64().filter(|v| v.is_finite()),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok().filter(|v| v.is_finite()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_boundaries_exact() {
        assert_eq!(RiskCategory::from_probability(70.0), RiskCategory::High);
        assert_eq!(RiskCategory::from_probability(69.999), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_probability(40.0), RiskCategory::Medium);
        assert_eq!(RiskCategory::from_probability(39.999), RiskCategory::Low);
    }

    #[test]
    fn test_category_parse_rejects_unknown_labels() {
        assert_eq!(RiskCategory::parse("High"), Some(RiskCategory::High));
        assert_eq!(RiskCategory::parse("high"), None);
        assert_eq!(RiskCategory::parse("Critical"), None);
        assert_eq!(RiskCategory::parse(""), None);
    }

    #[test]
    fn test_district_row_lenient_numbers() {
        let json = r#"{
            "District": "Nyamasheke",
            "Province": "Western",
            "Stunting_Rate": "41.2",
            "Wasting_Rate": null,
            "RiskScore": "not a number",
            "Hotspot": "High"
        }"#;

        let row: DistrictAnalytics = serde_json::from_str(json).unwrap();
        assert_eq!(row.stunting_rate, 41.2);
        assert_eq!(row.wasting_rate, 0.0);
        assert_eq!(row.underweight_rate, 0.0);
        assert_eq!(row.risk_score, None);
        assert_eq!(row.hotspot.as_deref(), Some("High"));
        assert!(row.recommendations.is_empty());
    }

    #[test]
    fn test_province_summary_accepts_either_risk_field() {
        let with_avg: ProvinceSummary =
            serde_json::from_str(r#"{"Province": "Western", "AvgRisk": 32.5}"#).unwrap();
        assert_eq!(with_avg.avg_risk, Some(32.5));
        assert_eq!(with_avg.risk_score, None);

        let with_score: ProvinceSummary =
            serde_json::from_str(r#"{"Province": "Eastern", "RiskScore": 18}"#).unwrap();
        assert_eq!(with_score.avg_risk, None);
        assert_eq!(with_score.risk_score, Some(18.0));
    }

    #[test]
    fn test_prediction_input_coerces_bad_numbers() {
        let json = r#"{
            "age_months": "18",
            "household_income": null,
            "family_size": 4,
            "food_insecurity": 2,
            "breastfeeding": 1,
            "vaccination_complete": 0,
            "diarrhea_last_week": 0,
            "clean_water_access": 1,
            "improved_sanitation": 0,
            "stunting_risk_score": 0.4,
            "rural_urban": "Rural",
            "region": "North",
            "mother_education": "Primary"
        }"#;

        let input: PredictionInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.age_months, 18.0);
        assert_eq!(input.household_income, 0.0);
        assert_eq!(input.mother_education, EducationLevel::Primary);
        assert_eq!(input.rural_urban, Settlement::Rural);
    }
}
