//! Resolution of a remote response against the local fallback.

use chrono::Utc;
use uuid::Uuid;

use super::client::RemotePrediction;
use crate::model::{InputEcho, PredictionInput, PredictionRecord, RiskCategory};
use crate::scoring;

/// Merge a remote response (if any) with the heuristic fallback into a
/// finished record.
///
/// Normalization: remote values `<= 1` are treated as fractions and
/// scaled to percentages; missing values count as 0. A remote value
/// only wins when it is strictly positive, otherwise the heuristic
/// fallback supplies it. The risk category is derived from the final
/// probability and only overridden by a remote label that parses to a
/// valid category.
pub fn resolve_prediction(
    input: &PredictionInput,
    remote: Option<RemotePrediction>,
) -> PredictionRecord {
    let remote = remote.unwrap_or_default();

    let api_probability = normalize(remote.probability);
    let api_confidence = normalize(remote.confidence);

    let probability = if api_probability > 0.0 {
        api_probability
    } else {
        scoring::risk_score(input)
    };

    let confidence = if api_confidence > 0.0 {
        api_confidence
    } else {
        scoring::confidence_estimate(input)
    };

    let mut category = RiskCategory::from_probability(probability);
    if let Some(label) = remote.risk_category.as_deref() {
        if let Some(parsed) = RiskCategory::parse(label) {
            category = parsed;
        }
    }

    let notes = match remote.notes {
        Some(n) if !n.trim().is_empty() => n,
        _ => scoring::recommendations(input),
    };

    PredictionRecord {
        id: Uuid::new_v4().to_string(),
        child_age: input.age_months,
        region: input.region.clone(),
        risk_category: category,
        probability: scoring::round1(probability.clamp(0.0, 100.0)),
        confidence: scoring::round1(confidence.clamp(0.0, 100.0)),
        notes,
        created_at: Utc::now(),
        input: InputEcho::from(input),
    }
}

/// Scale a remote value to a percentage. Fractions (<= 1) become
/// percentages; absent values become 0 so the fallback activates.
fn normalize(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() => {
            if v <= 1.0 {
                v * 100.0
            } else {
                v
            }
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationLevel, Settlement};

    fn adverse_input() -> PredictionInput {
        PredictionInput {
            age_months: 4.0,
            household_income: 10_000.0,
            family_size: 9.0,
            food_insecurity: 5.0,
            breastfeeding: 0,
            vaccination_complete: 0,
            diarrhea_last_week: 1,
            clean_water_access: 0,
            improved_sanitation: 0,
            stunting_risk_score: 1.0,
            rural_urban: Settlement::Rural,
            region: "West".to_string(),
            mother_education: EducationLevel::None,
        }
    }

    #[test]
    fn test_fallback_activates_without_remote_response() {
        let record = resolve_prediction(&adverse_input(), None);
        assert_eq!(record.probability, 95.0);
        assert_eq!(record.risk_category, RiskCategory::High);
        assert!(!record.notes.is_empty());
    }

    #[test]
    fn test_remote_fraction_is_scaled_to_percentage() {
        let remote = RemotePrediction {
            probability: Some(0.82),
            confidence: Some(0.9),
            risk_category: None,
            notes: None,
        };

        let record = resolve_prediction(&adverse_input(), Some(remote));
        assert_eq!(record.probability, 82.0);
        assert_eq!(record.confidence, 90.0);
        assert_eq!(record.risk_category, RiskCategory::High);
    }

    #[test]
    fn test_remote_zero_probability_triggers_fallback() {
        let remote = RemotePrediction {
            probability: Some(0.0),
            confidence: Some(0.0),
            risk_category: None,
            notes: None,
        };

        let record = resolve_prediction(&adverse_input(), Some(remote));
        // heuristic fallback for the adverse input
        assert_eq!(record.probability, 95.0);
        assert!((75.0..=95.0).contains(&record.confidence));
    }

    #[test]
    fn test_valid_remote_category_overrides_derived_one() {
        let remote = RemotePrediction {
            probability: Some(20.0),
            confidence: None,
            risk_category: Some("High".to_string()),
            notes: None,
        };

        let record = resolve_prediction(&adverse_input(), Some(remote));
        assert_eq!(record.probability, 20.0);
        assert_eq!(record.risk_category, RiskCategory::High);
    }

    #[test]
    fn test_invalid_remote_category_is_ignored() {
        let remote = RemotePrediction {
            probability: Some(20.0),
            confidence: None,
            risk_category: Some("Severe".to_string()),
            notes: None,
        };

        let record = resolve_prediction(&adverse_input(), Some(remote));
        assert_eq!(record.risk_category, RiskCategory::Low);
    }

    #[test]
    fn test_remote_notes_win_over_generated_ones() {
        let remote = RemotePrediction {
            probability: Some(50.0),
            confidence: None,
            risk_category: None,
            notes: Some("Refer to district nutritionist".to_string()),
        };

        let record = resolve_prediction(&adverse_input(), Some(remote));
        assert_eq!(record.notes, "Refer to district nutritionist");
    }

    #[test]
    fn test_record_echoes_input_fields() {
        let input = adverse_input();
        let record = resolve_prediction(&input, None);
        assert_eq!(record.child_age, 4.0);
        assert_eq!(record.region, "West");
        assert_eq!(record.input.household_income, 10_000.0);
        assert_eq!(record.input.household_size, 9.0);
    }
}
