//! Recommendation generator.
//!
//! Evaluates a fixed, ordered list of threshold conditions against the
//! prediction input and joins one fixed message per matched condition
//! into a sentence.

use crate::model::{EducationLevel, PredictionInput};

const DEFAULT_MESSAGE: &str = "Continue current health practices and regular check-ups";

/// Build the recommendation sentence for an input.
///
/// Conditions are evaluated in a fixed order so the output is stable for
/// a given input. When nothing matches, a single default message is
/// returned.
pub fn recommendations(input: &PredictionInput) -> String {
    let mut messages: Vec<&str> = Vec::new();

    if input.food_insecurity > 2.0 {
        messages.push("Address food insecurity through nutrition programs");
    }
    if input.clean_water_access == 0 {
        messages.push("Improve access to clean drinking water");
    }
    if input.improved_sanitation == 0 {
        messages.push("Implement improved sanitation facilities");
    }
    if input.breastfeeding == 0 && input.age_months < 24.0 {
        messages.push("Promote exclusive breastfeeding practices");
    }
    if input.vaccination_complete == 0 {
        messages.push("Complete routine immunization schedule");
    }
    if input.diarrhea_last_week == 1 {
        messages.push("Seek immediate medical attention for diarrhea treatment");
    }
    if input.stunting_risk_score > 0.5 {
        messages.push("Monitor growth and provide nutritional supplementation");
    }
    if matches!(
        input.mother_education,
        EducationLevel::None | EducationLevel::Primary
    ) {
        messages.push("Provide maternal health education and nutrition counseling");
    }

    if messages.is_empty() {
        messages.push(DEFAULT_MESSAGE);
    }

    format!("{}.", messages.join(". "))
}
