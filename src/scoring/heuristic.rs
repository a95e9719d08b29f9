//! Heuristic risk score and confidence estimator.

use crate::model::{EducationLevel, PredictionInput, Settlement};

/// Compute the fallback risk probability for a child, in [5, 95].
///
/// Additive score starting from a fixed base, with signed adjustments
/// per factor. Deterministic: identical input always yields identical
/// output.
pub fn risk_score(input: &PredictionInput) -> f64 {
    let mut score = 30.0;

    // Food insecurity, 0-5 scale
    score += input.food_insecurity * 10.0;

    // Water and sanitation: absence is a major risk factor
    if input.clean_water_access == 0 {
        score += 25.0;
    } else {
        score -= 8.0;
    }

    if input.improved_sanitation == 0 {
        score += 20.0;
    } else {
        score -= 8.0;
    }

    // Income bands, decreasing risk as income rises
    if input.household_income >= 500_000.0 {
        score -= 15.0;
    } else if input.household_income >= 200_000.0 {
        score -= 8.0;
    } else if input.household_income >= 100_000.0 {
        score += 5.0;
    } else if input.household_income >= 50_000.0 {
        score += 12.0;
    } else {
        score += 25.0;
    }

    // Breastfeeding only matters under 24 months
    if input.age_months < 24.0 {
        if input.breastfeeding == 1 {
            score -= 12.0;
        } else {
            score += 10.0;
        }
    }

    if input.vaccination_complete == 1 {
        score -= 15.0;
    } else {
        score += 18.0;
    }

    // Diarrhea has no protective counterpart
    if input.diarrhea_last_week == 1 {
        score += 20.0;
    }

    // Stunting risk is a direct additive indicator
    score += input.stunting_risk_score * 25.0;

    score += match input.mother_education {
        EducationLevel::Higher => -18.0,
        EducationLevel::Secondary => -10.0,
        EducationLevel::Primary => -3.0,
        EducationLevel::None => 12.0,
    };

    // Household size: resource dilution
    if input.family_size > 7.0 {
        score += 15.0;
    } else if input.family_size > 5.0 {
        score += 8.0;
    } else if input.family_size > 3.0 {
        score += 3.0;
    }

    // Age bands: the youngest are the most vulnerable
    if input.age_months < 6.0 {
        score += 15.0;
    } else if input.age_months < 12.0 {
        score += 10.0;
    } else if input.age_months < 24.0 {
        score += 5.0;
    } else if input.age_months >= 36.0 {
        score -= 5.0;
    }

    if input.rural_urban == Settlement::Rural {
        score += 8.0;
    }

    score.clamp(5.0, 95.0)
}

/// Estimate confidence from input completeness, in [75, 95].
///
/// Starts at a fixed base and adds a bonus for each of five fields being
/// present or non-default.
pub fn confidence_estimate(input: &PredictionInput) -> f64 {
    let mut confidence: f64 = 75.0;

    if input.vaccination_complete != 0 {
        confidence += 5.0;
    }
    if input.breastfeeding != 0 {
        confidence += 3.0;
    }
    if input.stunting_risk_score > 0.0 {
        confidence += 7.0;
    }
    if input.household_income > 0.0 {
        confidence += 5.0;
    }
    if input.food_insecurity >= 0.0 {
        confidence += 5.0;
    }

    confidence.min(95.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RiskCategory;

    fn base_input() -> PredictionInput {
        PredictionInput {
            age_months: 12.0,
            household_income: 100_000.0,
            family_size: 4.0,
            food_insecurity: 2.0,
            breastfeeding: 1,
            vaccination_complete: 1,
            diarrhea_last_week: 0,
            clean_water_access: 1,
            improved_sanitation: 1,
            stunting_risk_score: 0.3,
            rural_urban: Settlement::Rural,
            region: "North".to_string(),
            mother_education: EducationLevel::Primary,
        }
    }

    #[test]
    fn test_all_protective_input_clamps_to_floor() {
        // base 30 - 8 - 8 - 15 - 15 - 18 = -34, clamped to 5
        let input = PredictionInput {
            age_months: 30.0,
            household_income: 600_000.0,
            family_size: 3.0,
            food_insecurity: 0.0,
            breastfeeding: 1,
            vaccination_complete: 1,
            diarrhea_last_week: 0,
            clean_water_access: 1,
            improved_sanitation: 1,
            stunting_risk_score: 0.0,
            rural_urban: Settlement::Urban,
            region: "Central".to_string(),
            mother_education: EducationLevel::Higher,
        };

        let score = risk_score(&input);
        assert_eq!(score, 5.0);
        assert_eq!(RiskCategory::from_probability(score), RiskCategory::Low);
    }

    #[test]
    fn test_all_adverse_input_clamps_to_ceiling() {
        let input = PredictionInput {
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
        };

        let score = risk_score(&input);
        assert_eq!(score, 95.0);
        assert_eq!(RiskCategory::from_probability(score), RiskCategory::High);
    }

    #[test]
    fn test_score_is_deterministic() {
        let input = base_input();
        let first = risk_score(&input);
        for _ in 0..10 {
            assert_eq!(risk_score(&input), first);
        }
    }

    #[test]
    fn test_score_stays_in_range_across_income_bands() {
        for income in [0.0, 49_999.0, 50_000.0, 100_000.0, 200_000.0, 500_000.0, 2_000_000.0] {
            let mut input = base_input();
            input.household_income = income;
            let score = risk_score(&input);
            assert!((5.0..=95.0).contains(&score), "income {income} gave {score}");
        }
    }

    #[test]
    fn test_breastfeeding_ignored_at_24_months() {
        let mut with = base_input();
        with.age_months = 24.0;
        with.breastfeeding = 1;

        let mut without = with.clone();
        without.breastfeeding = 0;

        assert_eq!(risk_score(&with), risk_score(&without));
    }

    #[test]
    fn test_confidence_bounds() {
        // Minimum: every bonus field at its default.
        let mut input = base_input();
        input.vaccination_complete = 0;
        input.breastfeeding = 0;
        input.stunting_risk_score = 0.0;
        input.household_income = 0.0;
        input.food_insecurity = 0.0;
        // food_insecurity >= 0 always holds, so the floor is 80.
        assert_eq!(confidence_estimate(&input), 80.0);

        // Maximum: all five bonuses, capped at 95.
        let full = base_input();
        let c = confidence_estimate(&full);
        assert!((75.0..=95.0).contains(&c));
        assert_eq!(c, 95.0);
    }
}
