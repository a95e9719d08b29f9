//! District-level reductions.
//!
//! Inputs are the read-only district analytics and province summary
//! rows. Rows with missing or non-numeric risk scores are filtered, not
//! defaulted, so they never skew an average.

use serde::Serialize;
use std::collections::HashMap;

use crate::model::{DistrictAnalytics, ProvinceSummary};

/// Mean risk score across districts, rounded to one decimal.
/// `None` when no district carries a usable score.
pub fn average_risk(districts: &[DistrictAnalytics]) -> Option<f64> {
    let scores: Vec<f64> = districts
        .iter()
        .filter_map(|d| d.risk_score)
        .filter(|s| s.is_finite())
        .collect();

    if scores.is_empty() {
        return None;
    }

    let avg = scores.iter().sum::<f64>() / scores.len() as f64;
    Some((avg * 10.0).round() / 10.0)
}

/// Count districts per hotspot label; missing labels group under "Unknown".
pub fn hotspot_counts(districts: &[DistrictAnalytics]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for d in districts {
        let label = d.hotspot.clone().unwrap_or_else(|| "Unknown".to_string());
        *counts.entry(label).or_insert(0) += 1;
    }
    counts
}

/// Districts sorted descending by risk score, sliced to `k`.
///
/// The sort is stable: ties keep the original array order. Rows without
/// a usable score are excluded.
pub fn top_risk_districts(districts: &[DistrictAnalytics], k: usize) -> Vec<DistrictAnalytics> {
    let mut scored: Vec<DistrictAnalytics> = districts
        .iter()
        .filter(|d| d.risk_score.is_some_and(|s| s.is_finite()))
        .cloned()
        .collect();

    scored.sort_by(|a, b| {
        b.risk_score
            .partial_cmp(&a.risk_score)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    scored.truncate(k);
    scored
}

/// Number of districts at or above the highest-risk threshold (40).
pub fn critical_count(districts: &[DistrictAnalytics]) -> usize {
    districts
        .iter()
        .filter(|d| d.risk_score.is_some_and(|s| s.is_finite() && s >= 40.0))
        .count()
}

/// Count how often each recommendation string appears across districts.
/// Strings are trimmed; empties are dropped.
pub fn recommendation_counts(districts: &[DistrictAnalytics]) -> HashMap<String, usize> {
    let mut counts = HashMap::new();
    for d in districts {
        for rec in &d.recommendations {
            let key = rec.trim();
            if key.is_empty() {
                continue;
            }
            *counts.entry(key.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Per-province averages of the three malnutrition rate fields.
#[derive(Debug, Clone, Serialize)]
pub struct ProvinceRates {
    pub province: String,
    pub stunting_rate: f64,
    pub wasting_rate: f64,
    pub underweight_rate: f64,
}

/// Group districts by province and average the rate fields.
///
/// Missing rates already arrive as 0 from lenient deserialization, so
/// every row contributes to the denominator. Provinces appear in
/// first-seen order, at most once each.
pub fn province_rate_averages(districts: &[DistrictAnalytics]) -> Vec<ProvinceRates> {
    let mut order: Vec<String> = Vec::new();
    let mut sums: HashMap<String, (f64, f64, f64, usize)> = HashMap::new();

    for d in districts {
        let province = if d.province.is_empty() {
            "Unknown".to_string()
        } else {
            d.province.clone()
        };

        let entry = sums.entry(province.clone()).or_insert_with(|| {
            order.push(province.clone());
            (0.0, 0.0, 0.0, 0)
        });
        entry.0 += d.stunting_rate;
        entry.1 += d.wasting_rate;
        entry.2 += d.underweight_rate;
        entry.3 += 1;
    }

    order
        .into_iter()
        .map(|province| {
            let (stunting, wasting, underweight, n) = sums[&province];
            let n = n as f64;
            ProvinceRates {
                province,
                stunting_rate: stunting / n,
                wasting_rate: wasting / n,
                underweight_rate: underweight / n,
            }
        })
        .collect()
}

/// A province ranked by its mean risk score.
#[derive(Debug, Clone, Serialize)]
pub struct ProvinceRisk {
    pub province: String,
    pub avg_risk: f64,
}

/// Provinces ranked by average risk, highest first, top 6.
///
/// A server-provided summary wins when it carries a numeric `AvgRisk`
/// or `RiskScore`; otherwise averages are computed by grouping the
/// district rows.
pub fn province_risk_averages(
    districts: &[DistrictAnalytics],
    summaries: &[ProvinceSummary],
) -> Vec<ProvinceRisk> {
    let mut ranked: Vec<ProvinceRisk> = if summaries
        .iter()
        .any(|s| s.avg_risk.is_some() || s.risk_score.is_some())
    {
        summaries
            .iter()
            .map(|s| ProvinceRisk {
                province: s.province.clone(),
                avg_risk: s.avg_risk.or(s.risk_score).unwrap_or(0.0),
            })
            .collect()
    } else {
        province_risk_from_districts(districts)
    };

    ranked.sort_by(|a, b| {
        b.avg_risk
            .partial_cmp(&a.avg_risk)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    ranked.truncate(6);
    ranked
}

fn province_risk_from_districts(districts: &[DistrictAnalytics]) -> Vec<ProvinceRisk> {
    let mut order: Vec<String> = Vec::new();
    let mut scores: HashMap<String, Vec<f64>> = HashMap::new();

    for d in districts {
        let province = if d.province.is_empty() {
            "Unknown".to_string()
        } else {
            d.province.clone()
        };
        let entry = scores.entry(province.clone()).or_insert_with(|| {
            order.push(province.clone());
            Vec::new()
        });
        if let Some(score) = d.risk_score.filter(|s| s.is_finite()) {
            entry.push(score);
        }
    }

    order
        .into_iter()
        .map(|province| {
            let values = &scores[&province];
            let avg_risk = if values.is_empty() {
                0.0
            } else {
                values.iter().sum::<f64>() / values.len() as f64
            };
            ProvinceRisk { province, avg_risk }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn district(name: &str, province: &str, risk: Option<f64>, stunting: f64) -> DistrictAnalytics {
        DistrictAnalytics {
            district: name.to_string(),
            province: province.to_string(),
            stunting_rate: stunting,
            wasting_rate: 0.0,
            underweight_rate: 0.0,
            risk_score: risk,
            hotspot: None,
            recommendations: Vec::new(),
        }
    }

    #[test]
    fn test_average_risk_skips_missing_scores() {
        let rows = vec![
            district("A", "Western", Some(40.0), 0.0),
            district("B", "Western", None, 0.0),
            district("C", "Eastern", Some(20.0), 0.0),
        ];
        assert_eq!(average_risk(&rows), Some(30.0));
        assert_eq!(average_risk(&[]), None);
    }

    #[test]
    fn test_province_rate_average_is_exact() {
        let rows = vec![
            district("A", "Western", None, 30.0),
            district("B", "Western", None, 40.0),
        ];
        let averaged = province_rate_averages(&rows);
        assert_eq!(averaged.len(), 1);
        assert_eq!(averaged[0].province, "Western");
        assert_eq!(averaged[0].stunting_rate, 35.0);
    }

    #[test]
    fn test_province_rate_averages_keep_first_seen_order() {
        let rows = vec![
            district("A", "Southern", None, 10.0),
            district("B", "Northern", None, 20.0),
            district("C", "Southern", None, 30.0),
        ];
        let averaged = province_rate_averages(&rows);
        let provinces: Vec<&str> = averaged.iter().map(|p| p.province.as_str()).collect();
        assert_eq!(provinces, vec!["Southern", "Northern"]);
        assert_eq!(averaged[0].stunting_rate, 20.0);
    }

    #[test]
    fn test_top_k_is_stable_and_non_increasing() {
        let rows = vec![
            district("A", "W", Some(25.0), 0.0),
            district("B", "W", Some(40.0), 0.0),
            district("C", "W", Some(25.0), 0.0),
            district("D", "W", Some(10.0), 0.0),
            district("E", "W", None, 0.0),
        ];

        let top = top_risk_districts(&rows, 3);
        let names: Vec<&str> = top.iter().map(|d| d.district.as_str()).collect();
        // Ties between A and C keep original order.
        assert_eq!(names, vec!["B", "A", "C"]);

        for pair in top.windows(2) {
            assert!(pair[0].risk_score.unwrap() >= pair[1].risk_score.unwrap());
        }
    }

    #[test]
    fn test_critical_count_uses_threshold_40() {
        let rows = vec![
            district("A", "W", Some(40.0), 0.0),
            district("B", "W", Some(39.9), 0.0),
            district("C", "W", Some(55.0), 0.0),
        ];
        assert_eq!(critical_count(&rows), 2);
    }

    #[test]
    fn test_hotspot_counts_group_missing_as_unknown() {
        let mut a = district("A", "W", None, 0.0);
        a.hotspot = Some("High".to_string());
        let b = district("B", "W", None, 0.0);

        let counts = hotspot_counts(&[a, b]);
        assert_eq!(counts.get("High"), Some(&1));
        assert_eq!(counts.get("Unknown"), Some(&1));
    }

    #[test]
    fn test_recommendation_counts_trim_and_drop_empty() {
        let mut a = district("A", "W", None, 0.0);
        a.recommendations = vec![
            " Expand feeding programs ".to_string(),
            "".to_string(),
            "Expand feeding programs".to_string(),
        ];

        let counts = recommendation_counts(&[a]);
        assert_eq!(counts.len(), 1);
        assert_eq!(counts.get("Expand feeding programs"), Some(&2));
    }

    #[test]
    fn test_province_risk_prefers_summary_rows() {
        let rows = vec![district("A", "Western", Some(10.0), 0.0)];
        let summaries = vec![
            ProvinceSummary {
                province: "Eastern".to_string(),
                avg_risk: Some(35.0),
                risk_score: None,
                stunting_rate: 0.0,
            },
            ProvinceSummary {
                province: "Western".to_string(),
                avg_risk: Some(20.0),
                risk_score: None,
                stunting_rate: 0.0,
            },
        ];

        let ranked = province_risk_averages(&rows, &summaries);
        assert_eq!(ranked[0].province, "Eastern");
        assert_eq!(ranked[0].avg_risk, 35.0);
    }

    #[test]
    fn test_province_risk_falls_back_to_district_grouping() {
        let rows = vec![
            district("A", "Western", Some(30.0), 0.0),
            district("B", "Western", Some(50.0), 0.0),
            district("C", "Eastern", Some(10.0), 0.0),
        ];

        let ranked = province_risk_averages(&rows, &[]);
        assert_eq!(ranked[0].province, "Western");
        assert_eq!(ranked[0].avg_risk, 40.0);
        assert_eq!(ranked[1].province, "Eastern");
    }
}
