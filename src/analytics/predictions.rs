//! Prediction-history reductions.
//!
//! Chart-ready groupings over the stored prediction records. All
//! sparse-then-dense tables preserve first-seen key order so stacked
//! bars render deterministically.

use serde::Serialize;
use std::collections::HashSet;

use crate::model::{PredictionRecord, RiskCategory};

/// Count per risk category; zero-count categories are dropped.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryCount {
    pub name: RiskCategory,
    pub value: usize,
}

pub fn risk_category_counts(records: &[PredictionRecord]) -> Vec<CategoryCount> {
    [RiskCategory::High, RiskCategory::Medium, RiskCategory::Low]
        .into_iter()
        .map(|category| CategoryCount {
            name: category,
            value: records
                .iter()
                .filter(|r| r.risk_category == category)
                .count(),
        })
        .filter(|c| c.value > 0)
        .collect()
}

/// One row of a stacked high/medium/low breakdown keyed by a label.
#[derive(Debug, Clone, Serialize)]
pub struct RiskBreakdownRow {
    pub name: String,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

impl RiskBreakdownRow {
    fn new(name: String) -> Self {
        Self {
            name,
            high: 0,
            medium: 0,
            low: 0,
        }
    }

    fn bump(&mut self, category: RiskCategory) {
        match category {
            RiskCategory::High => self.high += 1,
            RiskCategory::Medium => self.medium += 1,
            RiskCategory::Low => self.low += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.high + self.medium + self.low
    }
}

fn breakdown_by<F>(records: &[PredictionRecord], key: F) -> Vec<RiskBreakdownRow>
where
    F: Fn(&PredictionRecord) -> Option<String>,
{
    let mut rows: Vec<RiskBreakdownRow> = Vec::new();

    for record in records {
        let Some(name) = key(record) else { continue };
        match rows.iter_mut().find(|r| r.name == name) {
            Some(row) => row.bump(record.risk_category),
            None => {
                let mut row = RiskBreakdownRow::new(name);
                row.bump(record.risk_category);
                rows.push(row);
            }
        }
    }

    rows
}

/// Per-region risk category counts, first-seen region order.
pub fn region_risk_table(records: &[PredictionRecord]) -> Vec<RiskBreakdownRow> {
    breakdown_by(records, |r| Some(r.region.clone()))
}

/// Per-education-level risk category counts.
pub fn education_risk_table(records: &[PredictionRecord]) -> Vec<RiskBreakdownRow> {
    breakdown_by(records, |r| {
        Some(r.input.education_level.as_str().to_string())
    })
}

/// One row per household size with risk counts, sorted ascending by size.
#[derive(Debug, Clone, Serialize)]
pub struct SizeRiskRow {
    pub size: f64,
    pub high: usize,
    pub medium: usize,
    pub low: usize,
}

pub fn household_size_table(records: &[PredictionRecord]) -> Vec<SizeRiskRow> {
    let mut rows: Vec<SizeRiskRow> = Vec::new();

    for record in records {
        let size = record.input.household_size;
        if !(size.is_finite() && size > 0.0) {
            continue;
        }
        match rows.iter_mut().find(|r| r.size == size) {
            Some(row) => match record.risk_category {
                RiskCategory::High => row.high += 1,
                RiskCategory::Medium => row.medium += 1,
                RiskCategory::Low => row.low += 1,
            },
            None => rows.push(SizeRiskRow {
                size,
                high: (record.risk_category == RiskCategory::High) as usize,
                medium: (record.risk_category == RiskCategory::Medium) as usize,
                low: (record.risk_category == RiskCategory::Low) as usize,
            }),
        }
    }

    rows.sort_by(|a, b| a.size.partial_cmp(&b.size).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

/// Day bucket in the prediction timeline.
#[derive(Debug, Clone, Serialize)]
pub struct TimelineBucket {
    pub date: String,
    pub predictions: usize,
}

/// Bucket records into days by creation time, oldest day first.
///
/// Records are sorted by timestamp before bucketing, so buckets appear
/// in monotonic append order.
pub fn timeline(records: &[PredictionRecord]) -> Vec<TimelineBucket> {
    let mut sorted: Vec<&PredictionRecord> = records.iter().collect();
    sorted.sort_by_key(|r| r.created_at);

    let mut buckets: Vec<TimelineBucket> = Vec::new();
    for record in sorted {
        let date = record.created_at.format("%Y-%m-%d").to_string();
        match buckets.last_mut() {
            Some(bucket) if bucket.date == date => bucket.predictions += 1,
            _ => buckets.push(TimelineBucket {
                date,
                predictions: 1,
            }),
        }
    }

    buckets
}

/// Income/probability pair for the income correlation chart.
#[derive(Debug, Clone, Serialize)]
pub struct IncomeRiskPoint {
    pub income: f64,
    pub probability: f64,
    pub risk_category: RiskCategory,
}

/// Records with a positive income, sorted ascending by income.
pub fn income_risk_points(records: &[PredictionRecord]) -> Vec<IncomeRiskPoint> {
    let mut points: Vec<IncomeRiskPoint> = records
        .iter()
        .filter(|r| r.input.household_income > 0.0)
        .map(|r| IncomeRiskPoint {
            income: r.input.household_income,
            probability: r.probability,
            risk_category: r.risk_category,
        })
        .collect();

    points.sort_by(|a, b| {
        a.income
            .partial_cmp(&b.income)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    points
}

/// Case count and mean risk per food-insecurity level.
#[derive(Debug, Clone, Serialize)]
pub struct FoodInsecurityRow {
    pub level: f64,
    pub count: usize,
    pub avg_risk: f64,
}

pub fn food_insecurity_levels(records: &[PredictionRecord]) -> Vec<FoodInsecurityRow> {
    let mut rows: Vec<FoodInsecurityRow> = Vec::new();

    for record in records {
        let level = record.input.food_insecurity;
        if !level.is_finite() {
            continue;
        }
        match rows.iter_mut().find(|r| r.level == level) {
            Some(row) => {
                row.count += 1;
                row.avg_risk += record.probability;
            }
            None => rows.push(FoodInsecurityRow {
                level,
                count: 1,
                avg_risk: record.probability,
            }),
        }
    }

    for row in &mut rows {
        row.avg_risk /= row.count as f64;
    }
    rows.sort_by(|a, b| a.level.partial_cmp(&b.level).unwrap_or(std::cmp::Ordering::Equal));
    rows
}

/// Water/sanitation access quadrant with its case count.
#[derive(Debug, Clone, Serialize)]
pub struct QuadrantCount {
    pub category: &'static str,
    pub count: usize,
}

/// Split cases by water and sanitation access; empty quadrants dropped.
pub fn water_sanitation_quadrants(records: &[PredictionRecord]) -> Vec<QuadrantCount> {
    let quadrants = [
        ("Both Available", 1u8, 1u8),
        ("Water Only", 1, 0),
        ("Sanitation Only", 0, 1),
        ("Neither", 0, 0),
    ];

    quadrants
        .into_iter()
        .map(|(category, water, sanitation)| QuadrantCount {
            category,
            count: records
                .iter()
                .filter(|r| r.input.water_access == water && r.input.sanitation_access == sanitation)
                .count(),
        })
        .filter(|q| q.count > 0)
        .collect()
}

/// Age band with case count and mean probability.
#[derive(Debug, Clone, Serialize)]
pub struct AgeBandRow {
    pub age_group: &'static str,
    pub count: usize,
    pub avg_probability: f64,
}

fn age_band(age_months: f64) -> &'static str {
    if age_months < 6.0 {
        "0-5 months"
    } else if age_months < 12.0 {
        "6-11 months"
    } else if age_months < 24.0 {
        "12-23 months"
    } else if age_months < 36.0 {
        "24-35 months"
    } else {
        "36+ months"
    }
}

pub fn age_distribution(records: &[PredictionRecord]) -> Vec<AgeBandRow> {
    let mut rows: Vec<AgeBandRow> = Vec::new();

    for record in records {
        let band = age_band(record.child_age);
        match rows.iter_mut().find(|r| r.age_group == band) {
            Some(row) => {
                row.count += 1;
                row.avg_probability += record.probability;
            }
            None => rows.push(AgeBandRow {
                age_group: band,
                count: 1,
                avg_probability: record.probability,
            }),
        }
    }

    for row in &mut rows {
        row.avg_probability /= row.count as f64;
    }
    rows
}

/// Direction of the overall risk trend across the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Neutral,
}

/// Headline numbers for the dashboard cards.
#[derive(Debug, Clone, Serialize)]
pub struct HeadlineMetrics {
    pub total_cases: usize,
    pub high_risk_cases: usize,
    pub high_risk_share: f64,
    pub average_risk: f64,
    pub regions_affected: usize,
    pub risk_trend: Trend,
}

pub fn headline_metrics(records: &[PredictionRecord]) -> HeadlineMetrics {
    let total_cases = records.len();
    let high_risk_cases = records
        .iter()
        .filter(|r| r.risk_category == RiskCategory::High)
        .count();

    let high_risk_share = if total_cases > 0 {
        ((high_risk_cases as f64 / total_cases as f64) * 1000.0).round() / 10.0
    } else {
        0.0
    };

    let average_risk = if total_cases > 0 {
        let sum: f64 = records.iter().map(|r| r.probability).sum();
        ((sum / total_cases as f64) * 10.0).round() / 10.0
    } else {
        0.0
    };

    let regions_affected = records
        .iter()
        .map(|r| r.region.as_str())
        .collect::<HashSet<_>>()
        .len();

    let risk_trend = if total_cases >= 2 {
        if records[total_cases - 1].probability > records[0].probability {
            Trend::Up
        } else {
            Trend::Down
        }
    } else {
        Trend::Neutral
    };

    HeadlineMetrics {
        total_cases,
        high_risk_cases,
        high_risk_share,
        average_risk,
        regions_affected,
        risk_trend,
    }
}
