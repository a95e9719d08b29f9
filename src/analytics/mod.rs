//! Aggregation Pipeline
//!
//! Pure reductions that turn flat arrays of district analytics rows,
//! province summaries, prediction records, and child-level survey rows
//! into the grouped shapes charts consume. Nothing here holds state or
//! performs IO; malformed values are coerced or filtered, never raised.

pub mod districts;
pub mod matrix;
pub mod predictions;

pub use districts::{
    average_risk, critical_count, hotspot_counts, province_rate_averages,
    province_risk_averages, recommendation_counts, top_risk_districts, ProvinceRates,
    ProvinceRisk,
};
pub use matrix::{facility_matrix, heat_color, is_facility_visit, FacilityMatrix};
pub use predictions::{
    age_distribution, education_risk_table, food_insecurity_levels, headline_metrics,
    household_size_table, income_risk_points, region_risk_table, risk_category_counts,
    timeline, water_sanitation_quadrants, AgeBandRow, CategoryCount, FoodInsecurityRow,
    HeadlineMetrics, IncomeRiskPoint, QuadrantCount, RiskBreakdownRow, SizeRiskRow,
    TimelineBucket, Trend,
};
