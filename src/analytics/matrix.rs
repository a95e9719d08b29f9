//! Facility-visit heat matrix.
//!
//! Builds a weekday-by-province count grid from child-level survey
//! rows whose free-text care answer names a health facility, plus the
//! color ramp the heat cells render with.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

use crate::model::ChildSurveyRow;

const WEEKDAY_LABELS: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// Substrings that mark a care answer as a facility visit.
const FACILITY_TERMS: [&str; 5] = [
    "health center",
    "health centre",
    "hospital",
    "clinic",
    "health post",
];

/// Whether a free-text care answer describes a visit to a health
/// facility. Matching is a case-insensitive substring test so survey
/// phrasings like "Went to the District Hospital" still count.
pub fn is_facility_visit(care_response: &str) -> bool {
    let lowered = care_response.to_lowercase();
    FACILITY_TERMS.iter().any(|term| lowered.contains(term))
}

/// Weekday-by-province grid of facility visit counts.
///
/// `counts[row][col]` is the count for `WEEKDAY_LABELS[row]` and
/// `provinces[col]`. Provinces appear in first-seen order.
#[derive(Debug, Clone, Serialize)]
pub struct FacilityMatrix {
    pub weekdays: Vec<&'static str>,
    pub provinces: Vec<String>,
    pub counts: Vec<Vec<usize>>,
    pub max_count: usize,
}

/// Build the visit matrix from survey rows.
///
/// Rows are kept only when the care answer names a facility and the
/// date parses as `YYYY-MM-DD`. Rows without a province group under
/// "Unknown".
pub fn facility_matrix(rows: &[ChildSurveyRow]) -> FacilityMatrix {
    let mut provinces: Vec<String> = Vec::new();
    let mut counts: Vec<Vec<usize>> = vec![Vec::new(); 7];

    for row in rows {
        if !is_facility_visit(&row.care_response) {
            continue;
        }
        let Ok(date) = NaiveDate::parse_from_str(row.date.trim(), "%Y-%m-%d") else {
            continue;
        };

        let province = if row.province.trim().is_empty() {
            "Unknown".to_string()
        } else {
            row.province.trim().to_string()
        };

        let col = match provinces.iter().position(|p| *p == province) {
            Some(col) => col,
            None => {
                provinces.push(province);
                for weekday_row in &mut counts {
                    weekday_row.push(0);
                }
                provinces.len() - 1
            }
        };

        counts[weekday_index(date.weekday())][col] += 1;
    }

    let max_count = counts
        .iter()
        .flat_map(|row| row.iter().copied())
        .max()
        .unwrap_or(0);

    FacilityMatrix {
        weekdays: WEEKDAY_LABELS.to_vec(),
        provinces,
        counts,
        max_count,
    }
}

fn weekday_index(weekday: Weekday) -> usize {
    weekday.num_days_from_monday() as usize
}

/// Heat color for a cell count, interpolated along a three-stop ramp:
/// green at zero, orange at the midpoint, red at the maximum.
///
/// Returns a `#rrggbb` string. A zero maximum renders everything green.
pub fn heat_color(count: usize, max_count: usize) -> String {
    const GREEN: (f64, f64, f64) = (0x31 as f64, 0xa3 as f64, 0x54 as f64);
    const ORANGE: (f64, f64, f64) = (0xfd as f64, 0x8d as f64, 0x3c as f64);
    const RED: (f64, f64, f64) = (0xe3 as f64, 0x1a as f64, 0x1c as f64);

    if max_count == 0 {
        return rgb_hex(GREEN);
    }

    let ratio = (count as f64 / max_count as f64).clamp(0.0, 1.0);
    let color = if ratio <= 0.5 {
        lerp_rgb(GREEN, ORANGE, ratio * 2.0)
    } else {
        lerp_rgb(ORANGE, RED, (ratio - 0.5) * 2.0)
    };
    rgb_hex(color)
}

fn lerp_rgb(from: (f64, f64, f64), to: (f64, f64, f64), t: f64) -> (f64, f64, f64) {
    (
        from.0 + (to.0 - from.0) * t,
        from.1 + (to.1 - from.1) * t,
        from.2 + (to.2 - from.2) * t,
    )
}

fn rgb_hex((r, g, b): (f64, f64, f64)) -> String {
    format!(
        "#{:02x}{:02x}{:02x}",
        r.round() as u8,
        g.round() as u8,
        b.round() as u8
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(province: &str, date: &str, response: &str) -> ChildSurveyRow {
        ChildSurveyRow {
            province: province.to_string(),
            date: date.to_string(),
            care_response: response.to_string(),
        }
    }

    #[test]
    fn test_facility_classifier_is_case_insensitive_substring() {
        assert!(is_facility_visit("Went to the District Hospital"));
        assert!(is_facility_visit("visited local health centre"));
        assert!(is_facility_visit("Health Center in Kigali"));
        assert!(is_facility_visit("the nearest clinic"));
        assert!(is_facility_visit("community health post"));
        assert!(!is_facility_visit("traditional healer"));
        assert!(!is_facility_visit(""));
    }

    #[test]
    fn test_matrix_counts_by_weekday_and_province() {
        // 2025-06-02 is a Monday, 2025-06-07 a Saturday.
        let rows = vec![
            row("Western", "2025-06-02", "district hospital"),
            row("Western", "2025-06-02", "health center"),
            row("Eastern", "2025-06-07", "clinic"),
            row("Western", "2025-06-02", "stayed home"),
            row("Western", "bad-date", "hospital"),
        ];

        let matrix = facility_matrix(&rows);
        assert_eq!(matrix.provinces, vec!["Western", "Eastern"]);
        assert_eq!(matrix.counts[0][0], 2); // Mon / Western
        assert_eq!(matrix.counts[5][1], 1); // Sat / Eastern
        assert_eq!(matrix.counts[0][1], 0);
        assert_eq!(matrix.max_count, 2);
    }

    #[test]
    fn test_matrix_groups_missing_province_as_unknown() {
        let rows = vec![row("", "2025-06-03", "hospital")];
        let matrix = facility_matrix(&rows);
        assert_eq!(matrix.provinces, vec!["Unknown"]);
        assert_eq!(matrix.counts[1][0], 1); // Tue
    }

    #[test]
    fn test_empty_matrix() {
        let matrix = facility_matrix(&[]);
        assert!(matrix.provinces.is_empty());
        assert_eq!(matrix.weekdays.len(), 7);
        assert_eq!(matrix.max_count, 0);
    }

    #[test]
    fn test_heat_color_endpoints_and_midpoint() {
        assert_eq!(heat_color(0, 10), "#31a354");
        assert_eq!(heat_color(5, 10), "#fd8d3c");
        assert_eq!(heat_color(10, 10), "#e31a1c");
        // zero max renders green, not a division error
        assert_eq!(heat_color(0, 0), "#31a354");
    }

    #[test]
    fn test_heat_color_interpolates_between_stops() {
        let low = heat_color(1, 10);
        assert_ne!(low, "#31a354");
        assert_ne!(low, "#fd8d3c");
        assert!(low.starts_with('#') && low.len() == 7);
    }
}
