//! Read-only dataset artifacts.
//!
//! Precomputed JSON files dropped into the data directory at deploy
//! time. Loading is deliberately forgiving: a missing file or a parse
//! failure logs a warning and yields an empty value, so a partially
//! provisioned data directory degrades features instead of failing
//! requests.

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::warn;

use crate::model::{ChildSurveyRow, DistrictAnalytics, PolicyBrief, ProvinceSummary};

pub const DISTRICT_ANALYTICS: &str = "district_analytics.json";
pub const TOP_HOTSPOTS: &str = "top_hotspots.json";
pub const PROVINCE_SUMMARY: &str = "province_summary.json";
pub const MALNUTRITION_RATES: &str = "malnutrition_rates.json";
pub const POLICY_BRIEFS: &str = "policy_briefs.json";
pub const DISTRICT_BOUNDARIES: &str = "district_boundaries.json";

/// Names servable through the raw passthrough endpoint.
pub const KNOWN_DATASETS: [&str; 6] = [
    DISTRICT_ANALYTICS,
    TOP_HOTSPOTS,
    PROVINCE_SUMMARY,
    MALNUTRITION_RATES,
    POLICY_BRIEFS,
    DISTRICT_BOUNDARIES,
];

/// Loader for the JSON artifacts under the configured data directory.
#[derive(Debug, Clone)]
pub struct DatasetCatalog {
    data_dir: PathBuf,
}

impl DatasetCatalog {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Per-district analytics rows.
    pub fn district_analytics(&self) -> Vec<DistrictAnalytics> {
        self.load_list(DISTRICT_ANALYTICS)
    }

    /// Precomputed hotspot ranking; same row shape as the analytics file.
    pub fn top_hotspots(&self) -> Vec<DistrictAnalytics> {
        self.load_list(TOP_HOTSPOTS)
    }

    /// Per-province summary rows.
    pub fn province_summary(&self) -> Vec<ProvinceSummary> {
        self.load_list(PROVINCE_SUMMARY)
    }

    /// Child-level survey rows backing the facility-visit matrix.
    pub fn child_survey(&self) -> Vec<ChildSurveyRow> {
        self.load_list(MALNUTRITION_RATES)
    }

    pub fn policy_briefs(&self) -> Vec<PolicyBrief> {
        self.load_list(POLICY_BRIEFS)
    }

    /// District boundary GeoJSON, passed through opaque.
    pub fn district_boundaries(&self) -> serde_json::Value {
        self.load_raw(DISTRICT_BOUNDARIES)
            .unwrap_or(serde_json::Value::Null)
    }

    /// Raw artifact by file name, for the passthrough endpoint.
    /// Unknown names are rejected so the endpoint cannot read arbitrary
    /// files out of the data directory.
    pub fn raw(&self, name: &str) -> Option<serde_json::Value> {
        if !KNOWN_DATASETS.contains(&name) {
            return None;
        }
        Some(self.load_raw(name).unwrap_or(serde_json::Value::Null))
    }

    /// True when at least one known artifact is present.
    pub fn any_available(&self) -> bool {
        KNOWN_DATASETS
            .iter()
            .any(|name| self.data_dir.join(name).is_file())
    }

    fn load_list<T: DeserializeOwned>(&self, name: &str) -> Vec<T> {
        let path = self.data_dir.join(name);
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) => {
                warn!(dataset = name, error = %e, "dataset unavailable, serving empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&text) {
            Ok(rows) => rows,
            Err(e) => {
                warn!(dataset = name, error = %e, "dataset unparseable, serving empty");
                Vec::new()
            }
        }
    }

    fn load_raw(&self, name: &str) -> Option<serde_json::Value> {
        let path = self.data_dir.join(name);
        let text = fs::read_to_string(&path)
            .map_err(|e| warn!(dataset = name, error = %e, "dataset unavailable"))
            .ok()?;
        serde_json::from_str(&text)
            .map_err(|e| warn!(dataset = name, error = %e, "dataset unparseable"))
            .ok()
    }
}

/// Policy briefs shaped for display: one brief per province, provinces
/// in file order except "Western" pinned first when present, at most 5.
pub fn policy_brief_view(briefs: &[PolicyBrief]) -> Vec<PolicyBrief> {
    let mut seen: Vec<&str> = Vec::new();
    let mut view: Vec<PolicyBrief> = Vec::new();

    for brief in briefs {
        if seen.contains(&brief.province.as_str()) {
            continue;
        }
        seen.push(&brief.province);
        view.push(brief.clone());
    }

    if let Some(pos) = view.iter().position(|b| b.province == "Western") {
        if pos > 0 {
            let western = view.remove(pos);
            view.insert(0, western);
        }
    }

    view.truncate(5);
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn brief(province: &str) -> PolicyBrief {
        PolicyBrief {
            province: province.to_string(),
            summary: format!("{province} summary"),
        }
    }

    #[test]
    fn test_missing_files_serve_empty() {
        let catalog = DatasetCatalog::new("/nonexistent/data");
        assert!(catalog.district_analytics().is_empty());
        assert!(catalog.province_summary().is_empty());
        assert_eq!(catalog.district_boundaries(), serde_json::Value::Null);
        assert!(!catalog.any_available());
    }

    #[test]
    fn test_unparseable_file_serves_empty() {
        let dir = tempfile::tempdir().unwrap();
        let mut file = std::fs::File::create(dir.path().join(DISTRICT_ANALYTICS)).unwrap();
        file.write_all(b"not json").unwrap();

        let catalog = DatasetCatalog::new(dir.path());
        assert!(catalog.district_analytics().is_empty());
        assert!(catalog.any_available());
    }

    #[test]
    fn test_loads_lenient_district_rows() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(DISTRICT_ANALYTICS),
            r#"[{"District": "Rubavu", "Province": "Western", "RiskScore": "44.5"}]"#,
        )
        .unwrap();

        let catalog = DatasetCatalog::new(dir.path());
        let rows = catalog.district_analytics();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].district, "Rubavu");
        assert_eq!(rows[0].risk_score, Some(44.5));
    }

    #[test]
    fn test_raw_rejects_unknown_names() {
        let catalog = DatasetCatalog::new("/nonexistent/data");
        assert!(catalog.raw("../../etc/passwd").is_none());
        assert!(catalog.raw("random.json").is_none());
        // known but missing still answers, with null
        assert_eq!(
            catalog.raw(TOP_HOTSPOTS),
            Some(serde_json::Value::Null)
        );
    }

    #[test]
    fn test_policy_brief_view_dedupes_and_pins_western() {
        let briefs = vec![
            brief("Eastern"),
            brief("Western"),
            brief("Eastern"),
            brief("Northern"),
            brief("Southern"),
            brief("Kigali"),
            brief("Extra"),
        ];

        let view = policy_brief_view(&briefs);
        assert_eq!(view.len(), 5);
        assert_eq!(view[0].province, "Western");
        assert_eq!(view[1].province, "Eastern");
        // one row per province
        assert_eq!(
            view.iter().filter(|b| b.province == "Eastern").count(),
            1
        );
    }

    #[test]
    fn test_policy_brief_view_without_western() {
        let briefs = vec![brief("Eastern"), brief("Northern")];
        let view = policy_brief_view(&briefs);
        assert_eq!(view[0].province, "Eastern");
        assert_eq!(view.len(), 2);
    }
}
