//! Формат файла `test-report.json`, который пишет `generate-test-report`
//! и показывает страница Test Report.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSection {
    pub total: u64,
    pub covered: u64,
    pub pct: f64,
}

impl CoverageSection {
    /// `pct = covered * 100 / total`, 0 при пустом total
    pub fn new(total: u64, covered: u64) -> Self {
        let pct = if total == 0 {
            0.0
        } else {
            covered as f64 * 100.0 / total as f64
        };
        Self {
            total,
            covered,
            pct,
        }
    }

    /// Ширина полосы прогресса, не больше 100%
    pub fn width_percent(&self) -> f64 {
        self.pct.clamp(0.0, 100.0)
    }

    pub fn label(&self) -> String {
        format!("{:.1}% ({}/{})", self.pct, self.covered, self.total)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CoverageSummary {
    pub lines: CoverageSection,
    pub statements: CoverageSection,
    pub branches: CoverageSection,
    pub functions: CoverageSection,
}

impl CoverageSummary {
    pub fn rows(&self) -> [(&'static str, CoverageSection); 4] {
        [
            ("Lines", self.lines),
            ("Statements", self.statements),
            ("Branches", self.branches),
            ("Functions", self.functions),
        ]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Passed,
    Failed,
    Missing,
    #[serde(other)]
    Unknown,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Passed => "passed",
            Self::Failed => "failed",
            Self::Missing => "missing",
            Self::Unknown => "unknown",
        }
    }

    pub fn badge_variant(&self) -> &'static str {
        match self {
            Self::Passed => "success",
            Self::Failed => "error",
            Self::Missing | Self::Unknown => "neutral",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectReport {
    pub project: String,
    pub status: ReportStatus,
    #[serde(default)]
    pub coverage: Option<CoverageSummary>,
}

impl ProjectReport {
    pub fn missing(project: &str) -> Self {
        Self {
            project: project.to_string(),
            status: ReportStatus::Missing,
            coverage: None,
        }
    }

    /// Наличие покрытия означает, что тесты прошли
    pub fn from_coverage(project: &str, coverage: Option<CoverageSummary>) -> Self {
        match coverage {
            Some(c) => Self {
                project: project.to_string(),
                status: ReportStatus::Passed,
                coverage: Some(c),
            },
            None => Self::missing(project),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestReport {
    #[serde(rename = "generatedAt")]
    pub generated_at: String,
    pub frontend: ProjectReport,
    pub backend: ProjectReport,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pct_and_width() {
        let s = CoverageSection::new(3, 2);
        assert_eq!(s.label(), "66.7% (2/3)");
        assert_eq!(CoverageSection::new(0, 0).pct, 0.0);

        let over = CoverageSection {
            total: 10,
            covered: 12,
            pct: 120.0,
        };
        assert_eq!(over.width_percent(), 100.0);
    }

    #[test]
    fn test_parse_report_with_missing_backend() {
        let json = r#"{
            "generatedAt": "2024-06-01T08:00:00.000Z",
            "frontend": {
                "project": "admin",
                "status": "passed",
                "coverage": {
                    "lines": {"total": 10, "covered": 8, "pct": 80},
                    "statements": {"total": 12, "covered": 9, "pct": 75},
                    "branches": {"total": 4, "covered": 1, "pct": 25},
                    "functions": {"total": 5, "covered": 5, "pct": 100}
                }
            },
            "backend": {"project": "backend", "status": "missing", "coverage": null}
        }"#;
        let report: TestReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.frontend.status, ReportStatus::Passed);
        assert_eq!(report.backend, ProjectReport::missing("backend"));
        let rows = report.frontend.coverage.unwrap().rows();
        assert_eq!(rows[2].0, "Branches");
        assert_eq!(rows[2].1.label(), "25.0% (1/4)");
    }

    #[test]
    fn test_unknown_status() {
        let p: ProjectReport =
            serde_json::from_str(r#"{"project":"x","status":"flaky"}"#).unwrap();
        assert_eq!(p.status, ReportStatus::Unknown);
        assert!(p.coverage.is_none());
    }
}
