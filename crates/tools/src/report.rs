use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::{SecondsFormat, Utc};
use contracts::system::test_report::{ProjectReport, TestReport};

use crate::config::Config;
use crate::coverage;

pub const FRONTEND_PROJECT: &str = "admin";
pub const BACKEND_PROJECT: &str = "backend";

/// Отсутствующий или битый отчёт бэкенда превращается в `status: missing`
pub fn read_backend_report(path: &Path) -> ProjectReport {
    let parsed = std::fs::read_to_string(path)
        .map_err(anyhow::Error::from)
        .and_then(|raw| serde_json::from_str::<ProjectReport>(&raw).map_err(anyhow::Error::from));

    match parsed {
        Ok(report) => report,
        Err(e) => {
            tracing::warn!("Backend report unavailable at {}: {}", path.display(), e);
            ProjectReport::missing(BACKEND_PROJECT)
        }
    }
}

pub fn build_report(config: &Config) -> anyhow::Result<TestReport> {
    let frontend_coverage = coverage::read_coverage(&config.coverage.input)?;

    Ok(TestReport {
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        frontend: ProjectReport::from_coverage(FRONTEND_PROJECT, frontend_coverage),
        backend: read_backend_report(&config.backend.report),
    })
}

/// Пишет отчёт во все пути; возвращает записанные
pub fn write_report(report: &TestReport, targets: &[PathBuf]) -> anyhow::Result<Vec<PathBuf>> {
    let json = serde_json::to_string_pretty(report)?;
    let mut written = Vec::with_capacity(targets.len());

    for dest in targets {
        if let Some(parent) = dest.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        std::fs::write(dest, &json)
            .with_context(|| format!("Failed to write {}", dest.display()))?;
        tracing::info!("Wrote test report to {}", dest.display());
        written.push(dest.clone());
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::system::test_report::ReportStatus;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("cancheados-report-{}-{}", name, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_missing_backend_report() {
        let dir = scratch_dir("missing");
        let report = read_backend_report(&dir.join("test-report.json"));
        assert_eq!(report, ProjectReport::missing("backend"));
    }

    #[test]
    fn test_unparsable_backend_report() {
        let dir = scratch_dir("broken");
        let path = dir.join("test-report.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert_eq!(read_backend_report(&path).status, ReportStatus::Missing);
    }

    #[test]
    fn test_build_and_write() {
        let dir = scratch_dir("full");
        let coverage_path = dir.join("coverage-final.json");
        std::fs::write(
            &coverage_path,
            r#"{"a.ts": {"s": {"0": 1}, "f": {"0": 0}, "b": {}, "statementMap": {"0": {"start": {"line": 1}}}}}"#,
        )
        .unwrap();
        let backend_path = dir.join("backend.json");
        std::fs::write(
            &backend_path,
            r#"{"project": "backend", "status": "failed", "coverage": null}"#,
        )
        .unwrap();

        let config: Config = toml::from_str(&format!(
            "[coverage]\ninput = {:?}\n[backend]\nreport = {:?}\n[output]\npaths = []\n",
            coverage_path.display().to_string(),
            backend_path.display().to_string()
        ))
        .unwrap();

        let report = build_report(&config).unwrap();
        assert_eq!(report.frontend.project, "admin");
        assert_eq!(report.frontend.status, ReportStatus::Passed);
        assert_eq!(report.frontend.coverage.unwrap().functions.covered, 0);
        assert_eq!(report.backend.status, ReportStatus::Failed);

        let targets = vec![dir.join("test-report.json"), dir.join("public").join("test-report.json")];
        let written = write_report(&report, &targets).unwrap();
        assert_eq!(written.len(), 2);

        let back: TestReport =
            serde_json::from_str(&std::fs::read_to_string(&targets[1]).unwrap()).unwrap();
        assert_eq!(back, report);
    }

    #[test]
    fn test_frontend_missing_without_coverage() {
        let dir = scratch_dir("nocov");
        let config: Config = toml::from_str(&format!(
            "[coverage]\ninput = {:?}\n[backend]\nreport = {:?}\n[output]\npaths = []\n",
            dir.join("none.json").display().to_string(),
            dir.join("none2.json").display().to_string()
        ))
        .unwrap();
        let report = build_report(&config).unwrap();
        assert_eq!(report.frontend, ProjectReport::missing("admin"));
    }
}
