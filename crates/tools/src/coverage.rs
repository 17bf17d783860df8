//! Свёртка Istanbul `coverage-final.json` в четыре итоговые секции.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::path::Path;

use anyhow::Context;
use contracts::system::test_report::{CoverageSection, CoverageSummary};
use serde::Deserialize;

#[derive(Debug, Default, Deserialize)]
struct Position {
    #[serde(default)]
    line: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
struct Location {
    #[serde(default)]
    start: Position,
}

/// Покрытие одного файла: счётчики операторов, функций и ветвей
#[derive(Debug, Default, Deserialize)]
struct FileCoverage {
    #[serde(default)]
    s: BTreeMap<String, u64>,
    #[serde(default)]
    f: BTreeMap<String, u64>,
    #[serde(default)]
    b: BTreeMap<String, Vec<u64>>,
    #[serde(default, rename = "statementMap")]
    statement_map: BTreeMap<String, Location>,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct Counter {
    total: u64,
    covered: u64,
}

impl Counter {
    fn add<'a>(&mut self, counts: impl IntoIterator<Item = &'a u64>) {
        for n in counts {
            self.total += 1;
            if *n > 0 {
                self.covered += 1;
            }
        }
    }

    fn section(&self) -> CoverageSection {
        CoverageSection::new(self.total, self.covered)
    }
}

/// Строка считается покрытой, если хотя бы один оператор на ней выполнился
pub fn aggregate(raw: &str) -> anyhow::Result<CoverageSummary> {
    let files: HashMap<String, FileCoverage> =
        serde_json::from_str(raw).context("coverage-final.json is not valid Istanbul output")?;

    let mut statements = Counter::default();
    let mut functions = Counter::default();
    let mut branches = Counter::default();
    let mut lines = Counter::default();

    for file in files.values() {
        statements.add(file.s.values());
        functions.add(file.f.values());
        branches.add(file.b.values().flatten());

        let mut all_lines = BTreeSet::new();
        let mut covered_lines = BTreeSet::new();
        for (id, count) in &file.s {
            let Some(line) = file.statement_map.get(id).and_then(|loc| loc.start.line) else {
                continue;
            };
            // Istanbul нумерует строки с 1; 0 означает отсутствие позиции
            if line == 0 {
                continue;
            }
            all_lines.insert(line);
            if *count > 0 {
                covered_lines.insert(line);
            }
        }
        lines.total += all_lines.len() as u64;
        lines.covered += covered_lines.len() as u64;
    }

    Ok(CoverageSummary {
        lines: lines.section(),
        statements: statements.section(),
        branches: branches.section(),
        functions: functions.section(),
    })
}

/// `None`, если файла нет
pub fn read_coverage(path: &Path) -> anyhow::Result<Option<CoverageSummary>> {
    if !path.exists() {
        tracing::warn!("Coverage file not found: {}", path.display());
        return Ok(None);
    }
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    aggregate(&raw).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "/app/src/a.ts": {
            "path": "/app/src/a.ts",
            "statementMap": {
                "0": {"start": {"line": 1, "column": 0}, "end": {"line": 1, "column": 10}},
                "1": {"start": {"line": 1, "column": 12}, "end": {"line": 1, "column": 20}},
                "2": {"start": {"line": 3, "column": 0}, "end": {"line": 3, "column": 5}}
            },
            "s": {"0": 4, "1": 0, "2": 0},
            "f": {"0": 1, "1": 0},
            "b": {"0": [1, 0], "1": [2, 3, 0]}
        },
        "/app/src/b.ts": {
            "statementMap": {
                "0": {"start": {"line": 7}}
            },
            "s": {"0": 2},
            "f": {},
            "b": {}
        }
    }"#;

    #[test]
    fn test_aggregate_sample() {
        let summary = aggregate(SAMPLE).unwrap();

        assert_eq!((summary.statements.total, summary.statements.covered), (4, 2));
        assert_eq!(summary.statements.pct, 50.0);

        assert_eq!((summary.functions.total, summary.functions.covered), (2, 1));

        assert_eq!((summary.branches.total, summary.branches.covered), (5, 3));
        assert_eq!(summary.branches.pct, 60.0);

        // a.ts: lines 1 (covered), 3 (not); b.ts: line 7 (covered)
        assert_eq!((summary.lines.total, summary.lines.covered), (3, 2));
    }

    #[test]
    fn test_empty_coverage_has_zero_pct() {
        let summary = aggregate("{}").unwrap();
        assert_eq!(summary.lines.total, 0);
        assert_eq!(summary.lines.pct, 0.0);
        assert_eq!(summary.functions.pct, 0.0);
    }

    #[test]
    fn test_statement_without_location_skips_line() {
        let raw = r#"{"x.ts": {"s": {"0": 1, "1": 1}, "statementMap": {"0": {"start": {"line": 2}}}}}"#;
        let summary = aggregate(raw).unwrap();
        assert_eq!(summary.statements.total, 2);
        assert_eq!(summary.lines.total, 1);
    }

    #[test]
    fn test_invalid_json_is_error() {
        assert!(aggregate("not json").is_err());
    }

    #[test]
    fn test_missing_file_is_none() {
        let path = std::env::temp_dir().join("cancheados-no-such-coverage-final.json");
        assert!(read_coverage(&path).unwrap().is_none());
    }
}
