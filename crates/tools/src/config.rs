use serde::Deserialize;
use std::path::{Path, PathBuf};

const CONFIG_FILE: &str = "report.toml";

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = include_str!("../report.toml");

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub coverage: CoverageConfig,
    pub backend: BackendConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct CoverageConfig {
    pub input: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub report: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct OutputConfig {
    pub paths: Vec<PathBuf>,
}

/// Load configuration from report.toml
///
/// Search order:
/// 1. Next to the executable
/// 2. Current working directory
/// 3. Embedded default config
pub fn load_config() -> anyhow::Result<Config> {
    let exe_candidate = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|dir| dir.join(CONFIG_FILE)));

    for candidate in exe_candidate
        .into_iter()
        .chain(std::iter::once(PathBuf::from(CONFIG_FILE)))
    {
        if candidate.exists() {
            tracing::info!("Loading config from: {}", candidate.display());
            return parse_config_file(&candidate);
        }
        tracing::debug!("{} not found at: {}", CONFIG_FILE, candidate.display());
    }

    tracing::info!("Using default embedded configuration");
    let config: Config = toml::from_str(DEFAULT_CONFIG)?;
    Ok(config)
}

fn parse_config_file(path: &Path) -> anyhow::Result<Config> {
    use anyhow::Context;

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: Config =
        toml::from_str(&contents).with_context(|| format!("Invalid config {}", path.display()))?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_loads() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        assert_eq!(
            config.coverage.input,
            PathBuf::from("coverage/coverage-final.json")
        );
        assert_eq!(
            config.backend.report,
            PathBuf::from("../cancheados-backend/test-report.json")
        );
        assert_eq!(
            config.output.paths,
            vec![
                PathBuf::from("test-report.json"),
                PathBuf::from("public/test-report.json")
            ]
        );
    }

    #[test]
    fn test_missing_section_is_error() {
        let result: Result<Config, _> = toml::from_str("[coverage]\ninput = \"x.json\"\n");
        assert!(result.is_err());
    }
}
