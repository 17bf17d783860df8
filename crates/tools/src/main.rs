//! `generate-test-report`: собирает `test-report.json` из покрытия фронтенда
//! и отчёта бэкенда.

pub mod config;
pub mod coverage;
pub mod report;

use std::process::ExitCode;

fn init_tracing() {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn run() -> anyhow::Result<()> {
    let config = config::load_config()?;
    let test_report = report::build_report(&config)?;
    report::write_report(&test_report, &config.output.paths)?;
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("Failed to generate test report: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
