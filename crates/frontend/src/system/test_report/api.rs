use contracts::shared::api_error::ApiError;
use contracts::system::test_report::TestReport;

use crate::shared::http;

/// Файл кладёт `generate-test-report` в `public/`; кэш браузера не используется
pub const TEST_REPORT_PATH: &str = "/test-report.json";

pub async fn fetch_test_report() -> Result<TestReport, ApiError> {
    http::get_static_json(TEST_REPORT_PATH).await
}
