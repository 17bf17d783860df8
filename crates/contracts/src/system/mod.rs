pub mod auth;
pub mod test_report;
