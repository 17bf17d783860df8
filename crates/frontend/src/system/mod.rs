pub mod auth;
pub mod pages;
pub mod test_report;
