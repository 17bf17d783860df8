pub mod a001_dispute;
pub mod a002_user;
pub mod a003_team;
pub mod a004_venue;
pub mod a005_audit_log;
pub mod common;
