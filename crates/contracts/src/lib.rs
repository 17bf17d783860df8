//! Shared wire types and client-side business rules for the Cancheados admin.
//!
//! Everything here is plain Rust without browser dependencies so it can be
//! unit-tested natively and reused by the `tools` binary.

pub mod dashboards;
pub mod domain;
pub mod shared;
pub mod system;
