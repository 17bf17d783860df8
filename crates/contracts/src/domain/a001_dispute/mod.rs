pub mod aggregate;
pub mod workflow;

pub use aggregate::*;
pub use workflow::*;
