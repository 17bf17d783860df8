mod charts;
mod dashboard;

pub use dashboard::OverviewDashboard;
