mod page;
mod report_view;
mod roster_editor;

pub use page::ReportsPage;
