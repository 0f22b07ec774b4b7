pub mod kpi;
pub mod line_summary;
pub mod report;

pub use kpi::{annotate, annotate_one};
pub use line_summary::{aggregate, select};
pub use report::{build_view, DashboardView};
