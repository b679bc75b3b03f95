//! Report module - metrics and workbook generation

mod builder;
mod charts;
mod metrics;
mod style;

pub use builder::{build_report, build_report_at, ReportError};
pub use metrics::{MarginTier, SalesMetrics, SalesRecord, TurnoverTier};

/// Name of the single worksheet; chart ranges refer to it.
pub const SHEET_NAME: &str = "Relatório Mensal";
