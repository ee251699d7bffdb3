pub mod api;
pub mod config;
pub mod error;
pub mod metrics;
pub mod report;
pub mod views;

pub use config::{Config, ReportRules};
pub use error::{ReportError, Result};
pub use metrics::MetricsBundle;
pub use report::{build_report, FilterSelection, ReportDocument, ReportKind};
