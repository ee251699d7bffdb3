pub mod csv;
mod document;
mod filter;
mod preview;
mod shaper;

pub use document::{artifact_name, Cell, ReportDocument, ReportSection, SectionBody};
pub use filter::{
    normalize_status, Category, DateRange, FilterSelection, RangeSpec, RangeUnit, StatusFilter,
};
pub use preview::render_preview;
pub use shaper::{build_report, build_report_named, ReportKind, ORDER_DETAILS_LIMIT};
