//! Normalized records for the backend's JSON payloads.
//!
//! Every record here is fully defaulted: shaping code downstream never has
//! to ask whether a field or an endpoint was missing.

mod analytics;
pub(crate) mod lenient;
mod orders;
mod production;

pub use analytics::{MonthlySales, ProductPerformance, SalesDashboard, StageCount, TopProduct};
pub use orders::{parse_date, Order, ProductionStatus, StageProgress};
pub use production::{
    AlkansyaData, DailyOutput, MadeToOrderData, OrderItem, OutputAnalytics, Product,
    ProductionOverview,
};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

use crate::error::{ReportError, Result};

/// Everything a report is built from.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MetricsBundle {
    pub overview: ProductionOverview,
    pub alkansya: AlkansyaData,
    pub made_to_order: MadeToOrderData,
    pub output: OutputAnalytics,
    pub products: Vec<Product>,
}

impl MetricsBundle {
    /// Normalize a raw bundle object with optional keys `overview`,
    /// `alkansya`, `made_to_order`, `output` and `products`.
    pub fn from_value(raw: &Value) -> Self {
        Self {
            overview: parse_section("overview", raw.get("overview")),
            alkansya: parse_section("alkansya", raw.get("alkansya")),
            made_to_order: parse_section("made_to_order", raw.get("made_to_order")),
            output: parse_section("output", raw.get("output")),
            products: parse_list("products", raw.get("products")),
        }
    }

    /// Load a raw bundle saved as JSON.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let raw: Value = serde_json::from_str(&content).map_err(|e| ReportError::BundleParse {
            path: path.to_path_buf(),
            source: e,
        })?;
        Ok(Self::from_value(&raw))
    }
}

/// Parse one payload into its record, falling back to the default when the
/// payload is absent or shaped wrong.
pub fn parse_section<T>(name: &str, value: Option<&Value>) -> T
where
    T: DeserializeOwned + Default,
{
    match value {
        None | Some(Value::Null) => T::default(),
        Some(v) => serde_json::from_value(v.clone()).unwrap_or_else(|e| {
            tracing::warn!(section = name, error = %e, "malformed payload, using defaults");
            T::default()
        }),
    }
}

/// Parse a payload expected to be an array. Elements that don't fit are
/// dropped; anything other than an array yields an empty list.
pub fn parse_list<T>(name: &str, value: Option<&Value>) -> Vec<T>
where
    T: DeserializeOwned,
{
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(v @ Value::Array(_)) => lenient::elements(v.clone()),
        Some(_) => {
            tracing::warn!(section = name, "expected a list, using an empty one");
            Vec::new()
        }
    }
}
