use serde::{Serialize, Serializer};
use std::fmt;

use super::DateRange;

/// A single rendered value. Serializes as a bare string or number.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Integer(i64),
    Number(f64),
    /// Displayed with a trailing `%`
    Percent(f64),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into())
    }

    pub fn count(len: usize) -> Self {
        Cell::Integer(i64::try_from(len).unwrap_or(i64::MAX))
    }
}

fn finite_or_zero(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

/// Integral values print without decimals, others with `decimals` places.
/// NaN and infinities print as 0.
fn format_number(value: f64, decimals: usize) -> String {
    let value = finite_or_zero(value);
    let rounded = if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        format!("{value:.decimals$}")
    };
    // "-0" after rounding a tiny negative
    match rounded.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => rounded,
    }
}

impl Serialize for Cell {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Cell::Text(s) => serializer.serialize_str(s),
            Cell::Integer(n) => serializer.serialize_i64(*n),
            // JSON has no NaN or infinity
            Cell::Number(n) | Cell::Percent(n) => serializer.serialize_f64(finite_or_zero(*n)),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Integer(n) => write!(f, "{n}"),
            Cell::Number(n) => f.write_str(&format_number(*n, 2)),
            Cell::Percent(n) => write!(f, "{}%", format_number(*n, 1)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SectionBody {
    KeyValue {
        rows: Vec<(String, Cell)>,
    },
    Table {
        headers: Vec<String>,
        rows: Vec<Vec<Cell>>,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub title: String,
    #[serde(flatten)]
    pub body: SectionBody,
}

impl ReportSection {
    pub fn key_value(title: &str, rows: Vec<(&str, Cell)>) -> Self {
        Self {
            title: title.to_string(),
            body: SectionBody::KeyValue {
                rows: rows
                    .into_iter()
                    .map(|(label, value)| (label.to_string(), value))
                    .collect(),
            },
        }
    }

    pub fn table(title: &str, headers: &[&str], rows: Vec<Vec<Cell>>) -> Self {
        Self {
            title: title.to_string(),
            body: SectionBody::Table {
                headers: headers.iter().map(|h| h.to_string()).collect(),
                rows,
            },
        }
    }

    /// Key/value pairs or data rows, headers excluded.
    pub fn row_count(&self) -> usize {
        match &self.body {
            SectionBody::KeyValue { rows } => rows.len(),
            SectionBody::Table { rows, .. } => rows.len(),
        }
    }

    /// Look up a key/value row by label.
    pub fn value(&self, label: &str) -> Option<&Cell> {
        match &self.body {
            SectionBody::KeyValue { rows } => rows
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, value)| value),
            SectionBody::Table { .. } => None,
        }
    }
}

/// An ordered set of sections, built fresh for each preview or export.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReportDocument {
    pub title: String,
    pub sections: Vec<ReportSection>,
}

impl ReportDocument {
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn section(&self, title: &str) -> Option<&ReportSection> {
        self.sections.iter().find(|s| s.title == title)
    }

    pub fn file_name(&self, range: &DateRange, extension: &str) -> String {
        artifact_name(&self.title, range, extension)
    }
}

/// `<ReportName>_<start>_to_<end>.<extension>`, with the report title's
/// spaces turned into underscores.
pub fn artifact_name(title: &str, range: &DateRange, extension: &str) -> String {
    let name = title.split_whitespace().collect::<Vec<_>>().join("_");
    format!(
        "{}_{}_to_{}.{}",
        name,
        range.start.format("%Y-%m-%d"),
        range.end.format("%Y-%m-%d"),
        extension
    )
}
