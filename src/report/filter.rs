use chrono::{Duration, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Product line a report covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    All,
    Alkansya,
    MadeToOrder,
}

impl Category {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_status(value).as_str() {
            "all" => Some(Category::All),
            "alkansya" => Some(Category::Alkansya),
            "made_to_order" | "mto" => Some(Category::MadeToOrder),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            Category::All => "all",
            Category::Alkansya => "alkansya",
            Category::MadeToOrder => "made_to_order",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::All => "All Products",
            Category::Alkansya => "Alkansya",
            Category::MadeToOrder => "Made to Order",
        }
    }

    pub fn includes_alkansya(self) -> bool {
        matches!(self, Category::All | Category::Alkansya)
    }

    pub fn includes_made_to_order(self) -> bool {
        matches!(self, Category::All | Category::MadeToOrder)
    }
}

/// Status filter for made-to-order rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusFilter {
    #[default]
    All,
    InProgress,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn parse(value: &str) -> Option<Self> {
        match normalize_status(value).as_str() {
            "all" => Some(StatusFilter::All),
            "in_progress" => Some(StatusFilter::InProgress),
            "completed" => Some(StatusFilter::Completed),
            "pending" => Some(StatusFilter::Pending),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::InProgress => "in_progress",
            StatusFilter::Completed => "completed",
            StatusFilter::Pending => "pending",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            StatusFilter::All => "All Status",
            StatusFilter::InProgress => "In Progress",
            StatusFilter::Completed => "Completed",
            StatusFilter::Pending => "Pending",
        }
    }

    /// Whether a raw backend status string passes this filter.
    pub fn matches(self, raw_status: &str) -> bool {
        match self {
            StatusFilter::All => true,
            other => normalize_status(raw_status) == other.as_param(),
        }
    }
}

/// Lowercase, trim, and turn spaces and hyphens into underscores:
/// `"In Progress"`, `"in-progress"` and `"IN_PROGRESS"` all become
/// `"in_progress"`.
pub fn normalize_status(value: &str) -> String {
    value
        .trim()
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c == '-' || c == '_')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("_")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeUnit {
    Days,
    Weeks,
    Months,
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// The `count` units leading up to and including `today`.
    pub fn last(today: NaiveDate, count: u32, unit: RangeUnit) -> Self {
        let start = match unit {
            RangeUnit::Days => today.checked_sub_signed(Duration::days(i64::from(count))),
            RangeUnit::Weeks => today.checked_sub_signed(Duration::weeks(i64::from(count))),
            RangeUnit::Months => today.checked_sub_months(Months::new(count)),
        };
        Self {
            start: start.unwrap_or(today),
            end: today,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.start.format("%Y-%m-%d"),
            self.end.format("%Y-%m-%d")
        )
    }
}

/// How the user picked the report period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSpec {
    Last { count: u32, unit: RangeUnit },
    Custom {
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    },
}

impl RangeSpec {
    /// Parse shorthand like `30d`, `4w` or `6m`.
    pub fn parse_last(value: &str) -> Option<Self> {
        let value = value.trim();
        let (split, _) = value.char_indices().last()?;
        let (count, unit) = value.split_at(split);
        let unit = match unit.to_ascii_lowercase().as_str() {
            "d" => RangeUnit::Days,
            "w" => RangeUnit::Weeks,
            "m" => RangeUnit::Months,
            _ => return None,
        };
        let count = count.parse().ok()?;
        Some(RangeSpec::Last { count, unit })
    }

    /// Resolve to concrete dates. A custom range missing either end falls
    /// back to the default `(count, unit)` period ending today.
    pub fn resolve(&self, today: NaiveDate, default: (u32, RangeUnit)) -> DateRange {
        match *self {
            RangeSpec::Last { count, unit } => DateRange::last(today, count, unit),
            RangeSpec::Custom {
                start: Some(start),
                end: Some(end),
            } => DateRange { start, end },
            RangeSpec::Custom { .. } => DateRange::last(today, default.0, default.1),
        }
    }
}

/// The user's choices for one report run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterSelection {
    pub date_range: DateRange,
    pub category: Category,
    pub status: StatusFilter,
}

impl FilterSelection {
    /// Query string parameters understood by the production endpoints.
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("start_date", self.date_range.start.format("%Y-%m-%d").to_string()),
            ("end_date", self.date_range.end.format("%Y-%m-%d").to_string()),
            ("category", self.category.as_param().to_string()),
            ("status", self.status.as_param().to_string()),
        ]
    }
}
