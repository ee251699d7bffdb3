//! Turns a normalized [`MetricsBundle`] and the user's filters into a
//! [`ReportDocument`].
//!
//! Shaping is pure: the same bundle, filters and report kind always give
//! the same document. Category filters drop whole product lines (their
//! rows disappear, they are not zeroed); the status filter only ever
//! touches made-to-order rows.

use chrono::Duration;

use super::document::{Cell, ReportDocument, ReportSection};
use super::filter::{normalize_status, FilterSelection};
use crate::config::ReportRules;
use crate::metrics::{parse_date, DailyOutput, MetricsBundle, OrderItem};

/// Rows shown in the work progress "Order Details" table.
pub const ORDER_DETAILS_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    Performance,
    WorkProgress,
    Comprehensive,
}

impl ReportKind {
    /// Accepts `performance`, `workprogress` and `comprehensive`,
    /// ignoring case, spaces, hyphens and underscores.
    pub fn parse(value: &str) -> Option<Self> {
        let key: String = value
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match key.as_str() {
            "performance" => Some(ReportKind::Performance),
            "workprogress" => Some(ReportKind::WorkProgress),
            "comprehensive" => Some(ReportKind::Comprehensive),
            _ => None,
        }
    }

    pub fn as_param(self) -> &'static str {
        match self {
            ReportKind::Performance => "performance",
            ReportKind::WorkProgress => "workprogress",
            ReportKind::Comprehensive => "comprehensive",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportKind::Performance => "Production Performance Report",
            ReportKind::WorkProgress => "Work Progress Report",
            ReportKind::Comprehensive => "Comprehensive Production Report",
        }
    }
}

/// Rows left after applying category and status filters.
struct Scoped<'a> {
    recent_output: Vec<&'a DailyOutput>,
    orders: Vec<&'a OrderItem>,
}

impl<'a> Scoped<'a> {
    fn new(bundle: &'a MetricsBundle, filters: &FilterSelection) -> Self {
        let recent_output = if filters.category.includes_alkansya() {
            bundle.alkansya.recent_output.iter().collect()
        } else {
            Vec::new()
        };

        let orders = if filters.category.includes_made_to_order() {
            bundle
                .made_to_order
                .items
                .iter()
                .filter(|item| filters.status.matches(&item.status))
                .collect()
        } else {
            Vec::new()
        };

        Self {
            recent_output,
            orders,
        }
    }

    fn status_counts(&self) -> StatusCounts {
        let mut counts = StatusCounts::default();
        for item in &self.orders {
            match normalize_status(&item.status).as_str() {
                "in_progress" => counts.in_progress += 1,
                "completed" => counts.completed += 1,
                "pending" => counts.pending += 1,
                _ => {}
            }
        }
        counts
    }

    /// Running mean, so large progress values cannot overflow a sum.
    fn average_progress(&self) -> f64 {
        let mut mean = 0.0;
        for (idx, item) in self.orders.iter().enumerate() {
            mean += (item.progress - mean) / (idx + 1) as f64;
        }
        if mean.is_finite() {
            mean
        } else {
            0.0
        }
    }

    fn total_quantity(&self) -> i64 {
        self.orders.iter().map(|item| item.quantity).sum()
    }
}

#[derive(Default)]
struct StatusCounts {
    in_progress: i64,
    completed: i64,
    pending: i64,
}

/// Build the report `kind` from `bundle` as seen through `filters`.
pub fn build_report(
    bundle: &MetricsBundle,
    filters: &FilterSelection,
    kind: ReportKind,
    rules: &ReportRules,
) -> ReportDocument {
    let scoped = Scoped::new(bundle, filters);

    let mut sections = vec![filters_section(filters)];
    match kind {
        ReportKind::Performance => performance_sections(bundle, filters, &scoped, &mut sections),
        ReportKind::WorkProgress => work_progress_sections(&scoped, &mut sections),
        ReportKind::Comprehensive => {
            comprehensive_sections(bundle, filters, &scoped, rules, &mut sections)
        }
    }

    ReportDocument {
        title: kind.title().to_string(),
        sections,
    }
}

/// Like [`build_report`] with the kind given by name. Unknown names give
/// an empty document.
pub fn build_report_named(
    bundle: &MetricsBundle,
    filters: &FilterSelection,
    kind: &str,
    rules: &ReportRules,
) -> ReportDocument {
    match ReportKind::parse(kind) {
        Some(kind) => build_report(bundle, filters, kind, rules),
        None => {
            tracing::debug!(kind, "unknown report type");
            ReportDocument::default()
        }
    }
}

fn filters_section(filters: &FilterSelection) -> ReportSection {
    ReportSection::key_value(
        "Report Filters",
        vec![
            ("Date Range", Cell::text(filters.date_range.to_string())),
            ("Category", Cell::text(filters.category.label())),
            ("Status", Cell::text(filters.status.label())),
        ],
    )
}

fn performance_sections(
    bundle: &MetricsBundle,
    filters: &FilterSelection,
    scoped: &Scoped<'_>,
    sections: &mut Vec<ReportSection>,
) {
    let alkansya = &bundle.alkansya;
    let counts = scoped.status_counts();

    if filters.category.includes_alkansya() {
        sections.push(ReportSection::key_value(
            "Alkansya Metrics",
            vec![
                ("Total Output", Cell::Integer(alkansya.total_output)),
                ("Average Daily Output", Cell::Number(alkansya.average_daily)),
                ("Peak Daily Output", Cell::Integer(alkansya.max_daily)),
                ("Days Recorded", Cell::count(scoped.recent_output.len())),
            ],
        ));
    }

    if filters.category.includes_made_to_order() {
        sections.push(ReportSection::key_value(
            "Made-to-Order Metrics",
            vec![
                ("Total Orders", Cell::count(scoped.orders.len())),
                ("In Progress", Cell::Integer(counts.in_progress)),
                ("Completed", Cell::Integer(counts.completed)),
                ("Pending", Cell::Integer(counts.pending)),
                ("Total Quantity", Cell::Integer(scoped.total_quantity())),
                ("Average Progress", Cell::Percent(scoped.average_progress())),
            ],
        ));
    }

    let mut efficiency = vec![
        ("Completion Rate", Cell::Percent(bundle.overview.completion_rate)),
        ("Production Efficiency", Cell::Percent(bundle.output.efficiency)),
        ("On-Time Rate", Cell::Percent(bundle.output.on_time_rate)),
    ];
    if filters.category.includes_alkansya() {
        efficiency.push(("Alkansya Daily Average", Cell::Number(alkansya.average_daily)));
    }
    if filters.category.includes_made_to_order() {
        let rate = if scoped.orders.is_empty() {
            0.0
        } else {
            counts.completed as f64 / scoped.orders.len() as f64 * 100.0
        };
        efficiency.push(("Order Completion Rate", Cell::Percent(rate)));
    }
    sections.push(ReportSection::key_value("Efficiency Metrics", efficiency));
}

fn work_progress_sections(scoped: &Scoped<'_>, sections: &mut Vec<ReportSection>) {
    sections.push(output_table("Alkansya Recent Output", scoped));

    let counts = scoped.status_counts();
    sections.push(ReportSection::key_value(
        "Made-to-Order Status",
        vec![
            ("In Progress", Cell::Integer(counts.in_progress)),
            ("Completed", Cell::Integer(counts.completed)),
            ("Pending", Cell::Integer(counts.pending)),
        ],
    ));

    let rows = scoped
        .orders
        .iter()
        .take(ORDER_DETAILS_LIMIT)
        .map(|item| {
            vec![
                Cell::Integer(item.order_id),
                Cell::text(item.product_name.trim()),
                Cell::text(item.status.trim()),
                Cell::Integer(item.quantity),
                Cell::Percent(item.progress),
            ]
        })
        .collect();
    sections.push(ReportSection::table(
        "Order Details",
        &["Order ID", "Product", "Status", "Quantity", "Progress"],
        rows,
    ));
}

fn comprehensive_sections(
    bundle: &MetricsBundle,
    filters: &FilterSelection,
    scoped: &Scoped<'_>,
    rules: &ReportRules,
    sections: &mut Vec<ReportSection>,
) {
    let overview = &bundle.overview;
    let mut overview_rows = vec![
        ("Total Productions", Cell::Integer(overview.total_productions)),
        ("In Progress", Cell::Integer(overview.in_progress)),
        ("Completed", Cell::Integer(overview.completed)),
        ("Pending", Cell::Integer(overview.pending)),
        ("Completion Rate", Cell::Percent(overview.completion_rate)),
    ];
    let alkansya_products = bundle.products.iter().filter(|p| p.is_alkansya()).count();
    if filters.category.includes_alkansya() {
        overview_rows.push(("Alkansya Products", Cell::count(alkansya_products)));
    }
    if filters.category.includes_made_to_order() {
        overview_rows.push((
            "Made-to-Order Products",
            Cell::count(bundle.products.len() - alkansya_products),
        ));
    }
    sections.push(ReportSection::key_value("Production Overview", overview_rows));

    let output = &bundle.output;
    sections.push(ReportSection::key_value(
        "Production Output",
        vec![
            ("Total Output", Cell::Integer(output.total_output)),
            ("Average Daily Output", Cell::Number(output.average_daily_output)),
            ("Peak Output", Cell::Integer(output.peak_output)),
            ("Efficiency", Cell::Percent(output.efficiency)),
            ("On-Time Rate", Cell::Percent(output.on_time_rate)),
        ],
    ));

    sections.push(output_table("Recent Output", scoped));

    let rows = scoped
        .orders
        .iter()
        .map(|item| {
            vec![
                Cell::Integer(item.order_id),
                Cell::text(item.product_name.trim()),
                Cell::text(item.customer_name.trim()),
                Cell::text(item.status.trim()),
                Cell::Percent(item.progress),
                Cell::text(deadline(item, rules)),
            ]
        })
        .collect();
    sections.push(ReportSection::table(
        "Made-to-Order Progress",
        &["Order ID", "Product", "Customer", "Status", "Progress", "Deadline"],
        rows,
    ));
}

fn output_table(title: &str, scoped: &Scoped<'_>) -> ReportSection {
    let rows = scoped
        .recent_output
        .iter()
        .map(|day| {
            vec![
                Cell::text(day.date.trim()),
                Cell::Integer(day.quantity),
                Cell::text(day.produced_by.trim()),
            ]
        })
        .collect();
    ReportSection::table(title, &["Date", "Quantity", "Produced By"], rows)
}

/// Acceptance date plus the configured lead time, blank when unknown.
fn deadline(item: &OrderItem, rules: &ReportRules) -> String {
    parse_date(&item.accepted_at)
        .and_then(|accepted| {
            accepted.checked_add_signed(Duration::days(i64::from(rules.deadline_days)))
        })
        .map(|date| date.format("%Y-%m-%d").to_string())
        .unwrap_or_default()
}
