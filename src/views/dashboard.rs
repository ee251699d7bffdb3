use chrono::{Duration, NaiveDate};
use serde_json::Value;
use tabled::{settings::Style, Table, Tabled};

use crate::api::{endpoints, ApiClient};
use crate::config::ReportRules;
use crate::error::{ReportError, Result};
use crate::metrics::{
    parse_list, parse_section, DailyOutput, Order, ProductPerformance, ProductionOverview,
    StageCount,
};
use crate::report::Cell;

use super::format_grouped_int;

/// Orders whose deadline falls within this many days are flagged.
const DUE_SOON_DAYS: i64 = 3;

/// Daily output rows shown on the dashboard.
const DAILY_OUTPUT_ROWS: usize = 7;

#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    pub overview: ProductionOverview,
    pub stages: Vec<StageCount>,
    pub products: Vec<ProductPerformance>,
    pub daily_output: Vec<DailyOutput>,
    pub pending_orders: usize,
    pub due_soon: Vec<DueOrder>,
    /// Endpoints that failed and were replaced by empty data
    pub degraded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DueOrder {
    pub id: i64,
    pub customer_name: String,
    pub deadline: NaiveDate,
    /// Negative when overdue
    pub days_left: i64,
}

/// Fetch everything the dashboard shows. The production overview is the
/// primary payload and its failure is an error; every other endpoint falls
/// back to empty data.
pub fn load_dashboard(client: &ApiClient, rules: &ReportRules, today: NaiveDate) -> Result<Dashboard> {
    let overview: Value = client
        .get_json(endpoints::PRODUCTION_OVERVIEW, &[])
        .map_err(|e| ReportError::PrimaryFetch {
            what: "production overview",
            reason: e.to_string(),
        })?;

    let mut degraded = Vec::new();
    let mut fetch = |path: &str| -> Value {
        let fetched = client.get_or_default::<Value>(path, &[]);
        if fetched.is_fallback() {
            degraded.push(path.to_string());
        }
        fetched.into_value()
    };

    let stages = fetch(endpoints::STAGE_BREAKDOWN);
    let products = fetch(endpoints::PRODUCT_PERFORMANCE);
    let daily_output = fetch(endpoints::ALKANSYA_DAILY_OUTPUT);
    let orders = fetch(endpoints::ORDERS);
    let accepted = fetch(endpoints::ORDERS_ACCEPTED);

    let orders: Vec<Order> = parse_list("orders", Some(&orders));
    let accepted: Vec<Order> = parse_list("orders_accepted", Some(&accepted));
    let mut daily_output: Vec<DailyOutput> = parse_list("daily_output", Some(&daily_output));
    daily_output.sort_by(|a, b| b.date.cmp(&a.date));
    daily_output.truncate(DAILY_OUTPUT_ROWS);

    Ok(Dashboard {
        overview: parse_section("overview", Some(&overview)),
        stages: parse_list("stage_breakdown", Some(&stages)),
        products: parse_list("product_performance", Some(&products)),
        daily_output,
        pending_orders: pending_orders(&orders, rules).len(),
        due_soon: orders_due_soon(&accepted, rules, today, DUE_SOON_DAYS),
        degraded,
    })
}

/// Orders still awaiting acceptance.
pub fn pending_orders<'a>(orders: &'a [Order], rules: &ReportRules) -> Vec<&'a Order> {
    orders
        .iter()
        .filter(|o| o.is_pending(rules.missing_acceptance_is_pending))
        .collect()
}

/// Accepted orders whose deadline is at most `window_days` away, overdue
/// ones included, soonest first. Completed orders and orders without a
/// usable acceptance date are skipped.
pub fn orders_due_soon(
    accepted: &[Order],
    rules: &ReportRules,
    today: NaiveDate,
    window_days: i64,
) -> Vec<DueOrder> {
    let mut due: Vec<DueOrder> = accepted
        .iter()
        .filter(|o| crate::report::normalize_status(&o.status) != "completed")
        .filter_map(|o| {
            let deadline = o
                .accepted_on()?
                .checked_add_signed(Duration::days(i64::from(rules.deadline_days)))?;
            let days_left = (deadline - today).num_days();
            (days_left <= window_days).then(|| DueOrder {
                id: o.id,
                customer_name: o.customer_name.clone(),
                deadline,
                days_left,
            })
        })
        .collect();
    due.sort_by_key(|d| (d.deadline, d.id));
    due
}

#[derive(Tabled)]
struct KpiRow {
    #[tabled(rename = "METRIC")]
    metric: &'static str,
    #[tabled(rename = "VALUE")]
    value: String,
}

#[derive(Tabled)]
struct StageRow {
    #[tabled(rename = "STAGE")]
    stage: String,
    #[tabled(rename = "IN PRODUCTION")]
    count: String,
}

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "PRODUCED")]
    produced: String,
    #[tabled(rename = "COMPLETION")]
    completion: String,
}

#[derive(Tabled)]
struct OutputRow {
    #[tabled(rename = "DATE")]
    date: String,
    #[tabled(rename = "QUANTITY")]
    quantity: String,
    #[tabled(rename = "PRODUCED BY")]
    produced_by: String,
}

#[derive(Tabled)]
struct DueRow {
    #[tabled(rename = "ORDER")]
    id: i64,
    #[tabled(rename = "CUSTOMER")]
    customer: String,
    #[tabled(rename = "DEADLINE")]
    deadline: String,
    #[tabled(rename = "DAYS LEFT")]
    days_left: String,
}

pub fn render_dashboard(dashboard: &Dashboard) -> String {
    let overview = &dashboard.overview;
    let kpis = vec![
        KpiRow {
            metric: "Total productions",
            value: format_grouped_int(overview.total_productions),
        },
        KpiRow {
            metric: "In progress",
            value: format_grouped_int(overview.in_progress),
        },
        KpiRow {
            metric: "Completed",
            value: format_grouped_int(overview.completed),
        },
        KpiRow {
            metric: "Pending",
            value: format_grouped_int(overview.pending),
        },
        KpiRow {
            metric: "Completion rate",
            value: Cell::Percent(overview.completion_rate).to_string(),
        },
        KpiRow {
            metric: "Orders awaiting acceptance",
            value: dashboard.pending_orders.to_string(),
        },
    ];

    let mut out = String::from("Production Dashboard\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    out.push_str(&Table::new(kpis).with(Style::rounded()).to_string());
    out.push('\n');

    if !dashboard.stages.is_empty() {
        let rows: Vec<StageRow> = dashboard
            .stages
            .iter()
            .map(|s| StageRow {
                stage: s.stage.clone(),
                count: format_grouped_int(s.count),
            })
            .collect();
        out.push_str("\nStage breakdown\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    if !dashboard.products.is_empty() {
        let rows: Vec<ProductRow> = dashboard
            .products
            .iter()
            .map(|p| ProductRow {
                product: p.product_name.clone(),
                produced: format_grouped_int(p.total_produced),
                completion: Cell::Percent(p.completion_rate).to_string(),
            })
            .collect();
        out.push_str("\nProduct performance\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    if !dashboard.daily_output.is_empty() {
        let rows: Vec<OutputRow> = dashboard
            .daily_output
            .iter()
            .map(|d| OutputRow {
                date: d.date.clone(),
                quantity: format_grouped_int(d.quantity),
                produced_by: d.produced_by.clone(),
            })
            .collect();
        out.push_str("\nAlkansya daily output\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    if !dashboard.due_soon.is_empty() {
        let rows: Vec<DueRow> = dashboard
            .due_soon
            .iter()
            .map(|d| DueRow {
                id: d.id,
                customer: d.customer_name.clone(),
                deadline: d.deadline.format("%Y-%m-%d").to_string(),
                days_left: if d.days_left < 0 {
                    format!("overdue by {}", -d.days_left)
                } else {
                    d.days_left.to_string()
                },
            })
            .collect();
        out.push_str("\nOrders due soon\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    if !dashboard.degraded.is_empty() {
        out.push_str(&format!(
            "\nSome data could not be loaded and is shown as empty: {}\n",
            dashboard.degraded.join(", ")
        ));
    }

    out
}
