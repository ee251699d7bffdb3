//! Terminal views over the backend: KPI dashboards, sales analytics and
//! per-order production tracking.

mod dashboard;
mod sales;
mod tracking;

pub use dashboard::{
    load_dashboard, orders_due_soon, pending_orders, render_dashboard, Dashboard, DueOrder,
};
pub use sales::{load_sales, render_sales};
pub use tracking::{load_production_status, render_production_status};

/// Group the digits of a whole number with commas.
pub fn format_grouped_int(value: i64) -> String {
    let negative = value < 0;
    let digits = value.unsigned_abs().to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);

    for (i, ch) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    let mut grouped: String = out.chars().rev().collect();
    if negative {
        grouped.insert(0, '-');
    }
    grouped
}

/// Money amount with two decimals and thousands separators.
pub fn format_amount(value: f64, currency_symbol: &str) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value * 100.0).round() as i64;
    let sign = if cents < 0 { "-" } else { "" };
    let cents = cents.unsigned_abs();
    let whole = i64::try_from(cents / 100).unwrap_or(i64::MAX);
    format!(
        "{}{}{}.{:02}",
        sign,
        currency_symbol,
        format_grouped_int(whole),
        cents % 100
    )
}
