use tabled::{settings::Style, Table, Tabled};

use crate::api::{endpoints, ApiClient};
use crate::error::{ReportError, Result};
use crate::metrics::SalesDashboard;

use super::{format_amount, format_grouped_int};

/// The sales dashboard is a single payload, so its failure is an error.
pub fn load_sales(client: &ApiClient) -> Result<SalesDashboard> {
    client
        .get_json(endpoints::SALES_DASHBOARD, &[])
        .map_err(|e| ReportError::PrimaryFetch {
            what: "sales analytics",
            reason: e.to_string(),
        })
}

#[derive(Tabled)]
struct TopProductRow {
    #[tabled(rename = "#")]
    rank: usize,
    #[tabled(rename = "PRODUCT")]
    name: String,
    #[tabled(rename = "SOLD")]
    quantity: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
}

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "MONTH")]
    month: String,
    #[tabled(rename = "ORDERS")]
    orders: String,
    #[tabled(rename = "REVENUE")]
    revenue: String,
}

pub fn render_sales(sales: &SalesDashboard, currency_symbol: &str) -> String {
    let mut out = String::from("Sales Dashboard\n");
    out.push_str(&"-".repeat(50));
    out.push('\n');
    out.push_str(&format!(
        "Total revenue:       {}\n",
        format_amount(sales.total_revenue, currency_symbol)
    ));
    out.push_str(&format!(
        "Total orders:        {}\n",
        format_grouped_int(sales.total_orders)
    ));
    out.push_str(&format!(
        "Average order value: {}\n",
        format_amount(sales.average_order_value, currency_symbol)
    ));

    if !sales.top_products.is_empty() {
        let rows: Vec<TopProductRow> = sales
            .top_products
            .iter()
            .enumerate()
            .map(|(idx, p)| TopProductRow {
                rank: idx + 1,
                name: p.name.clone(),
                quantity: format_grouped_int(p.quantity),
                revenue: format_amount(p.revenue, currency_symbol),
            })
            .collect();
        out.push_str("\nTop products\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    if !sales.monthly.is_empty() {
        let rows: Vec<MonthRow> = sales
            .monthly
            .iter()
            .map(|m| MonthRow {
                month: m.month.clone(),
                orders: format_grouped_int(m.orders),
                revenue: format_amount(m.revenue, currency_symbol),
            })
            .collect();
        out.push_str("\nMonthly sales\n");
        out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
        out.push('\n');
    }

    out
}
