use tabled::{settings::Style, Table, Tabled};

use crate::api::{endpoints, ApiClient};
use crate::error::{ReportError, Result};
use crate::metrics::ProductionStatus;
use crate::report::Cell;

pub fn load_production_status(client: &ApiClient, order_id: i64) -> Result<ProductionStatus> {
    client
        .get_json(&endpoints::order_production_status(order_id), &[])
        .map_err(|e| ReportError::PrimaryFetch {
            what: "order production status",
            reason: e.to_string(),
        })
}

#[derive(Tabled)]
struct StageRow {
    #[tabled(rename = "STAGE")]
    name: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "PROGRESS")]
    progress: String,
}

pub fn render_production_status(status: &ProductionStatus) -> String {
    let mut out = format!("Order #{}", status.order_id);
    if !status.product_name.is_empty() {
        out.push_str(&format!(" - {}", status.product_name));
    }
    out.push('\n');
    out.push_str(&format!("  Status:   {}\n", status.status));
    if !status.current_stage.is_empty() {
        out.push_str(&format!("  Stage:    {}\n", status.current_stage));
    }
    out.push_str(&format!(
        "  Progress: {}\n",
        Cell::Percent(status.overall_progress)
    ));

    if status.stages.is_empty() {
        out.push_str("  No production stages recorded.\n");
        return out;
    }

    let rows: Vec<StageRow> = status
        .stages
        .iter()
        .map(|s| StageRow {
            name: s.name.clone(),
            status: s.status.clone(),
            progress: Cell::Percent(s.progress).to_string(),
        })
        .collect();
    out.push_str(&Table::new(rows).with(Style::rounded()).to_string());
    out.push('\n');
    out
}
