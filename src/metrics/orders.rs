use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::lenient;

/// Element of `GET /orders` and `GET /orders/accepted`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Order {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::optional_text")]
    pub acceptance_status: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub accepted_at: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_price: f64,
}

impl Order {
    /// Whether the order still awaits an admin decision. Orders with no
    /// acceptance status at all follow `missing_is_pending`.
    pub fn is_pending(&self, missing_is_pending: bool) -> bool {
        match self.acceptance_status.as_deref() {
            Some(status) => status.trim().eq_ignore_ascii_case("pending"),
            None => missing_is_pending,
        }
    }

    pub fn accepted_on(&self) -> Option<NaiveDate> {
        parse_date(&self.accepted_at)
    }
}

/// `GET /orders/{id}/production-status`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProductionStatus {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub order_id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub current_stage: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub overall_progress: f64,
    #[serde(default, deserialize_with = "lenient::list")]
    pub stages: Vec<StageProgress>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StageProgress {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub progress: f64,
}

/// Parse the date part of an ISO date or datetime string.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    let date_part = value.get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}
