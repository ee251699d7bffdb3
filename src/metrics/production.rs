use serde::{Deserialize, Serialize};

use super::lenient;

/// `GET /production/overview`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProductionOverview {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_productions: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub in_progress: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub completed: i64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub pending: i64,
    /// Percentage, 0-100
    #[serde(default, deserialize_with = "lenient::number")]
    pub completion_rate: f64,
}

/// `GET /production/alkansya-data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct AlkansyaData {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_output: i64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub average_daily: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub max_daily: i64,
    #[serde(default, deserialize_with = "lenient::list")]
    pub recent_output: Vec<DailyOutput>,
}

/// One day of alkansya output
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DailyOutput {
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub produced_by: String,
}

/// `GET /production/made-to-order-data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MadeToOrderData {
    #[serde(default, deserialize_with = "lenient::list")]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OrderItem {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub order_id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub customer_name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub status: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    /// Percentage, 0-100
    #[serde(default, deserialize_with = "lenient::number")]
    pub progress: f64,
    /// ISO date or datetime the order was accepted for production
    #[serde(default, deserialize_with = "lenient::text")]
    pub accepted_at: String,
}

/// `GET /production/output-analytics`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct OutputAnalytics {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_output: i64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub average_daily_output: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub peak_output: i64,
    /// Percentage, 0-100
    #[serde(default, deserialize_with = "lenient::number")]
    pub efficiency: f64,
    /// Percentage, 0-100
    #[serde(default, deserialize_with = "lenient::number")]
    pub on_time_rate: f64,
}

/// Element of `GET /products`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient::integer")]
    pub id: i64,
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::text")]
    pub category_name: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub stock: i64,
}

impl Product {
    pub fn is_alkansya(&self) -> bool {
        self.category_name.trim().eq_ignore_ascii_case("alkansya")
            || self.name.to_ascii_lowercase().contains("alkansya")
    }
}
