use serde::{Deserialize, Serialize};

use super::lenient;

/// Element of `GET /production/stage-breakdown`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct StageCount {
    #[serde(default, deserialize_with = "lenient::text")]
    pub stage: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub count: i64,
}

/// Element of `GET /production/product-performance`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct ProductPerformance {
    #[serde(default, deserialize_with = "lenient::text")]
    pub product_name: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_produced: i64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub completion_rate: f64,
}

/// `GET /analytics/sales-dashboard`
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SalesDashboard {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub total_orders: i64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub average_order_value: f64,
    #[serde(default, deserialize_with = "lenient::list")]
    pub top_products: Vec<TopProduct>,
    #[serde(default, deserialize_with = "lenient::list")]
    pub monthly: Vec<MonthlySales>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct TopProduct {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: String,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient::number")]
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MonthlySales {
    #[serde(default, deserialize_with = "lenient::text")]
    pub month: String,
    #[serde(default, deserialize_with = "lenient::number")]
    pub revenue: f64,
    #[serde(default, deserialize_with = "lenient::integer")]
    pub orders: i64,
}
