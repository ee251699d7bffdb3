pub const ORDERS: &str = "/orders";
pub const ORDERS_ACCEPTED: &str = "/orders/accepted";
pub const PRODUCTION_OVERVIEW: &str = "/production/overview";
pub const OUTPUT_ANALYTICS: &str = "/production/output-analytics";
pub const ALKANSYA_DATA: &str = "/production/alkansya-data";
pub const MADE_TO_ORDER_DATA: &str = "/production/made-to-order-data";
pub const PRODUCT_PERFORMANCE: &str = "/production/product-performance";
pub const STAGE_BREAKDOWN: &str = "/production/stage-breakdown";
pub const PRODUCTS: &str = "/products";
pub const ALKANSYA_DAILY_OUTPUT: &str = "/alkansya-daily-output";
pub const SALES_DASHBOARD: &str = "/analytics/sales-dashboard";
pub const PRODUCTION_REPORT_PDF: &str = "/reports/production.pdf";

pub fn order_production_status(order_id: i64) -> String {
    format!("/orders/{order_id}/production-status")
}
