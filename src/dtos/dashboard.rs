// src/dtos/dashboard.rs
use serde::Serialize;

#[derive(Serialize)]
pub struct ProductSummary {
    pub id: i64,
    pub name: String,
}

// Flat context for the landing page.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub products_amount: i64,
    pub warehouses_amount: i64,
    pub active_orders_amount: i64,
    pub completed_orders_amount: i64,
    pub most_popular_product: Option<ProductSummary>,
    pub most_popular_quantity: i64,
    pub total_month_income: f64,
    pub low_stock_products: i64,
    pub total_users: i64,
}
