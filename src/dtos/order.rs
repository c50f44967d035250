// src/dtos/order.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::dtos::product::ProductResponse;
use crate::models::order::Order;

// Line item joined with its product; item_total is price * quantity.
#[derive(Serialize, FromRow)]
pub struct OrderItemResponse {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub price: f64,
    pub quantity: i64,
    pub item_total: f64,
}

#[derive(Serialize)]
pub struct OrderResponse {
    pub id: i64,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub items: Vec<OrderItemResponse>,
    pub total_price: f64,
}

impl OrderResponse {
    // total_price is derived from the items, never stored.
    pub fn new(order: Order, items: Vec<OrderItemResponse>) -> Self {
        let total_price = items.iter().map(|item| item.item_total).sum();
        Self {
            id: order.id,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
            items,
            total_price,
        }
    }
}

// Context for the order creation form: the catalog to pick from.
#[derive(Serialize)]
pub struct CreateOrderContext {
    pub products: Vec<ProductResponse>,
}
