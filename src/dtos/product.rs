// src/dtos/product.rs
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

use crate::dtos::warehouse::WarehouseResponse;

#[derive(Serialize)]
pub struct ProductResponse {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<crate::models::product::Product> for ProductResponse {
    fn from(product: crate::models::product::Product) -> Self {
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            created_at: product.created_at,
            updated_at: product.updated_at,
        }
    }
}

// One warehouse's stock of a product, as stored in warehouse_products.
#[derive(Serialize, FromRow)]
pub struct WarehouseStockRow {
    pub id: i64,
    pub product_id: i64,
    pub warehouse_id: i64,
    pub warehouse_name: String,
    pub quantity: i64,
}

// Product list entry: the product, its stock rows, and the summed quantity.
#[derive(Serialize)]
pub struct ProductWithStock {
    pub product: ProductResponse,
    pub warehouses: Vec<WarehouseStockRow>,
    pub total_quantity: i64,
}

// Detail page context; the warehouse catalog populates the
// "add to warehouse" selector.
#[derive(Serialize)]
pub struct ProductDetailResponse {
    pub product: ProductResponse,
    pub warehouse_products: Vec<WarehouseStockRow>,
    pub total_quantity: i64,
    pub warehouses: Vec<WarehouseResponse>,
}
