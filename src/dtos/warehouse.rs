// src/dtos/warehouse.rs
use serde::Serialize;
use sqlx::FromRow;

#[derive(Serialize)]
pub struct WarehouseResponse {
    pub id: i64,
    pub name: String,
    pub location: String,
}

impl From<crate::models::warehouse::Warehouse> for WarehouseResponse {
    fn from(warehouse: crate::models::warehouse::Warehouse) -> Self {
        Self {
            id: warehouse.id,
            name: warehouse.name,
            location: warehouse.location,
        }
    }
}

// One product's stock at a warehouse, as stored in warehouse_products.
#[derive(Serialize, FromRow)]
pub struct ProductStockRow {
    pub id: i64,
    pub warehouse_id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
}

// Used for both the warehouse list entries and the detail page.
#[derive(Serialize)]
pub struct WarehouseWithStock {
    pub warehouse: WarehouseResponse,
    pub warehouse_products: Vec<ProductStockRow>,
    pub total_quantity: i64,
}
