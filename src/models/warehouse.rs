use sqlx::FromRow;

#[derive(Debug, FromRow)]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    pub location: String,
}

// Association row: how much of one product is stocked at one warehouse.
#[derive(Debug, FromRow)]
pub struct WarehouseProduct {
    pub id: i64,
    pub warehouse_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}
