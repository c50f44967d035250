use sqlx::SqlitePool;

use crate::dtos::product::WarehouseStockRow;
use crate::dtos::warehouse::ProductStockRow;
use crate::error::AppError;
use crate::models::warehouse::WarehouseProduct;

// Data access for warehouse_products, the association between a warehouse
// and a product. Nothing here enforces uniqueness of the pair: attaching the
// same product to the same warehouse twice yields two independent rows.
#[derive(Clone)]
pub struct StockRepo {
    pool: SqlitePool,
}

impl StockRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn rows_for_product(&self, product_id: i64) -> Result<Vec<WarehouseStockRow>, AppError> {
        let rows = sqlx::query_as::<_, WarehouseStockRow>(
            "SELECT wp.id, wp.product_id, wp.warehouse_id, w.name AS warehouse_name, wp.quantity
             FROM warehouse_products wp
             JOIN warehouses w ON wp.warehouse_id = w.id
             WHERE wp.product_id = ?1
             ORDER BY wp.id",
        )
        .bind(product_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    // Every stock row with its warehouse, for the product list page.
    pub async fn all_rows(&self) -> Result<Vec<WarehouseStockRow>, AppError> {
        let rows = sqlx::query_as::<_, WarehouseStockRow>(
            "SELECT wp.id, wp.product_id, wp.warehouse_id, w.name AS warehouse_name, wp.quantity
             FROM warehouse_products wp
             JOIN warehouses w ON wp.warehouse_id = w.id
             ORDER BY wp.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn rows_for_warehouse(&self, warehouse_id: i64) -> Result<Vec<ProductStockRow>, AppError> {
        let rows = sqlx::query_as::<_, ProductStockRow>(
            "SELECT wp.id, wp.warehouse_id, wp.product_id, p.name AS product_name, wp.quantity
             FROM warehouse_products wp
             JOIN products p ON wp.product_id = p.id
             WHERE wp.warehouse_id = ?1
             ORDER BY wp.id",
        )
        .bind(warehouse_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create_row(
        &self,
        warehouse_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<WarehouseProduct, AppError> {
        let row = sqlx::query_as::<_, WarehouseProduct>(
            "INSERT INTO warehouse_products (warehouse_id, product_id, quantity)
             VALUES (?1, ?2, ?3)
             RETURNING id, warehouse_id, product_id, quantity",
        )
        .bind(warehouse_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update_quantity(&self, row_id: i64, quantity: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE warehouse_products SET quantity = ?1 WHERE id = ?2")
            .bind(quantity)
            .bind(row_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn total_for_product(&self, product_id: i64) -> Result<i64, AppError> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COALESCE(SUM(quantity), 0) FROM warehouse_products WHERE product_id = ?1",
        )
        .bind(product_id)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }

    pub async fn low_stock_count(&self, threshold: i64) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM warehouse_products WHERE quantity < ?1",
        )
        .bind(threshold)
        .fetch_one(&self.pool)
        .await?;
        Ok(count)
    }
}
