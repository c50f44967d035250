use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::warehouse::Warehouse;

#[derive(Clone)]
pub struct WarehouseRepo {
    pool: SqlitePool,
}

impl WarehouseRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Warehouse>, AppError> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, location FROM warehouses ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(warehouses)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Warehouse>, AppError> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            "SELECT id, name, location FROM warehouses WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(warehouse)
    }

    pub async fn create(&self, name: &str, location: &str) -> Result<Warehouse, AppError> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            "INSERT INTO warehouses (name, location) VALUES (?1, ?2)
             RETURNING id, name, location",
        )
        .bind(name)
        .bind(location)
        .fetch_one(&self.pool)
        .await?;
        Ok(warehouse)
    }

    pub async fn update(&self, id: i64, name: &str, location: &str) -> Result<(), AppError> {
        sqlx::query("UPDATE warehouses SET name = ?1, location = ?2 WHERE id = ?3")
            .bind(name)
            .bind(location)
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM warehouses WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Warehouse not found"));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM warehouses")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
