use chrono::Utc;
use sqlx::SqlitePool;

use crate::error::AppError;
use crate::models::product::Product;

#[derive(Clone)]
pub struct ProductRepo {
    pool: SqlitePool,
}

impl ProductRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Product>, AppError> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, created_at, updated_at
             FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, description, price, created_at, updated_at
             FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    // Timestamps are stamped here, not by the database.
    pub async fn create(&self, name: &str, description: &str, price: f64) -> Result<Product, AppError> {
        let now = Utc::now();
        let product = sqlx::query_as::<_, Product>(
            "INSERT INTO products (name, description, price, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?4)
             RETURNING id, name, description, price, created_at, updated_at",
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn update_price(&self, id: i64, price: f64) -> Result<(), AppError> {
        sqlx::query("UPDATE products SET price = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(price)
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Product not found"));
        }
        Ok(())
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_pool;

    #[tokio::test]
    async fn test_create_stamps_timestamps() {
        let repo = ProductRepo::new(test_pool().await);
        let product = repo.create("Brick", "Clay brick", 100.0).await.unwrap();

        assert_eq!(product.name, "Brick");
        assert_eq!(product.price, 100.0);
        assert_eq!(product.created_at, product.updated_at);
    }

    #[tokio::test]
    async fn test_update_price_refreshes_updated_at() {
        let repo = ProductRepo::new(test_pool().await);
        let product = repo.create("Brick", "", 100.0).await.unwrap();

        repo.update_price(product.id, 250.5).await.unwrap();

        let updated = repo.find(product.id).await.unwrap().unwrap();
        assert_eq!(updated.price, 250.5);
        assert!(updated.updated_at >= product.updated_at);
        assert_eq!(updated.created_at, product.created_at);
    }

    #[tokio::test]
    async fn test_list_and_count() {
        let repo = ProductRepo::new(test_pool().await);
        assert_eq!(repo.count().await.unwrap(), 0);

        repo.create("Brick", "", 100.0).await.unwrap();
        repo.create("Beam", "", 200.0).await.unwrap();

        let products = repo.list().await.unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Brick");
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_find_missing_returns_none() {
        let repo = ProductRepo::new(test_pool().await);
        assert!(repo.find(42).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_missing_is_not_found() {
        let repo = ProductRepo::new(test_pool().await);
        assert!(matches!(
            repo.delete(42).await,
            Err(AppError::NotFound(_))
        ));
    }
}
