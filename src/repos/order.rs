use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};

use crate::dtos::order::OrderItemResponse;
use crate::error::AppError;
use crate::models::order::{Order, OrderItem, OrderStatus};

// Product with the most order-item rows; quantity summed over those rows.
#[derive(Debug, FromRow)]
pub struct PopularProduct {
    pub id: i64,
    pub name: String,
    pub total_quantity: i64,
}

#[derive(Clone)]
pub struct OrderRepo {
    pool: SqlitePool,
}

impl OrderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Order>, AppError> {
        let orders = sqlx::query_as::<_, Order>(
            "SELECT id, status, created_at, updated_at FROM orders ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(orders)
    }

    pub async fn find(&self, id: i64) -> Result<Option<Order>, AppError> {
        let order = sqlx::query_as::<_, Order>(
            "SELECT id, status, created_at, updated_at FROM orders WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(order)
    }

    pub async fn create(&self, status: OrderStatus) -> Result<Order, AppError> {
        let now = Utc::now();
        let order = sqlx::query_as::<_, Order>(
            "INSERT INTO orders (status, created_at, updated_at) VALUES (?1, ?2, ?2)
             RETURNING id, status, created_at, updated_at",
        )
        .bind(status.as_str())
        .bind(now)
        .fetch_one(&self.pool)
        .await?;
        Ok(order)
    }

    pub async fn update_status(&self, id: i64, status: OrderStatus) -> Result<(), AppError> {
        sqlx::query("UPDATE orders SET status = ?1, updated_at = ?2 WHERE id = ?3")
            .bind(status.as_str())
            .bind(Utc::now())
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found("Order not found"));
        }
        Ok(())
    }

    pub async fn items_for_order(&self, order_id: i64) -> Result<Vec<OrderItemResponse>, AppError> {
        let items = sqlx::query_as::<_, OrderItemResponse>(
            "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name,
                    p.price AS price, oi.quantity, p.price * oi.quantity AS item_total
             FROM order_items oi
             JOIN products p ON oi.product_id = p.id
             WHERE oi.order_id = ?1
             ORDER BY oi.id",
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    // Every item row with its product, for the order list page.
    pub async fn list_items(&self) -> Result<Vec<OrderItemResponse>, AppError> {
        let items = sqlx::query_as::<_, OrderItemResponse>(
            "SELECT oi.id, oi.order_id, oi.product_id, p.name AS product_name,
                    p.price AS price, oi.quantity, p.price * oi.quantity AS item_total
             FROM order_items oi
             JOIN products p ON oi.product_id = p.id
             ORDER BY oi.id",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(items)
    }

    pub async fn add_item(
        &self,
        order_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Result<OrderItem, AppError> {
        let item = sqlx::query_as::<_, OrderItem>(
            "INSERT INTO order_items (order_id, product_id, quantity) VALUES (?1, ?2, ?3)
             RETURNING id, order_id, product_id, quantity",
        )
        .bind(order_id)
        .bind(product_id)
        .bind(quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(item)
    }

    // Item edits deliberately leave the parent order's updated_at alone.
    pub async fn update_item_quantity(&self, item_id: i64, quantity: i64) -> Result<(), AppError> {
        sqlx::query("UPDATE order_items SET quantity = ?1 WHERE id = ?2")
            .bind(quantity)
            .bind(item_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    pub async fn count_by_status(&self, status: OrderStatus) -> Result<i64, AppError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM orders WHERE status = ?1")
            .bind(status.as_str())
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    // Income = sum of item totals over Completed orders created at or after
    // the given instant.
    pub async fn completed_income_since(&self, since: DateTime<Utc>) -> Result<f64, AppError> {
        let income = sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(p.price * oi.quantity), 0.0)
             FROM orders o
             JOIN order_items oi ON oi.order_id = o.id
             JOIN products p ON oi.product_id = p.id
             WHERE o.status = ?1 AND o.created_at >= ?2",
        )
        .bind(OrderStatus::Completed.as_str())
        .bind(since)
        .fetch_one(&self.pool)
        .await?;
        Ok(income)
    }

    // Ties on the row count fall to the lowest product id.
    pub async fn most_popular_product(&self) -> Result<Option<PopularProduct>, AppError> {
        let popular = sqlx::query_as::<_, PopularProduct>(
            "SELECT p.id, p.name, SUM(oi.quantity) AS total_quantity
             FROM products p
             JOIN order_items oi ON oi.product_id = p.id
             GROUP BY p.id, p.name
             ORDER BY COUNT(oi.id) DESC, p.id
             LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(popular)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use sqlx::SqlitePool;

    use crate::database::test_pool;
    use crate::repos::ProductRepo;

    async fn repos() -> (SqlitePool, ProductRepo, OrderRepo) {
        let pool = test_pool().await;
        (pool.clone(), ProductRepo::new(pool.clone()), OrderRepo::new(pool))
    }

    async fn backdate_order(pool: &SqlitePool, order_id: i64, by_days: i64) {
        sqlx::query("UPDATE orders SET created_at = ?1 WHERE id = ?2")
            .bind(Utc::now() - Duration::days(by_days))
            .bind(order_id)
            .execute(pool)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_item_totals_and_order_total() {
        let (_, products, orders) = repos().await;
        let brick = products.create("Brick", "", 100.0).await.unwrap();
        let beam = products.create("Beam", "", 200.0).await.unwrap();

        let order = orders.create(OrderStatus::Pending).await.unwrap();
        orders.add_item(order.id, brick.id, 5).await.unwrap();
        orders.add_item(order.id, beam.id, 2).await.unwrap();

        let items = orders.items_for_order(order.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].item_total, 500.0);
        assert_eq!(items[1].item_total, 400.0);

        let total: f64 = items.iter().map(|item| item.price * item.quantity as f64).sum();
        assert_eq!(total, 900.0);
    }

    #[tokio::test]
    async fn test_update_item_keeps_order_timestamp() {
        let (_, products, orders) = repos().await;
        let brick = products.create("Brick", "", 100.0).await.unwrap();
        let order = orders.create(OrderStatus::Pending).await.unwrap();
        let item = orders.add_item(order.id, brick.id, 5).await.unwrap();

        orders.update_item_quantity(item.id, 8).await.unwrap();

        let items = orders.items_for_order(order.id).await.unwrap();
        assert_eq!(items[0].quantity, 8);
        let reloaded = orders.find(order.id).await.unwrap().unwrap();
        assert_eq!(reloaded.updated_at, order.updated_at);
    }

    #[tokio::test]
    async fn test_update_status_refreshes_timestamp() {
        let (_, _, orders) = repos().await;
        let order = orders.create(OrderStatus::Pending).await.unwrap();

        orders.update_status(order.id, OrderStatus::Completed).await.unwrap();

        let reloaded = orders.find(order.id).await.unwrap().unwrap();
        assert_eq!(reloaded.status, "Completed");
        assert!(reloaded.updated_at >= order.updated_at);
        assert_eq!(orders.count_by_status(OrderStatus::Completed).await.unwrap(), 1);
        assert_eq!(orders.count_by_status(OrderStatus::Pending).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_monthly_income_counts_only_recent_completed_orders() {
        let (pool, products, orders) = repos().await;
        let brick = products.create("Brick", "", 100.0).await.unwrap();
        let beam = products.create("Beam", "", 200.0).await.unwrap();

        // Pending this month: excluded regardless of value.
        let pending = orders.create(OrderStatus::Pending).await.unwrap();
        orders.add_item(pending.id, brick.id, 5).await.unwrap();

        // Completed this month: counted.
        let completed = orders.create(OrderStatus::Completed).await.unwrap();
        orders.add_item(completed.id, beam.id, 2).await.unwrap();

        // Completed long ago: excluded by the cutoff.
        let stale = orders.create(OrderStatus::Completed).await.unwrap();
        orders.add_item(stale.id, beam.id, 9).await.unwrap();
        backdate_order(&pool, stale.id, 60).await;

        let income = orders
            .completed_income_since(Utc::now() - Duration::days(30))
            .await
            .unwrap();
        assert_eq!(income, 400.0);
    }

    #[tokio::test]
    async fn test_most_popular_product_by_item_row_count() {
        let (_, products, orders) = repos().await;
        let brick = products.create("Brick", "", 100.0).await.unwrap();
        let beam = products.create("Beam", "", 200.0).await.unwrap();

        let first = orders.create(OrderStatus::Pending).await.unwrap();
        orders.add_item(first.id, beam.id, 50).await.unwrap();

        let second = orders.create(OrderStatus::Completed).await.unwrap();
        orders.add_item(second.id, brick.id, 1).await.unwrap();

        let third = orders.create(OrderStatus::Completed).await.unwrap();
        orders.add_item(third.id, brick.id, 2).await.unwrap();

        // Brick appears in two item rows, beam in one; row count wins even
        // though beam's quantity is larger.
        let popular = orders.most_popular_product().await.unwrap().unwrap();
        assert_eq!(popular.id, brick.id);
        assert_eq!(popular.total_quantity, 3);
    }

    #[tokio::test]
    async fn test_most_popular_product_empty() {
        let (_, _, orders) = repos().await;
        assert!(orders.most_popular_product().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_deleting_order_cascades_to_items() {
        let (_, products, orders) = repos().await;
        let brick = products.create("Brick", "", 100.0).await.unwrap();
        let order = orders.create(OrderStatus::Pending).await.unwrap();
        orders.add_item(order.id, brick.id, 5).await.unwrap();

        orders.delete(order.id).await.unwrap();

        assert!(orders.list_items().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleting_product_cascades_to_items() {
        let (_, products, orders) = repos().await;
        let brick = products.create("Brick", "", 100.0).await.unwrap();
        let order = orders.create(OrderStatus::Pending).await.unwrap();
        orders.add_item(order.id, brick.id, 5).await.unwrap();

        products.delete(brick.id).await.unwrap();

        assert!(orders.items_for_order(order.id).await.unwrap().is_empty());
    }
}
