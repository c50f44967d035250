// src/state.rs
use sqlx::SqlitePool;

use crate::repos::{OrderRepo, ProductRepo, StockRepo, UserRepo, WarehouseRepo};

// Per-entity repositories handed to handlers through router state.
#[derive(Clone)]
pub struct AppState {
    pub products: ProductRepo,
    pub warehouses: WarehouseRepo,
    pub stock: StockRepo,
    pub orders: OrderRepo,
    pub users: UserRepo,
}

impl AppState {
    pub fn new(db_pool: SqlitePool) -> Self {
        Self {
            products: ProductRepo::new(db_pool.clone()),
            warehouses: WarehouseRepo::new(db_pool.clone()),
            stock: StockRepo::new(db_pool.clone()),
            orders: OrderRepo::new(db_pool.clone()),
            users: UserRepo::new(db_pool),
        }
    }
}
