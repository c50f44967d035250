use axum::{
    routing::get,
    Router,
};
use crate::handlers::warehouse::{
    get_warehouses, get_warehouse, update_warehouse, create_warehouse_form, create_warehouse,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/warehouses/", get(get_warehouses))
        .route("/warehouses/{id}", get(get_warehouse).post(update_warehouse))
        .route("/create_warehouse/", get(create_warehouse_form).post(create_warehouse))
}
