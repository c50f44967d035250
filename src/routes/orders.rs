use axum::{
    routing::get,
    Router,
};
use crate::handlers::order::{
    get_orders, get_order, update_order, create_order_form, create_order,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/orders/", get(get_orders))
        .route("/orders/{id}", get(get_order).post(update_order))
        .route("/create_order/", get(create_order_form).post(create_order))
}
