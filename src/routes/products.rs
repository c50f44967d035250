use axum::{
    routing::get,
    Router,
};
use crate::handlers::product::{
    get_products, get_product, update_product, create_product_form, create_product,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/products/", get(get_products))
        .route("/products/{id}", get(get_product).post(update_product))
        .route("/create_product/", get(create_product_form).post(create_product))
}
