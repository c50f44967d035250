// src/handlers/product.rs
use std::collections::HashMap;

use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    Json,
};
use serde_json::json;
use tracing::instrument;

use crate::dtos::product::{ProductDetailResponse, ProductWithStock, WarehouseStockRow};
use crate::error::AppError;
use crate::forms::{CreateProductForm, FormData, ProductAction};
use crate::state::AppState;

// GET /products/ - All products with per-warehouse stock and summed quantity
#[instrument(skip(state))]
pub async fn get_products(
    State(state): State<AppState>,
) -> Result<Json<Vec<ProductWithStock>>, AppError> {
    let products = state.products.list().await?;

    let mut rows_by_product: HashMap<i64, Vec<WarehouseStockRow>> = HashMap::new();
    for row in state.stock.all_rows().await? {
        rows_by_product.entry(row.product_id).or_default().push(row);
    }

    let response = products
        .into_iter()
        .map(|product| {
            let warehouses = rows_by_product.remove(&product.id).unwrap_or_default();
            let total_quantity = warehouses.iter().map(|row| row.quantity).sum();
            ProductWithStock {
                product: product.into(),
                warehouses,
                total_quantity,
            }
        })
        .collect();

    Ok(Json(response))
}

// GET /products/{id} - Product, its stock rows, and the warehouse catalog
#[instrument(skip(state), fields(id))]
pub async fn get_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<ProductDetailResponse>, AppError> {
    let product = state
        .products
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    let warehouse_products = state.stock.rows_for_product(product.id).await?;
    let total_quantity = state.stock.total_for_product(product.id).await?;
    let warehouses = state
        .warehouses
        .list()
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    Ok(Json(ProductDetailResponse {
        product: product.into(),
        warehouse_products,
        total_quantity,
        warehouses,
    }))
}

// POST /products/{id} - Update stock quantities, price, or attach a warehouse
#[instrument(skip(state, pairs), fields(id))]
pub async fn update_product(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let product = state
        .products
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Product not found"))?;

    match ProductAction::decode(&FormData::new(pairs))? {
        ProductAction::UpdateQuantity { quantities } => {
            // Rows missing from the submission keep their current quantity.
            for row in state.stock.rows_for_product(product.id).await? {
                let quantity = quantities.get(&row.id).copied().unwrap_or(row.quantity);
                state.stock.update_quantity(row.id, quantity).await?;
            }
        }
        ProductAction::UpdatePrice { price } => {
            if let Some(price) = price {
                state.products.update_price(product.id, price).await?;
            }
        }
        ProductAction::AddWarehouse { warehouse_id, quantity } => {
            let warehouse = state
                .warehouses
                .find(warehouse_id)
                .await?
                .ok_or_else(|| AppError::not_found("Warehouse not found"))?;
            state.stock.create_row(warehouse.id, product.id, quantity).await?;
        }
    }

    Ok(Redirect::to(&format!("/products/{}", product.id)))
}

// GET /create_product/ - Empty form context
pub async fn create_product_form() -> Json<serde_json::Value> {
    Json(json!({}))
}

// POST /create_product/ - Requires non-empty name and price
#[instrument(skip(state, pairs))]
pub async fn create_product(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = CreateProductForm::decode(&FormData::new(pairs))?;
    let product = state
        .products
        .create(&form.name, &form.description, form.price)
        .await?;

    Ok(Redirect::to(&format!("/products/{}", product.id)))
}
