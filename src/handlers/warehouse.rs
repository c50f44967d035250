// src/handlers/warehouse.rs
use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    Json,
};
use serde_json::json;
use tracing::instrument;

use crate::dtos::warehouse::WarehouseWithStock;
use crate::error::AppError;
use crate::forms::{CreateWarehouseForm, FormData, WarehouseAction};
use crate::state::AppState;

// GET /warehouses/ - All warehouses with stock rows and summed quantity
#[instrument(skip(state))]
pub async fn get_warehouses(
    State(state): State<AppState>,
) -> Result<Json<Vec<WarehouseWithStock>>, AppError> {
    let warehouses = state.warehouses.list().await?;

    let mut response = Vec::with_capacity(warehouses.len());
    for warehouse in warehouses {
        let warehouse_products = state.stock.rows_for_warehouse(warehouse.id).await?;
        let total_quantity = warehouse_products.iter().map(|row| row.quantity).sum();
        response.push(WarehouseWithStock {
            warehouse: warehouse.into(),
            warehouse_products,
            total_quantity,
        });
    }

    Ok(Json(response))
}

// GET /warehouses/{id} - Single warehouse with its stock rows
#[instrument(skip(state), fields(id))]
pub async fn get_warehouse(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<WarehouseWithStock>, AppError> {
    let warehouse = state
        .warehouses
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Warehouse not found"))?;

    let warehouse_products = state.stock.rows_for_warehouse(warehouse.id).await?;
    let total_quantity = warehouse_products.iter().map(|row| row.quantity).sum();

    Ok(Json(WarehouseWithStock {
        warehouse: warehouse.into(),
        warehouse_products,
        total_quantity,
    }))
}

// POST /warehouses/{id} - Overwrite name and location
#[instrument(skip(state, pairs), fields(id))]
pub async fn update_warehouse(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let warehouse = state
        .warehouses
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Warehouse not found"))?;

    match WarehouseAction::decode(&FormData::new(pairs))? {
        WarehouseAction::Update { name, location } => {
            state.warehouses.update(warehouse.id, &name, &location).await?;
        }
    }

    Ok(Redirect::to(&format!("/warehouses/{}", warehouse.id)))
}

// GET /create_warehouse/ - Empty form context
pub async fn create_warehouse_form() -> Json<serde_json::Value> {
    Json(json!({}))
}

// POST /create_warehouse/ - Requires non-empty name and location
#[instrument(skip(state, pairs))]
pub async fn create_warehouse(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = CreateWarehouseForm::decode(&FormData::new(pairs))?;
    let warehouse = state.warehouses.create(&form.name, &form.location).await?;

    Ok(Redirect::to(&format!("/warehouses/{}", warehouse.id)))
}
