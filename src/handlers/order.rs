// src/handlers/order.rs
use std::collections::HashMap;

use axum::{
    extract::{Form, Path, State},
    response::Redirect,
    Json,
};
use tracing::instrument;

use crate::dtos::order::{CreateOrderContext, OrderItemResponse, OrderResponse};
use crate::error::AppError;
use crate::forms::{CreateOrderForm, FormData, OrderAction};
use crate::models::order::OrderStatus;
use crate::state::AppState;

// GET /orders/ - All orders with their items and computed totals
#[instrument(skip(state))]
pub async fn get_orders(
    State(state): State<AppState>,
) -> Result<Json<Vec<OrderResponse>>, AppError> {
    let orders = state.orders.list().await?;

    let mut items_by_order: HashMap<i64, Vec<OrderItemResponse>> = HashMap::new();
    for item in state.orders.list_items().await? {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let response = orders
        .into_iter()
        .map(|order| {
            let items = items_by_order.remove(&order.id).unwrap_or_default();
            OrderResponse::new(order, items)
        })
        .collect();

    Ok(Json(response))
}

// GET /orders/{id} - Single order with items
#[instrument(skip(state), fields(id))]
pub async fn get_order(
    Path(id): Path<i64>,
    State(state): State<AppState>,
) -> Result<Json<OrderResponse>, AppError> {
    let order = state
        .orders
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;
    let items = state.orders.items_for_order(order.id).await?;

    Ok(Json(OrderResponse::new(order, items)))
}

// POST /orders/{id} - Update status or item quantities
#[instrument(skip(state, pairs), fields(id))]
pub async fn update_order(
    Path(id): Path<i64>,
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let order = state
        .orders
        .find(id)
        .await?
        .ok_or_else(|| AppError::not_found("Order not found"))?;

    match OrderAction::decode(&FormData::new(pairs))? {
        OrderAction::UpdateStatus { status } => {
            state.orders.update_status(order.id, status).await?;
        }
        OrderAction::UpdateItems { quantities } => {
            // Items missing from the submission keep their current quantity.
            for item in state.orders.items_for_order(order.id).await? {
                let quantity = quantities.get(&item.id).copied().unwrap_or(item.quantity);
                state.orders.update_item_quantity(item.id, quantity).await?;
            }
        }
    }

    Ok(Redirect::to(&format!("/orders/{}", order.id)))
}

// GET /create_order/ - Product catalog for the selection form
#[instrument(skip(state))]
pub async fn create_order_form(
    State(state): State<AppState>,
) -> Result<Json<CreateOrderContext>, AppError> {
    let products = state.products.list().await?;
    Ok(Json(CreateOrderContext {
        products: products.into_iter().map(Into::into).collect(),
    }))
}

// POST /create_order/ - New Pending order from parallel id/quantity lists
#[instrument(skip(state, pairs))]
pub async fn create_order(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Result<Redirect, AppError> {
    let form = CreateOrderForm::decode(&FormData::new(pairs))?;

    // Unknown products are rejected before the order row exists; the item
    // inserts below are independent writes, not a transaction.
    for (product_id, _) in &form.items {
        if state.products.find(*product_id).await?.is_none() {
            return Err(AppError::not_found(format!("Product {product_id} not found")));
        }
    }

    let order = state.orders.create(OrderStatus::Pending).await?;
    for (product_id, quantity) in form.items {
        state.orders.add_item(order.id, product_id, quantity).await?;
    }

    Ok(Redirect::to(&format!("/orders/{}", order.id)))
}
