// src/handlers/dashboard.rs
use axum::{extract::State, Extension, Json};
use chrono::{DateTime, Datelike, TimeZone, Utc};
use tracing::instrument;

use crate::dtos::dashboard::{DashboardResponse, ProductSummary};
use crate::error::AppError;
use crate::middleware::auth::SessionContext;
use crate::models::order::OrderStatus;
use crate::state::AppState;

// A stock row counts as low once its quantity drops below this many units.
const LOW_STOCK_THRESHOLD: i64 = 10;

// GET / - Summary statistics for the landing page. Read-only.
#[instrument(skip(state, session))]
pub async fn get_dashboard(
    State(state): State<AppState>,
    Extension(session): Extension<SessionContext>,
) -> Result<Json<DashboardResponse>, AppError> {
    tracing::debug!(user_id = session.user_id, user = %session.username, "Rendering dashboard");

    let products_amount = state.products.count().await?;
    let warehouses_amount = state.warehouses.count().await?;
    let active_orders_amount = state.orders.count_by_status(OrderStatus::Pending).await?;
    let completed_orders_amount = state.orders.count_by_status(OrderStatus::Completed).await?;

    let popular = state.orders.most_popular_product().await?;
    let most_popular_quantity = popular.as_ref().map(|p| p.total_quantity).unwrap_or(0);
    let most_popular_product = popular.map(|p| ProductSummary { id: p.id, name: p.name });

    let total_month_income = state.orders.completed_income_since(start_of_month()).await?;
    let low_stock_products = state.stock.low_stock_count(LOW_STOCK_THRESHOLD).await?;
    let total_users = state.users.count().await?;

    Ok(Json(DashboardResponse {
        products_amount,
        warehouses_amount,
        active_orders_amount,
        completed_orders_amount,
        most_popular_product,
        most_popular_quantity,
        total_month_income,
        low_stock_products,
        total_users,
    }))
}

// First instant of the current calendar month. UTC has no ambiguous local
// times, so the fallback arm is never taken.
fn start_of_month() -> DateTime<Utc> {
    let now = Utc::now();
    Utc.with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .unwrap_or(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn test_start_of_month_is_a_floor() {
        let start = start_of_month();
        let now = Utc::now();
        assert!(start <= now);
        assert_eq!(start.day(), 1);
        assert_eq!(start.month(), now.month());
        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
    }
}
