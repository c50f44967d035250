pub mod auth;
pub mod dashboard;
pub mod orders;
pub mod products;
pub mod warehouses;

use axum::{middleware, Router};
use crate::middleware::auth::require_session;
use crate::state::AppState;

pub fn create_router() -> Router<AppState> {
    // Every inventory page sits behind the session check; only the
    // credential endpoints are reachable anonymously.
    let protected = Router::new()
        .merge(dashboard::routes())
        .merge(orders::routes())
        .merge(products::routes())
        .merge(warehouses::routes())
        .layer(middleware::from_fn(require_session));

    protected.merge(auth::routes())
}
