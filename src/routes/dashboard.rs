use axum::{routing::get, Router};
use crate::handlers::dashboard::get_dashboard;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/", get(get_dashboard))
}
