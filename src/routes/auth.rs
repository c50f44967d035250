use axum::{routing::get, Router};
use crate::handlers::auth::{login_form, login, logout};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/login/", get(login_form).post(login))
        .route("/logout/", get(logout))
}
