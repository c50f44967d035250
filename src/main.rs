// src/main.rs
mod routes;
mod handlers;
mod models;
mod database;
mod middleware;
mod state;
mod dtos;
mod error;
mod auth;
mod forms;
mod repos;

use tracing_subscriber::fmt::init as tracing_init;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use dotenvy::dotenv;
use std::net::{SocketAddr, IpAddr};

use crate::error::AppError;
use crate::state::AppState;

#[tokio::main]
async fn main() {
    // Initialize logging
    tracing_init();

    // Load environment variables
    dotenv().ok();

    // Create database pool and schema
    let database_url = std::env::var("DATABASE_URL")
        .unwrap_or_else(|_| "sqlite://stockroom.db".to_string());
    let db_pool = database::create_pool(&database_url).await
        .expect("Failed to create database pool");
    database::init_schema(&db_pool).await
        .expect("Failed to initialize database schema");

    // Create application state
    let app_state = state::AppState::new(db_pool);

    // Seed the first staff account on an empty credential store
    if let Err(e) = bootstrap_first_user(&app_state).await {
        tracing::warn!(error = ?e, "Bootstrap user not created");
    }

    let app = routes::create_router()
        .with_state(app_state)
        .layer(TraceLayer::new_for_http());

    // Start server with HOST/PORT env and graceful port selection
    let host_str = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
    let host: IpAddr = host_str.parse().unwrap_or_else(|_| "127.0.0.1".parse().unwrap());
    let base_port = std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()).unwrap_or(3000);

    // Try base_port..base_port+20 to avoid crash when address is in use
    let listener = {
        let mut bound = None;
        for offset in 0u16..=20 {
            let port = base_port.saturating_add(offset);
            let addr = SocketAddr::from((host, port));
            match TcpListener::bind(addr).await {
                Ok(l) => { bound = Some((l, addr)); break; }
                Err(e) => {
                    if offset == 0 { tracing::warn!(%addr, error=%e, "Port in use, trying next"); }
                }
            }
        }
        match bound {
            Some((l, addr)) => {
                tracing::info!("Server running on {}", addr);
                l
            }
            None => {
                tracing::error!("Failed to bind to any port starting at {} on {}", base_port, host);
                return;
            }
        }
    };

    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error=%e, "Server error");
    }
}

// A fresh deployment has nobody who can log in; BOOTSTRAP_USERNAME and
// BOOTSTRAP_PASSWORD seed the first account when the user table is empty.
async fn bootstrap_first_user(state: &AppState) -> Result<(), AppError> {
    let (Ok(username), Ok(password)) = (
        std::env::var("BOOTSTRAP_USERNAME"),
        std::env::var("BOOTSTRAP_PASSWORD"),
    ) else {
        return Ok(());
    };

    if state.users.count().await? > 0 {
        return Ok(());
    }

    let password_hash = bcrypt::hash(&password, bcrypt::DEFAULT_COST)
        .map_err(|e| AppError::internal(format!("Hash error: {e}")))?;
    let user = state.users.create(username.trim(), &password_hash).await?;
    tracing::info!(username = %user.username, "Created bootstrap user");
    Ok(())
}
