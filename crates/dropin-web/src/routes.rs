//! # Routes
//!
//! Axum router configuration for the drop-in payment server.

use crate::handlers;
use crate::state::AppState;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

/// Create the main application router
///
/// Routes:
/// - GET  /          - Payment page with a fresh client token
/// - POST /proc      - Execute a sale (GET answers 405)
/// - GET  /public/*  - Static assets, sandboxed to the public directory
/// - GET  /health    - Health check
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ServeDir resolves paths inside public_dir only; traversal sequences
    // that would escape it answer 404.
    let assets = ServeDir::new(&state.config.public_dir);

    Router::new()
        .route("/", get(handlers::index))
        .route("/proc", post(handlers::proc_sale))
        .route("/health", get(handlers::health))
        .nest_service("/public", assets)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
