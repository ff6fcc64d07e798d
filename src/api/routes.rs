//! API Routes
//!
//! Configures the Axum router with all file server endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    d20_handler, health_handler, save_handler, static_file_handler, stats_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /d20` - Random number from 1 to 20
/// - `POST /save` - Store the request body in the files directory
/// - `GET /stats` - Cache statistics
/// - `GET /health` - Health check endpoint
/// - anything else - Static file from the server root, through the cache
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/d20", get(d20_handler))
        .route("/save", post(save_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .fallback(static_file_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
