//! Route definitions for the Agro Inference Platform

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Inference (action selected in the request body)
        .route("/inference", post(handlers::run_inference))
}
