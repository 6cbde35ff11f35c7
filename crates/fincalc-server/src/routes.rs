//! Route definitions.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::config::ServerConfig;
use crate::handlers::{self, AppState};

/// Create the API router.
///
/// # Arguments
/// * `config` - Server configuration shared with the handlers
pub fn create_router(config: ServerConfig) -> Router {
    let state = Arc::new(AppState { config });

    Router::new()
        // Health
        .route("/health", get(handlers::health))
        .route("/api/v1/health", get(handlers::health))
        // Calculators
        .route("/api/v1/breakeven", post(handlers::breakeven))
        .route("/api/v1/valuation", post(handlers::valuation))
        .route("/api/v1/capital-cost", post(handlers::capital_cost))
        .route("/api/v1/bond", post(handlers::bond))
        .with_state(state)
}
