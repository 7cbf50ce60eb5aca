pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::rewrite::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/rewrite", post(handlers::handle_rewrite))
        .with_state(state)
}
