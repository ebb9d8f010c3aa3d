pub mod health;
pub mod rag;

use crate::AppState;
use axum::{
    routing::{get, post},
    Router,
};

/// The externally visible surface of the service. Callers can only obtain
/// this router with an `AppState`, i.e. after the knowledge store finished
/// building, which is the readiness gate for accepting queries.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/ai/rag", post(rag::rag_handler))
        .with_state(state)
}
