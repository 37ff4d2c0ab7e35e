// ============================
// credgate-backend-lib/src/router.rs
// ============================
//! HTTP router.
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::storage::Storage;
use crate::AppState;

/// Create the API router
pub fn create_router<S: Storage>(state: Arc<AppState<S>>) -> Router {
    Router::new()
        .route("/registro", post(handlers::register::<S>))
        .route("/login", post(handlers::login::<S>))
        .route("/users", post(handlers::users::<S>))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
