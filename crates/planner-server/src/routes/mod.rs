//! HTTP route modules.

pub mod health;
pub mod schedule;

use axum::{middleware, routing::get, Router};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::middleware::resolve_user;
use crate::state::AppState;

/// Create the main router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    // Public routes (no user needed)
    let public_routes = Router::new().route("/health", get(health::health_check));

    // Page routes (user resolved from proxy headers)
    let page_routes = schedule::router().layer(middleware::from_fn_with_state(
        state.clone(),
        resolve_user,
    ));

    Router::new()
        .merge(public_routes)
        .merge(page_routes)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
