//! HTTP handlers

pub mod health;
pub mod menu;

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// API routes with request tracing.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/v1/menus/{name}", get(menu::menu_items))
        .route("/api/v1/menus/{name}/breadcrumb", get(menu::breadcrumb))
        .route("/api/v1/menus/{name}/current", get(menu::current_item))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
