// ============================================================================
// Menu API - Menu Handlers
// File: crates/menu-api/src/handlers/menu.rs
// ============================================================================
//! Menu query handlers (items, breadcrumb, current item)

use std::collections::HashMap;

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    Json,
};
use menu_core::RequestScope;
use tracing::warn;

use crate::access::SessionAccess;
use crate::dto::{BreadcrumbResponse, CurrentItemResponse, MenuItemsResponse};
use crate::request::HttpRequestContext;
use crate::response::{menu_failure, ApiFailure, ApiResponse};
use crate::state::AppState;

/// Request capabilities of one call
struct RequestParts {
    request: HttpRequestContext,
    access: SessionAccess,
}

impl RequestParts {
    fn new(state: &AppState, headers: &HeaderMap, query: HashMap<String, String>) -> Self {
        Self {
            request: HttpRequestContext::from_query(query),
            access: SessionAccess::from_headers(headers, state.jwt.as_deref()),
        }
    }

    fn scope<'a>(&'a self, state: &'a AppState) -> RequestScope<'a> {
        RequestScope::new(&self.request, state.routes.as_ref(), &self.access)
    }
}

/// Menu tree - GET /api/v1/menus/{name}
pub async fn menu_items(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<MenuItemsResponse>>, ApiFailure> {
    let parts = RequestParts::new(&state, &headers, query);
    let scope = parts.scope(&state);

    let items = state.menus.menu_items(&name, &scope).map_err(|e| {
        warn!("Menu {} could not be resolved: {}", name, e);
        menu_failure(&e)
    })?;

    Ok(Json(ApiResponse::success(MenuItemsResponse {
        current_route: scope.current_route_name().map(str::to_string),
        menu: name,
        items,
    })))
}

/// Breadcrumb - GET /api/v1/menus/{name}/breadcrumb
pub async fn breadcrumb(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<BreadcrumbResponse>>, ApiFailure> {
    let parts = RequestParts::new(&state, &headers, query);
    let scope = parts.scope(&state);

    let items = state
        .menus
        .breadcrumb_items(&name, &scope)
        .map_err(|e| menu_failure(&e))?;

    Ok(Json(ApiResponse::success(BreadcrumbResponse { menu: name, items })))
}

/// Current item - GET /api/v1/menus/{name}/current
pub async fn current_item(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Result<Json<ApiResponse<CurrentItemResponse>>, ApiFailure> {
    let parts = RequestParts::new(&state, &headers, query);
    let scope = parts.scope(&state);

    let item = state
        .menus
        .current_item(&name, &scope)
        .map_err(|e| menu_failure(&e))?;

    Ok(Json(ApiResponse::success(CurrentItemResponse { menu: name, item })))
}
