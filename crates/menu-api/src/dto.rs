//! Response DTOs

use menu_core::ItemView;
use serde::Serialize;

/// Top-level items of a menu with their subtrees
#[derive(Debug, Serialize)]
pub struct MenuItemsResponse {
    pub menu: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_route: Option<String>,
    pub items: Vec<ItemView>,
}

/// Items on the current path, top level first
#[derive(Debug, Serialize)]
pub struct BreadcrumbResponse {
    pub menu: String,
    pub items: Vec<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct CurrentItemResponse {
    pub menu: String,
    pub item: Option<ItemView>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub menus: Vec<String>,
}
