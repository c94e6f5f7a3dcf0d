use std::sync::Arc;

use menu_core::MenuService;
use menu_security::JwtService;

use crate::routing::RouteTable;

#[derive(Clone)]
pub struct AppState {
    pub menus: Arc<MenuService>,
    pub routes: Arc<RouteTable>,
    /// Without a JWT service every request is anonymous.
    pub jwt: Option<Arc<JwtService>>,
}
