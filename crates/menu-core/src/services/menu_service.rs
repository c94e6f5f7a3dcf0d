// ============================================================================
// Menu Core - Menu Service
// File: crates/menu-core/src/services/menu_service.rs
// ============================================================================
//! Request-time queries over built menus, shaped for a rendering collaborator

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::MenuBuilder;
use crate::capabilities::RequestScope;
use crate::domain::ItemRef;
use crate::error::MenuError;

/// Snapshot of one item resolved against a request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemView {
    pub key: String,
    pub route_name: String,
    pub title: String,
    pub escaped_title: String,
    pub title_in_menu_header: String,
    /// `None` when the URL could not be generated.
    pub url: Option<String>,
    pub visible: bool,
    pub enabled: bool,
    pub current: bool,
    pub on_current_path: bool,
    pub item_group: String,
    pub is_divider: bool,
    pub is_section_header: bool,
    pub pre_divider: bool,
    pub post_divider: bool,
    pub section_header: Option<String>,
    pub icon: Option<String>,
    pub custom_url_icon: Option<String>,
    pub template: Option<String>,
    pub children_template: Option<String>,
    pub custom_object: Option<Value>,
    pub children: Vec<ItemView>,
}

impl ItemView {
    /// View of `item`; `depth` limits how many child levels are included.
    pub fn from_item(item: ItemRef<'_>, scope: &RequestScope<'_>, depth: Option<usize>) -> Self {
        let url = match item.url(scope) {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("URL generation failed for menu item {}: {}", item.key(), e);
                None
            }
        };

        let children: Vec<ItemView> = match depth {
            Some(0) => Vec::new(),
            _ => item
                .children()
                .map(|child| ItemView::from_item(child, scope, depth.map(|d| d - 1)))
                .collect(),
        };

        // Child views already carry their path flag; a truncated subtree is walked.
        let current = item.is_current(scope);
        let on_current_path = match depth {
            Some(0) => item.is_on_current_path(scope),
            _ => current || children.iter().any(|child| child.on_current_path),
        };

        Self {
            key: item.key().to_string(),
            route_name: item.route_name().to_string(),
            title: item.title().to_string(),
            escaped_title: item.escaped_title(),
            title_in_menu_header: item.title_in_menu_header().to_string(),
            url,
            visible: item.is_visible(scope),
            enabled: item.is_enabled(scope),
            current,
            on_current_path,
            item_group: item.item_group().to_string(),
            is_divider: item.is_divider(),
            is_section_header: item.is_section_header(),
            pre_divider: item.has_pre_divider(),
            post_divider: item.has_post_divider(),
            section_header: item.section_header().map(str::to_string),
            icon: item.icon().map(str::to_string),
            custom_url_icon: item.custom_url_icon().map(str::to_string),
            template: item.template().map(str::to_string),
            children_template: item.children_template().map(str::to_string),
            custom_object: item.custom_object().cloned(),
            children,
        }
    }
}

/// Query surface of the menu engine: top-level items, breadcrumb and current
/// item of a named menu, resolved against one request.
pub struct MenuService {
    builder: Arc<MenuBuilder>,
}

impl MenuService {
    pub fn new(builder: Arc<MenuBuilder>) -> Self {
        Self { builder }
    }

    pub fn builder(&self) -> &Arc<MenuBuilder> {
        &self.builder
    }

    /// Top-level items of the menu with their full subtrees.
    pub fn menu_items(&self, name: &str, scope: &RequestScope<'_>) -> Result<Vec<ItemView>, MenuError> {
        let menu = self.builder.get_menu(name)?;
        let items: Vec<ItemView> = menu
            .all_items()
            .into_iter()
            .map(|item| ItemView::from_item(item, scope, None))
            .collect();

        debug!("Resolved {} top-level items of menu {}", items.len(), name);
        Ok(items)
    }

    /// Items on the current path, top level first, without children.
    pub fn breadcrumb_items(&self, name: &str, scope: &RequestScope<'_>) -> Result<Vec<ItemView>, MenuError> {
        let menu = self.builder.get_menu(name)?;
        let items = menu
            .breadcrumb_items(scope)
            .into_iter()
            .map(|item| ItemView::from_item(item, scope, Some(0)))
            .collect();
        Ok(items)
    }

    pub fn current_item(&self, name: &str, scope: &RequestScope<'_>) -> Result<Option<ItemView>, MenuError> {
        let menu = self.builder.get_menu(name)?;
        Ok(menu
            .current_item(scope)
            .map(|item| ItemView::from_item(item, scope, Some(0))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::MenuEnvironment;
    use crate::testing::{definition, scope_for, FakeRequest, PathRouter, Roles};
    use menu_shared::MenuDefinitions;
    use serde_json::json;

    fn service() -> MenuService {
        let mut definitions = MenuDefinitions::new();
        definitions.insert(
            "main".to_string(),
            definition(json!({
                "home": {"title": "Home"},
                "about": {
                    "title": "About & Co",
                    "title_in_menu_header": "More",
                    "children": {
                        "team": {"title": "Team", "icon": "people"}
                    }
                }
            })),
        );
        MenuService::new(Arc::new(MenuBuilder::new(definitions, Arc::new(MenuEnvironment::new()))))
    }

    #[test]
    fn test_menu_items_tree() {
        let service = service();
        let request = FakeRequest::at("team");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        let items = service.menu_items("main", &scope).unwrap();
        assert_eq!(items.len(), 2);

        let about = &items[1];
        assert_eq!(about.escaped_title, "About &amp; Co");
        assert_eq!(about.title_in_menu_header, "More");
        assert!(about.on_current_path);
        assert!(!about.current);
        assert_eq!(about.children[0].icon.as_deref(), Some("people"));
        assert!(about.children[0].current);
        assert_eq!(items[0].title_in_menu_header, "Home");
        assert_eq!(items[0].url.as_deref(), Some("/home"));
    }

    #[test]
    fn test_breadcrumb_and_current() {
        let service = service();
        let request = FakeRequest::at("team");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        let breadcrumb: Vec<String> = service
            .breadcrumb_items("main", &scope)
            .unwrap()
            .into_iter()
            .map(|item| item.key)
            .collect();
        assert_eq!(breadcrumb, vec!["about", "team"]);

        let current = service.current_item("main", &scope).unwrap().unwrap();
        assert_eq!(current.key, "team");
        assert!(current.children.is_empty());
    }

    #[test]
    fn test_path_flags_match_tree_at_every_depth() {
        let menu = crate::domain::Menu::new(
            "main",
            &definition(json!({
                "home": {"title": "Home"},
                "company": {
                    "title": "Company",
                    "children": {
                        "about": {
                            "title": "About",
                            "children": {"team": {"title": "Team"}, "jobs": {"title": "Jobs"}}
                        },
                        "press": {"title": "Press"}
                    }
                }
            })),
            Arc::new(MenuEnvironment::new()),
        )
        .unwrap();
        let request = FakeRequest::at("jobs");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        fn flags(view: &ItemView, out: &mut Vec<(String, bool)>) {
            out.push((view.key.clone(), view.on_current_path));
            for child in &view.children {
                flags(child, out);
            }
        }

        let mut from_views = Vec::new();
        for item in menu.all_items() {
            flags(&ItemView::from_item(item, &scope, None), &mut from_views);
        }
        let expected = vec![
            ("home".to_string(), false),
            ("company".to_string(), true),
            ("about".to_string(), true),
            ("team".to_string(), false),
            ("jobs".to_string(), true),
            ("press".to_string(), false),
        ];
        assert_eq!(from_views, expected);

        let company = menu.find("company").unwrap();
        let shallow = ItemView::from_item(company, &scope, Some(1));
        assert!(shallow.on_current_path);
        assert!(shallow.children[0].children.is_empty());
        assert!(shallow.children[0].on_current_path);
        assert!(!shallow.children[1].on_current_path);
    }

    #[test]
    fn test_unknown_menu_is_reported() {
        let service = service();
        let request = FakeRequest::nowhere();
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert_eq!(
            service.menu_items("sidebar", &scope).unwrap_err(),
            MenuError::MenuNotFound("sidebar".to_string())
        );
        assert_eq!(service.current_item("main", &scope).unwrap(), None);
    }
}
