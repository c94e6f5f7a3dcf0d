//! Menu items
//!
//! Items live in the arena of their [`Menu`] and refer to each other by
//! [`ItemId`]. The structural part (options, children, parent) is fixed once
//! the menu is built; visibility, enablement, selection and URLs are computed
//! on every call from a [`RequestScope`].

use std::fmt;
use std::ops::Deref;
use std::str::FromStr;
use std::sync::Arc;

use menu_shared::{OptionMap, UrlParameters};
use serde::Serialize;
use serde_json::Value;

use super::kinds::ItemKind;
use super::menu::Menu;
use super::options::{parameter_string, ResolvedOptions};
use super::links::{append_query, escape_html};
use crate::capabilities::RequestScope;
use crate::error::MenuError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct ItemId(pub(crate) usize);

impl ItemId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Where `add_child` inserts a new child.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildPosition {
    First,
    #[default]
    Last,
    /// Zero-based index; negative values count from the end (`-1` inserts before the last child).
    Index(isize),
}

impl ChildPosition {
    pub fn insertion_index(self, len: usize) -> usize {
        match self {
            ChildPosition::First => 0,
            ChildPosition::Last => len,
            ChildPosition::Index(n) if n >= 0 => (n as usize).min(len),
            ChildPosition::Index(n) => len.saturating_sub(n.unsigned_abs()),
        }
    }
}

impl FromStr for ChildPosition {
    type Err = MenuError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "first" => Ok(ChildPosition::First),
            "last" | "" => Ok(ChildPosition::Last),
            other => other
                .parse::<isize>()
                .map(ChildPosition::Index)
                .map_err(|_| MenuError::InvalidConfiguration(format!("invalid child position {}", other))),
        }
    }
}

/// One node of a menu tree.
#[derive(Debug)]
pub struct MenuItem {
    id: ItemId,
    key: String,
    kind: Arc<dyn ItemKind>,
    options: OptionMap,
    defaults: OptionMap,
    resolved: ResolvedOptions,
    pub(crate) parent: Option<ItemId>,
    pub(crate) children: Vec<ItemId>,
}

impl MenuItem {
    pub(crate) fn new(
        id: ItemId,
        key: String,
        kind: Arc<dyn ItemKind>,
        options: OptionMap,
        defaults: OptionMap,
        resolved: ResolvedOptions,
    ) -> Self {
        Self {
            id,
            key,
            kind,
            options,
            defaults,
            resolved,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Configuration key of the item (before any route rewriting).
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn kind(&self) -> &dyn ItemKind {
        self.kind.as_ref()
    }

    pub fn kind_name(&self) -> &str {
        self.kind.name()
    }

    /// Defaults-merged option map the item was resolved from.
    pub fn options(&self) -> &OptionMap {
        &self.options
    }

    /// Default option set handed down to this item's children.
    pub fn defaults(&self) -> &OptionMap {
        &self.defaults
    }

    pub fn resolved(&self) -> &ResolvedOptions {
        &self.resolved
    }

    pub fn route_name(&self) -> &str {
        &self.resolved.route_name
    }

    pub fn title(&self) -> &str {
        &self.resolved.title
    }

    pub fn title_in_menu_header(&self) -> &str {
        self.resolved
            .title_in_menu_header
            .as_deref()
            .unwrap_or(&self.resolved.title)
    }

    pub fn escaped_title(&self) -> String {
        escape_html(&self.resolved.title)
    }

    pub fn item_group(&self) -> &str {
        &self.resolved.item_group
    }

    pub fn alias_route_names(&self) -> &[String] {
        &self.resolved.alias_route_names
    }

    pub fn anchor(&self) -> Option<&str> {
        self.resolved.anchor.as_deref()
    }

    pub fn has_anchor(&self) -> bool {
        self.resolved.anchor.is_some()
    }

    pub fn icon(&self) -> Option<&str> {
        self.resolved.icon.as_deref()
    }

    pub fn custom_url_icon(&self) -> Option<&str> {
        self.resolved.custom_url_icon.as_deref()
    }

    pub fn template(&self) -> Option<&str> {
        self.resolved.template.as_deref()
    }

    pub fn children_template(&self) -> Option<&str> {
        self.resolved.children_template.as_deref()
    }

    pub fn has_pre_divider(&self) -> bool {
        self.resolved.pre_divider
    }

    pub fn has_post_divider(&self) -> bool {
        self.resolved.post_divider
    }

    pub fn section_header(&self) -> Option<&str> {
        self.resolved.section_header.as_deref()
    }

    pub fn has_section_header(&self) -> bool {
        self.resolved.section_header.is_some()
    }

    pub fn is_divider(&self) -> bool {
        self.resolved.is_divider
    }

    pub fn is_section_header(&self) -> bool {
        self.resolved.is_section_header
    }

    pub fn custom_object(&self) -> Option<&Value> {
        self.resolved.custom_object.as_ref()
    }

    pub fn parent_id(&self) -> Option<ItemId> {
        self.parent
    }

    pub fn child_ids(&self) -> &[ItemId] {
        &self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    /// Route gate first, then role gate.
    pub fn is_enabled(&self, scope: &RequestScope<'_>) -> bool {
        if let Some(required) = self.resolved.require_route_name.as_deref() {
            let matches = scope.current_route_name() == Some(required);
            if matches == self.resolved.invert_require_route_name {
                return false;
            }
        }

        if let Some(role) = self.resolved.require_role.as_deref() {
            if !scope.is_granted(role) {
                return self.resolved.enabled_if_role_missing;
            }
        }

        true
    }

    pub fn is_visible(&self, scope: &RequestScope<'_>) -> bool {
        if !self.resolved.visible {
            return false;
        }
        if self.resolved.visible_if_disabled {
            return true;
        }
        self.is_enabled(scope)
    }

    /// The current route is this item's route or one of its aliases, and every
    /// `match_request_variables` pair equals the live request value.
    pub fn is_current_endpoint(&self, scope: &RequestScope<'_>) -> bool {
        let Some(current) = scope.current_route_name() else {
            return false;
        };

        let route_matches = current == self.resolved.route_name
            || self.resolved.alias_route_names.iter().any(|alias| alias == current);
        if !route_matches {
            return false;
        }

        self.resolved
            .match_request_variables
            .iter()
            .all(|(name, expected)| {
                let live = scope.request_variable(name);
                live.as_ref().and_then(parameter_string) == parameter_string(expected)
            })
    }

    pub fn is_current(&self, scope: &RequestScope<'_>) -> bool {
        self.kind.is_current(self, scope)
    }

    pub fn url(&self, scope: &RequestScope<'_>) -> Result<String, MenuError> {
        self.url_with(&UrlParameters::new(), false, scope)
    }

    pub fn url_with(
        &self,
        parameters: &UrlParameters,
        absolute: bool,
        scope: &RequestScope<'_>,
    ) -> Result<String, MenuError> {
        self.kind.url(self, parameters, absolute, scope)
    }

    /// Custom URL with merged request variables, otherwise the routed URL.
    pub fn default_url(
        &self,
        parameters: &UrlParameters,
        absolute: bool,
        scope: &RequestScope<'_>,
    ) -> Result<String, MenuError> {
        match self.resolved.custom_url.as_deref() {
            Some(custom_url) => Ok(append_query(custom_url, &self.request_parameters(scope))),
            None => self.standard_url(parameters, absolute, scope),
        }
    }

    /// URL generated from the route name. Parameter precedence, lowest first:
    /// `route_parameters`, caller parameters, request variables.
    pub fn standard_url(
        &self,
        parameters: &UrlParameters,
        absolute: bool,
        scope: &RequestScope<'_>,
    ) -> Result<String, MenuError> {
        let mut merged = self.resolved.route_parameters.clone();
        for (name, value) in parameters.iter().chain(self.request_parameters(scope).iter()) {
            merged.insert(name.clone(), value.clone());
        }

        let url = scope.generate_url(&self.resolved.route_name, &merged, absolute)?;
        Ok(match self.resolved.anchor.as_deref() {
            Some(anchor) => format!("{}#{}", url, anchor),
            None => url,
        })
    }

    /// Pass-through request variables, then fixed `set_request_variables`.
    fn request_parameters(&self, scope: &RequestScope<'_>) -> UrlParameters {
        let mut parameters = UrlParameters::new();
        for name in &self.resolved.add_request_variables {
            if let Some(value) = scope.request_variable(name) {
                parameters.insert(name.clone(), value);
            }
        }
        for (name, value) in &self.resolved.set_request_variables {
            parameters.insert(name.clone(), value.clone());
        }
        parameters
    }
}

/// Borrowed handle to an item together with its menu, for tree navigation.
#[derive(Clone, Copy)]
pub struct ItemRef<'m> {
    menu: &'m Menu,
    id: ItemId,
}

impl<'m> ItemRef<'m> {
    pub(crate) fn new(menu: &'m Menu, id: ItemId) -> Self {
        Self { menu, id }
    }

    pub fn id(&self) -> ItemId {
        self.id
    }

    pub fn item(&self) -> &'m MenuItem {
        self.menu.get(self.id)
    }

    pub fn menu(&self) -> &'m Menu {
        self.menu
    }

    pub fn children(&self) -> impl Iterator<Item = ItemRef<'m>> + 'm {
        let menu = self.menu;
        self.item()
            .children
            .iter()
            .map(move |id| ItemRef::new(menu, *id))
    }

    pub fn parent(&self) -> Option<ItemRef<'m>> {
        self.item().parent.map(|id| ItemRef::new(self.menu, id))
    }

    /// Index among the parent's children; `None` for the root.
    pub fn position(&self) -> Option<usize> {
        let parent = self.parent()?;
        parent.item().children.iter().position(|id| *id == self.id)
    }

    pub fn has_enabled_children(&self, scope: &RequestScope<'_>) -> bool {
        self.children().any(|child| child.is_enabled(scope))
    }

    /// Current itself, or an ancestor of the current item.
    pub fn is_on_current_path(&self, scope: &RequestScope<'_>) -> bool {
        self.is_current(scope) || self.children().any(|child| child.is_on_current_path(scope))
    }

    pub fn current_child(&self, scope: &RequestScope<'_>) -> Option<ItemRef<'m>> {
        self.children().find(|child| child.is_on_current_path(scope))
    }
}

impl<'m> Deref for ItemRef<'m> {
    type Target = MenuItem;

    fn deref(&self) -> &MenuItem {
        self.item()
    }
}

impl PartialEq for ItemRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.menu, other.menu) && self.id == other.id
    }
}

impl Eq for ItemRef<'_> {}

impl fmt::Debug for ItemRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ItemRef")
            .field("menu", &self.menu.name())
            .field("id", &self.id)
            .field("key", &self.item().key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capabilities::url_generator::MockUrlGenerator;
    use crate::domain::MenuEnvironment;
    use crate::testing::{definition, scope_for, FakeRequest, PathRouter, Roles};
    use mockall::predicate::{always, eq};
    use serde_json::json;

    fn single(options: Value) -> Menu {
        let mut items = OptionMap::new();
        items.insert("item".to_string(), options);
        Menu::new("test", &items, Arc::new(MenuEnvironment::new())).unwrap()
    }

    fn item(menu: &Menu) -> ItemRef<'_> {
        menu.find("item").unwrap()
    }

    #[test]
    fn test_invisible_dominates() {
        let menu = single(json!({"title": "Item", "visible": false, "visible_if_disabled": true}));
        let request = FakeRequest::at("item");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert!(item(&menu).is_enabled(&scope));
        assert!(!item(&menu).is_visible(&scope));
    }

    #[test]
    fn test_visible_if_disabled() {
        let shown = single(json!({"title": "Item", "require_route_name": "login"}));
        let hidden = single(json!({"title": "Item", "require_route_name": "login", "visible_if_disabled": false}));
        let request = FakeRequest::at("home");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert!(!item(&shown).is_enabled(&scope));
        assert!(item(&shown).is_visible(&scope));
        assert!(!item(&hidden).is_visible(&scope));
    }

    #[test]
    fn test_require_route_name_table() {
        let cases = [
            ("login", "login", true),
            ("login", "home", false),
            ("!login", "login", false),
            ("!login", "home", true),
        ];
        let (router, access) = (PathRouter::new(), Roles::none());

        for (required, current, enabled) in cases {
            let menu = single(json!({"title": "Item", "require_route_name": required}));
            let request = FakeRequest::at(current);
            let scope = scope_for(&request, &router, &access);

            assert_eq!(item(&menu).is_enabled(&scope), enabled, "{} on {}", required, current);
        }
    }

    #[test]
    fn test_role_gate() {
        let strict = single(json!({"title": "Item", "require_role": "ROLE_ADMIN"}));
        let lenient = single(json!({"title": "Item", "require_role": "ROLE_ADMIN", "enabled_if_role_missing": true}));
        let request = FakeRequest::at("home");
        let router = PathRouter::new();
        let (anonymous, admin) = (Roles::none(), Roles::of(&["ROLE_ADMIN"]));

        assert!(!item(&strict).is_enabled(&scope_for(&request, &router, &anonymous)));
        assert!(item(&strict).is_enabled(&scope_for(&request, &router, &admin)));
        assert!(item(&lenient).is_enabled(&scope_for(&request, &router, &anonymous)));
    }

    #[test]
    fn test_route_gate_precedes_role_fallback() {
        let menu = single(json!({
            "title": "Item",
            "require_route_name": "login",
            "require_role": "ROLE_ADMIN",
            "enabled_if_role_missing": true
        }));
        let request = FakeRequest::at("home");
        let (router, access) = (PathRouter::new(), Roles::none());

        assert!(!item(&menu).is_enabled(&scope_for(&request, &router, &access)));
    }

    #[test]
    fn test_match_request_variables() {
        let menu = single(json!({"title": "Item", "match_request_variables": {"tab": "billing"}}));
        let (router, access) = (PathRouter::new(), Roles::none());

        let on_tab = FakeRequest::at("item").with_variable("tab", json!("billing"));
        let other_tab = FakeRequest::at("item").with_variable("tab", json!("profile"));
        let no_tab = FakeRequest::at("item");

        assert!(item(&menu).is_current(&scope_for(&on_tab, &router, &access)));
        assert!(!item(&menu).is_current(&scope_for(&other_tab, &router, &access)));
        assert!(!item(&menu).is_current(&scope_for(&no_tab, &router, &access)));
    }

    #[test]
    fn test_custom_url_merges_request_variables() {
        let menu = single(json!({
            "title": "Docs",
            "custom_url": "https://docs.example.com/search?q=menu#results",
            "add_request_variables": ["lang", "missing"],
            "set_request_variables": {"q": "tree"}
        }));
        let request = FakeRequest::at("home").with_variable("lang", json!("de"));
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert_eq!(
            item(&menu).url(&scope).unwrap(),
            "https://docs.example.com/search?q=tree&lang=de#results"
        );
    }

    #[test]
    fn test_standard_url_with_parameters_and_anchor() {
        let menu = single(json!({
            "title": "Item",
            "custom_route_name": "page_show",
            "route_parameters": {"slug": "intro", "page": 1},
            "add_request_variables": ["page"],
            "anchor": "top"
        }));
        let request = FakeRequest::at("home").with_variable("page", json!(3));
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert_eq!(item(&menu).url(&scope).unwrap(), "/page_show?slug=intro&page=3#top");

        let mut extra = UrlParameters::new();
        extra.insert("preview".to_string(), json!(true));
        assert_eq!(
            item(&menu).url_with(&extra, true, &scope).unwrap(),
            "http://localhost/page_show?slug=intro&page=3&preview=true#top"
        );
    }

    #[test]
    fn test_url_generator_receives_route_and_parameters() {
        let menu = single(json!({"title": "Item", "route_parameters": {"id": 7}}));

        let mut router = MockUrlGenerator::new();
        router
            .expect_generate_url()
            .with(eq("item"), always(), eq(false))
            .times(1)
            .returning(|route, parameters, _| Ok(format!("/{}/{}", route, parameters["id"])));

        let request = FakeRequest::at("home");
        let access = Roles::none();
        let scope = RequestScope::new(&request, &router, &access);

        assert_eq!(item(&menu).url(&scope).unwrap(), "/item/7");
    }

    #[test]
    fn test_url_generation_failure_propagates() {
        let menu = single(json!({"title": "Item"}));

        let mut router = MockUrlGenerator::new();
        router
            .expect_generate_url()
            .returning(|route, _, _| Err(MenuError::UrlGeneration(format!("unknown route {}", route))));

        let request = FakeRequest::at("home");
        let access = Roles::none();
        let scope = RequestScope::new(&request, &router, &access);

        assert!(matches!(item(&menu).url(&scope), Err(MenuError::UrlGeneration(_))));
    }

    #[test]
    fn test_title_in_menu_header_falls_back_to_title() {
        let menu = single(json!({"title": "<b>Shop</b>"}));

        assert_eq!(item(&menu).title_in_menu_header(), "<b>Shop</b>");
        assert_eq!(item(&menu).escaped_title(), "&lt;b&gt;Shop&lt;/b&gt;");
        assert_eq!(item(&menu).item_group(), "default");
    }

    #[test]
    fn test_definition_helper_keeps_order() {
        let menu = Menu::new(
            "test",
            &definition(json!({"z": {"title": "Z"}, "a": {"title": "A"}})),
            Arc::new(MenuEnvironment::new()),
        )
        .unwrap();
        let keys: Vec<&str> = menu.all_items().iter().map(|item| item.item().key()).collect();

        assert_eq!(keys, vec!["z", "a"]);
        assert_eq!(menu.root().position(), None);
    }

    #[test]
    fn test_insertion_index() {
        assert_eq!(ChildPosition::First.insertion_index(3), 0);
        assert_eq!(ChildPosition::Last.insertion_index(3), 3);
        assert_eq!(ChildPosition::Index(1).insertion_index(3), 1);
        assert_eq!(ChildPosition::Index(9).insertion_index(3), 3);
        assert_eq!(ChildPosition::Index(-1).insertion_index(3), 2);
        assert_eq!(ChildPosition::Index(-9).insertion_index(3), 0);
    }

    #[test]
    fn test_position_from_str() {
        assert_eq!("first".parse::<ChildPosition>().unwrap(), ChildPosition::First);
        assert_eq!("last".parse::<ChildPosition>().unwrap(), ChildPosition::Last);
        assert_eq!("-1".parse::<ChildPosition>().unwrap(), ChildPosition::Index(-1));
        assert!("middle".parse::<ChildPosition>().is_err());
    }
}
