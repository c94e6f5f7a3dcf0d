//! Single page item kind
//!
//! Entries of a one-page layout share a route and differ by anchor. The item
//! key uses the `route/content` notation (or the `content_name` option); the
//! content name becomes the anchor.

use menu_shared::constants::SINGLE_PAGE_ITEM_KIND;
use menu_shared::{OptionMap, UrlParameters};
use serde_json::Value;

use super::ItemKind;
use crate::capabilities::RequestScope;
use crate::domain::item::MenuItem;
use crate::domain::options::{extend_schema, parameter_string, OptionInput, OptionSpec, ResolvedOptions, BASE_SCHEMA};
use crate::error::MenuError;

const CONTENT_NAME_OPTION: &str = "content_name";
const IS_SELECTED_OPTION: &str = "is_selected";

static SCHEMA: [OptionSpec; BASE_SCHEMA.len() + 1] =
    extend_schema(BASE_SCHEMA, OptionSpec::optional(IS_SELECTED_OPTION, assign_is_selected));

fn assign_is_selected(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(selected) = input.flag() {
        resolved.is_selected = selected;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SinglePageItem;

impl ItemKind for SinglePageItem {
    fn name(&self) -> &str {
        SINGLE_PAGE_ITEM_KIND
    }

    fn prepare(&self, key: &str, mut options: OptionMap) -> Result<(String, OptionMap), MenuError> {
        let (route_name, content_name) = match key.split_once('/') {
            Some((route_name, content_name)) => (route_name.to_string(), content_name.to_string()),
            None => {
                let content_name = options
                    .get(CONTENT_NAME_OPTION)
                    .and_then(parameter_string)
                    .ok_or_else(|| MenuError::option_required(CONTENT_NAME_OPTION, key))?;
                (key.to_string(), content_name)
            }
        };

        options.insert("anchor".to_string(), Value::String(content_name));
        Ok((route_name, options))
    }

    fn schema(&self) -> &'static [OptionSpec] {
        &SCHEMA
    }

    /// Selection is driven client side; only an item flagged `is_selected` is current.
    fn is_current(&self, item: &MenuItem, scope: &RequestScope<'_>) -> bool {
        item.resolved().is_selected && item.is_current_endpoint(scope)
    }

    fn url(
        &self,
        item: &MenuItem,
        parameters: &UrlParameters,
        absolute: bool,
        scope: &RequestScope<'_>,
    ) -> Result<String, MenuError> {
        if item.resolved().custom_url.is_some() {
            return item.default_url(parameters, absolute, scope);
        }

        match item.resolved().anchor.as_deref() {
            Some(anchor) if item.is_current_endpoint(scope) => Ok(format!("#{}", anchor)),
            _ => item.standard_url(parameters, absolute, scope),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::kinds::StandardItem;
    use crate::domain::options::OptionResolver;
    use serde_json::json;

    #[test]
    fn test_prepare_splits_composite_key() {
        let (route_name, options) = SinglePageItem.prepare("home/about", OptionMap::new()).unwrap();

        assert_eq!(route_name, "home");
        assert_eq!(options["anchor"], json!("about"));
    }

    #[test]
    fn test_prepare_reads_content_name() {
        let mut options = OptionMap::new();
        options.insert(CONTENT_NAME_OPTION.to_string(), json!("contact"));

        let (route_name, options) = SinglePageItem.prepare("home", options).unwrap();
        assert_eq!(route_name, "home");
        assert_eq!(options["anchor"], json!("contact"));
    }

    #[test]
    fn test_schema_extends_base_with_selection() {
        let schema = SinglePageItem.schema();
        assert_eq!(schema.len(), BASE_SCHEMA.len() + 1);
        assert_eq!(schema[0].key, "title");
        assert_eq!(schema[schema.len() - 1].key, IS_SELECTED_OPTION);

        let mut options = OptionMap::new();
        options.insert("title".to_string(), json!("Intro"));
        options.insert(IS_SELECTED_OPTION.to_string(), json!("1"));

        let mut resolved = ResolvedOptions::for_route("home");
        OptionResolver::new("home/intro", &options).resolve(&SinglePageItem, &mut resolved).unwrap();
        assert!(resolved.is_selected);

        let mut base = ResolvedOptions::for_route("home");
        OptionResolver::new("home/intro", &options).resolve(&StandardItem, &mut base).unwrap();
        assert!(!base.is_selected);
    }

    #[test]
    fn test_prepare_requires_content() {
        let result = SinglePageItem.prepare("home", OptionMap::new());
        assert_eq!(result, Err(MenuError::option_required(CONTENT_NAME_OPTION, "home")));
    }
}

#[cfg(test)]
mod menu_tests {
    use std::sync::Arc;

    use crate::domain::{Menu, MenuEnvironment};
    use crate::testing::{definition, scope_for, FakeRequest, PathRouter, Roles};
    use serde_json::json;

    fn menu() -> Menu {
        Menu::new(
            "onepager",
            &definition(json!({
                ".defaults": {"item_class": "single_page"},
                "home/intro": {"title": "Intro", "is_selected": true},
                "home/about": {"title": "About"},
                "contact": {"title": "Contact", "content_name": "form"},
                "home/blog": {"title": "Blog", "custom_url": "https://blog.example.com"}
            })),
            Arc::new(MenuEnvironment::new()),
        )
        .unwrap()
    }

    #[test]
    fn test_anchor_link_on_the_page() {
        let menu = menu();
        let request = FakeRequest::at("home");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        let about = menu.find("home/about").unwrap();
        assert_eq!(about.route_name(), "home");
        assert_eq!(about.url(&scope).unwrap(), "#about");
        assert_eq!(menu.find("home/blog").unwrap().url(&scope).unwrap(), "https://blog.example.com");
    }

    #[test]
    fn test_full_link_elsewhere() {
        let menu = menu();
        let request = FakeRequest::at("imprint");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert_eq!(menu.find("home/about").unwrap().url(&scope).unwrap(), "/home#about");
        assert_eq!(menu.find("contact").unwrap().url(&scope).unwrap(), "/contact#form");
    }

    #[test]
    fn test_only_selected_content_is_current() {
        let menu = menu();
        let request = FakeRequest::at("home");
        let (router, access) = (PathRouter::new(), Roles::none());
        let scope = scope_for(&request, &router, &access);

        assert!(menu.find("home/intro").unwrap().is_current(&scope));
        assert!(!menu.find("home/about").unwrap().is_current(&scope));
        assert_eq!(menu.current_item(&scope).map(|item| item.key().to_string()), Some("home/intro".to_string()));
    }
}
