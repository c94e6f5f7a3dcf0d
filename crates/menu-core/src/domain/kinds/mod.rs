//! Item kinds (variants) and their registry

pub mod standard;
pub mod admin_generator;
pub mod single_page;
pub mod header_link;

pub use standard::StandardItem;
pub use admin_generator::AdminGeneratorItem;
pub use single_page::SinglePageItem;
pub use header_link::HeaderLinkItem;

use std::collections::{HashMap, HashSet};
use std::fmt::Debug;
use std::sync::Arc;

use menu_shared::constants::BASE_ITEM_KIND;
use menu_shared::{OptionMap, UrlParameters};
use parking_lot::Mutex;
use tracing::debug;

use super::item::{ItemId, MenuItem};
use super::menu::Menu;
use super::options::{OptionSpec, ResolvedOptions, BASE_SCHEMA};
use crate::capabilities::RequestScope;
use crate::error::MenuError;

/// Behaviour shared by every menu item variant.
///
/// The default methods are the behaviour of the base item kind; a variant
/// overrides only the hooks it specialises and names its parent kind so the
/// registry can check that it descends from the base kind.
pub trait ItemKind: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Kind this variant specialises. Only the base kind has none.
    fn parent_kind(&self) -> Option<&str> {
        Some(BASE_ITEM_KIND)
    }

    /// Rewrite the item key and raw options before resolution.
    /// Returns the route name and the options to resolve.
    fn prepare(&self, key: &str, options: OptionMap) -> Result<(String, OptionMap), MenuError> {
        Ok((key.to_string(), options))
    }

    fn schema(&self) -> &'static [OptionSpec] {
        BASE_SCHEMA
    }

    /// Alias routes of an item, given its resolved route name and the configured aliases.
    fn alias_route_names(&self, _route_name: &str, configured: Vec<String>) -> Result<Vec<String>, MenuError> {
        Ok(configured)
    }

    /// Runs after option resolution, before children are generated.
    fn configure(&self, _options: &OptionMap, _resolved: &mut ResolvedOptions) -> Result<(), MenuError> {
        Ok(())
    }

    /// Runs after the configured children have been attached.
    fn finish_children(&self, _menu: &mut Menu, _item: ItemId) -> Result<(), MenuError> {
        Ok(())
    }

    fn is_current(&self, item: &MenuItem, scope: &RequestScope<'_>) -> bool {
        item.is_current_endpoint(scope)
    }

    fn url(
        &self,
        item: &MenuItem,
        parameters: &UrlParameters,
        absolute: bool,
        scope: &RequestScope<'_>,
    ) -> Result<String, MenuError> {
        item.default_url(parameters, absolute, scope)
    }
}

/// Named item kinds with a memoised "descends from the base kind" check.
pub struct ItemKindRegistry {
    kinds: HashMap<String, Arc<dyn ItemKind>>,
    checked: Mutex<HashMap<String, bool>>,
}

impl ItemKindRegistry {
    pub fn new() -> Self {
        Self {
            kinds: HashMap::new(),
            checked: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_builtin_kinds() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(StandardItem));
        registry.register(Arc::new(AdminGeneratorItem));
        registry.register(Arc::new(SinglePageItem));
        registry.register(Arc::new(HeaderLinkItem));
        registry
    }

    /// Register (or replace) a kind under its own name.
    pub fn register(&mut self, kind: Arc<dyn ItemKind>) {
        self.kinds.insert(kind.name().to_string(), kind);
        self.checked.lock().clear();
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn ItemKind>> {
        self.kinds.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.kinds.keys().cloned().collect();
        names.sort();
        names
    }

    /// Parent chain of `name`, nearest first. Stops at an unknown kind or a cycle.
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut ancestors = Vec::new();
        let mut seen = HashSet::from([name.to_string()]);
        let mut current = self.kinds.get(name);

        while let Some(parent) = current.and_then(|kind| kind.parent_kind()) {
            if !seen.insert(parent.to_string()) {
                break;
            }
            ancestors.push(parent.to_string());
            current = self.kinds.get(parent);
        }
        ancestors
    }

    /// Whether `name` is registered and its ancestor chain reaches the base kind.
    pub fn is_menu_item_kind(&self, name: &str) -> bool {
        if let Some(valid) = self.checked.lock().get(name) {
            return *valid;
        }

        let valid = self.kinds.contains_key(name)
            && (name == BASE_ITEM_KIND || self.ancestors(name).iter().any(|kind| kind == BASE_ITEM_KIND))
            && self.kinds.contains_key(BASE_ITEM_KIND);
        debug!(kind = %name, valid, "Checked item kind ancestry");

        self.checked.lock().insert(name.to_string(), valid);
        valid
    }

    pub fn resolve(&self, name: &str) -> Result<Arc<dyn ItemKind>, MenuError> {
        if !self.is_menu_item_kind(name) {
            return Err(MenuError::InvalidItemVariant(name.to_string()));
        }
        self.get(name)
            .ok_or_else(|| MenuError::InvalidItemVariant(name.to_string()))
    }
}

impl Default for ItemKindRegistry {
    fn default() -> Self {
        Self::with_builtin_kinds()
    }
}

impl Debug for ItemKindRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemKindRegistry")
            .field("kinds", &self.names())
            .finish()
    }
}
