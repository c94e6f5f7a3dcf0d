//! Menu tree
//!
//! A menu owns an arena of items rooted in a synthetic, invisible root item
//! whose children are the top-level definitions. Construction is all or
//! nothing: any failing item aborts the whole menu.

use std::sync::Arc;

use menu_shared::constants::{
    BASE_ITEM_KIND, CHILDREN_KEY, DEFAULTS_KEY, DIVIDER_KEY_PREFIX, ITEM_CLASS_KEY, SECTION_HEADER_KEY_PREFIX,
};
use menu_shared::OptionMap;
use serde_json::Value;
use tracing::{debug, info, warn};

use super::environment::MenuEnvironment;
use super::item::{ChildPosition, ItemId, ItemRef, MenuItem};
use super::options::{default_set, merge_options, value_as_bool, OptionResolver, ResolvedOptions};
use crate::capabilities::RequestScope;
use crate::error::MenuError;

#[derive(Debug)]
pub struct Menu {
    name: String,
    defaults: OptionMap,
    environment: Arc<MenuEnvironment>,
    items: Vec<MenuItem>,
    root: ItemId,
}

impl Menu {
    /// Build the whole tree of one menu definition.
    ///
    /// Menu-level `.defaults` are merged under every top-level item and under
    /// each item's nested `children..defaults`; more specific values win.
    pub fn new(name: &str, definition: &OptionMap, environment: Arc<MenuEnvironment>) -> Result<Self, MenuError> {
        let mut defaults = match definition.get(DEFAULTS_KEY) {
            None | Some(Value::Null) => OptionMap::new(),
            Some(Value::Object(map)) => default_set(map),
            Some(_) => {
                return Err(MenuError::InvalidConfiguration(format!(
                    "{} of menu {} must be a map",
                    DEFAULTS_KEY, name
                )))
            }
        };
        if !defaults.contains_key(ITEM_CLASS_KEY) {
            defaults.insert(
                ITEM_CLASS_KEY.to_string(),
                Value::String(environment.default_kind().to_string()),
            );
        }

        let mut top_level = OptionMap::new();
        for (key, value) in definition {
            if key == DEFAULTS_KEY {
                continue;
            }

            let mut merged = merge_options(&defaults, &item_options(key, value)?);
            let mut children = children_options(key, &merged)?.unwrap_or_default();
            let nested_defaults = match children.get(DEFAULTS_KEY) {
                Some(Value::Object(nested)) => merge_options(&defaults, nested),
                _ => defaults.clone(),
            };
            children.insert(DEFAULTS_KEY.to_string(), Value::Object(nested_defaults));
            merged.insert(CHILDREN_KEY.to_string(), Value::Object(children));

            top_level.insert(key.clone(), Value::Object(merged));
        }

        let mut root_options = OptionMap::new();
        root_options.insert("title".to_string(), Value::String(String::new()));
        root_options.insert(ITEM_CLASS_KEY.to_string(), Value::String(BASE_ITEM_KIND.to_string()));
        root_options.insert("visible".to_string(), Value::Bool(false));
        root_options.insert(CHILDREN_KEY.to_string(), Value::Object(top_level));

        let mut menu = Self {
            name: name.to_string(),
            defaults,
            environment,
            items: Vec::new(),
            root: ItemId(0),
        };
        let root_defaults = menu.defaults.clone();
        menu.root = menu.create_item("", root_options, &root_defaults)?;

        info!(
            menu = %menu.name,
            items = menu.items.len() - 1,
            "Menu built"
        );
        Ok(menu)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Menu-level defaults, including the auto-populated `item_class`.
    pub fn defaults(&self) -> &OptionMap {
        &self.defaults
    }

    pub fn environment(&self) -> &Arc<MenuEnvironment> {
        &self.environment
    }

    pub fn root(&self) -> ItemRef<'_> {
        ItemRef::new(self, self.root)
    }

    /// Panics if `id` was not issued by this menu.
    pub fn get(&self, id: ItemId) -> &MenuItem {
        &self.items[id.0]
    }

    pub fn item(&self, id: ItemId) -> ItemRef<'_> {
        ItemRef::new(self, id)
    }

    /// Number of items, the root included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.len() <= 1
    }

    /// First item (in construction order) with the given configuration key.
    pub fn find(&self, key: &str) -> Option<ItemRef<'_>> {
        self.items
            .iter()
            .filter(|item| item.id() != self.root)
            .find(|item| item.key() == key)
            .map(|item| ItemRef::new(self, item.id()))
    }

    /// Top-level items, i.e. the children of the root.
    pub fn all_items(&self) -> Vec<ItemRef<'_>> {
        self.root().children().collect()
    }

    /// Items on the current path, top level first.
    pub fn breadcrumb_items(&self, scope: &RequestScope<'_>) -> Vec<ItemRef<'_>> {
        let mut items = Vec::new();
        let mut item = self.root();
        while let Some(current) = item.current_child(scope) {
            items.push(current);
            item = current;
        }
        items
    }

    /// Deepest item on the current path.
    pub fn current_item(&self, scope: &RequestScope<'_>) -> Option<ItemRef<'_>> {
        self.breadcrumb_items(scope).pop()
    }

    /// Item factory. The new item (and its subtree) is not attached to any parent.
    ///
    /// `options` must already contain the applicable defaults; `defaults` is the
    /// set the item hands down to its children.
    pub fn create_item(&mut self, key: &str, options: OptionMap, defaults: &OptionMap) -> Result<ItemId, MenuError> {
        let checkpoint = self.items.len();
        let result = self.construct_item(key, options, defaults);
        if result.is_err() {
            self.items.truncate(checkpoint);
        }
        result
    }

    /// Attach `child` below `parent`, detaching it from a previous parent.
    pub fn add_child(&mut self, parent: ItemId, child: ItemId, position: ChildPosition) -> Result<ItemId, MenuError> {
        self.check_id(parent)?;
        self.check_id(child)?;
        if parent == child || self.is_ancestor(child, parent) {
            return Err(MenuError::InvalidConfiguration(format!(
                "item \"{}\" cannot be a child of its own subtree",
                self.items[child.0].key()
            )));
        }

        if let Some(previous) = self.items[child.0].parent.take() {
            self.items[previous.0].children.retain(|id| *id != child);
        }
        self.attach(parent, child, position);
        Ok(child)
    }

    /// Create an item from raw options (merged over the parent's defaults) and attach it.
    pub fn add_child_by_data(
        &mut self,
        parent: ItemId,
        key: &str,
        options: OptionMap,
        position: ChildPosition,
    ) -> Result<ItemId, MenuError> {
        self.check_id(parent)?;
        let defaults = self.items[parent.0].defaults().clone();
        let child = self.create_item(key, merge_options(&defaults, &options), &defaults)?;
        self.add_child(parent, child, position)
    }

    /// Create an item and insert it directly after `item`.
    pub fn add_sibling_by_data(&mut self, item: ItemId, key: &str, options: OptionMap) -> Result<ItemId, MenuError> {
        self.check_id(item)?;
        let position = self.item(item).position().ok_or_else(|| {
            MenuError::InvalidConfiguration(format!(
                "item \"{}\" has no parent to add a sibling to",
                self.items[item.0].key()
            ))
        })?;
        let parent = self.items[item.0].parent.unwrap_or(self.root);

        self.add_child_by_data(parent, key, options, ChildPosition::Index(position as isize + 1))
    }

    fn construct_item(&mut self, key: &str, options: OptionMap, defaults: &OptionMap) -> Result<ItemId, MenuError> {
        let requested = match options.get(ITEM_CLASS_KEY) {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.as_str()),
            Some(other) => return Err(MenuError::InvalidItemVariant(other.to_string())),
        };
        let kind = self.environment.resolve_kind(requested).map_err(|error| {
            warn!(menu = %self.name, item = %key, error = %error, "Rejected item kind");
            error
        })?;

        let options = mark_structural(key, options);
        let (route_name, options) = kind.prepare(key, options)?;

        let mut resolved = ResolvedOptions::for_route(&route_name);
        OptionResolver::new(key, &options).resolve(kind.as_ref(), &mut resolved)?;
        kind.configure(&options, &mut resolved)?;

        let children = children_options(key, &options)?.unwrap_or_default();
        let child_defaults = match children.get(DEFAULTS_KEY) {
            Some(Value::Object(nested)) => merge_options(defaults, &default_set(nested)),
            _ => defaults.clone(),
        };
        let source = resolved.children_source.clone();

        let id = ItemId(self.items.len());
        self.items.push(MenuItem::new(
            id,
            key.to_string(),
            kind.clone(),
            options,
            child_defaults.clone(),
            resolved,
        ));

        for (child_key, value) in &children {
            if child_key == DEFAULTS_KEY {
                continue;
            }
            let child_options = merge_options(&child_defaults, &item_options(child_key, value)?);
            let child = self.construct_item(child_key, child_options, &child_defaults)?;
            self.attach(id, child, ChildPosition::Last);
        }

        if let Some(block) = source {
            let records = self.environment.source(&block.source)?.fetch(&block.query)?;
            debug!(item = %key, source = %block.source, records = records.len(), "Generating children from source");

            for record in &records {
                let child_options = merge_options(&child_defaults, &block.child_options_for(record)?);
                let child = self.construct_item(&block.child_route, child_options, &child_defaults)?;
                self.attach(id, child, ChildPosition::Last);
            }
        }

        kind.finish_children(self, id)?;
        Ok(id)
    }

    fn attach(&mut self, parent: ItemId, child: ItemId, position: ChildPosition) {
        let siblings = &mut self.items[parent.0].children;
        let index = position.insertion_index(siblings.len());
        siblings.insert(index, child);
        self.items[child.0].parent = Some(parent);
    }

    /// Whether `candidate` is `item` or one of its ancestors.
    fn is_ancestor(&self, candidate: ItemId, item: ItemId) -> bool {
        let mut current = Some(item);
        while let Some(id) = current {
            if id == candidate {
                return true;
            }
            current = self.items[id.0].parent;
        }
        false
    }

    fn check_id(&self, id: ItemId) -> Result<(), MenuError> {
        if id.0 < self.items.len() {
            Ok(())
        } else {
            Err(MenuError::InvalidConfiguration(format!(
                "item {} does not belong to menu {}",
                id.0, self.name
            )))
        }
    }
}

fn item_options(key: &str, value: &Value) -> Result<OptionMap, MenuError> {
    match value {
        Value::Object(options) => Ok(options.clone()),
        Value::Null => Ok(OptionMap::new()),
        _ => Err(MenuError::InvalidConfiguration(format!(
            "options of item \"{}\" must be a map",
            key
        ))),
    }
}

fn children_options(key: &str, options: &OptionMap) -> Result<Option<OptionMap>, MenuError> {
    match options.get(CHILDREN_KEY) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(children)) => Ok(Some(children.clone())),
        Some(_) => Err(MenuError::invalid_option(CHILDREN_KEY, key, "a map")),
    }
}

/// Key-prefix detection of dividers and section headers. Dividers need no title.
fn mark_structural(key: &str, mut options: OptionMap) -> OptionMap {
    if key.starts_with(DIVIDER_KEY_PREFIX) {
        options.entry("is_divider").or_insert(Value::Bool(true));
    } else if key.starts_with(SECTION_HEADER_KEY_PREFIX) {
        options.entry("is_section_header").or_insert(Value::Bool(true));
    }

    if options.get("is_divider").map_or(false, value_as_bool) {
        options.entry("title").or_insert(Value::String(String::new()));
    }
    options
}
