// ============================================================================
// Menu Core - Menu Builder
// File: crates/menu-core/src/services/menu_builder.rs
// ============================================================================
//! Registry of named menu definitions with lazy, build-once menus

use std::collections::HashMap;
use std::sync::Arc;

use menu_shared::{MenuDefinitions, OptionMap};
use once_cell::sync::OnceCell;
use tracing::{error, info};

use crate::domain::{Menu, MenuEnvironment};
use crate::error::MenuError;

/// Holds the raw definitions of every menu and builds each one on first access.
///
/// A built menu is shared; later calls return the same instance. A failed
/// build is not cached and will be attempted again on the next access.
pub struct MenuBuilder {
    definitions: MenuDefinitions,
    environment: Arc<MenuEnvironment>,
    menus: HashMap<String, OnceCell<Arc<Menu>>>,
}

impl MenuBuilder {
    pub fn new(definitions: MenuDefinitions, environment: Arc<MenuEnvironment>) -> Self {
        let menus = definitions
            .keys()
            .map(|name| (name.clone(), OnceCell::new()))
            .collect();

        Self {
            definitions,
            environment,
            menus,
        }
    }

    pub fn definitions(&self) -> &MenuDefinitions {
        &self.definitions
    }

    pub fn environment(&self) -> &Arc<MenuEnvironment> {
        &self.environment
    }

    pub fn has_menu(&self, name: &str) -> bool {
        self.definitions.contains_key(name)
    }

    /// Registered menu names, sorted.
    pub fn menu_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.definitions.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn get_menu(&self, name: &str) -> Result<Arc<Menu>, MenuError> {
        let (Some(cell), Some(definition)) = (self.menus.get(name), self.definitions.get(name)) else {
            return Err(MenuError::MenuNotFound(name.to_string()));
        };

        cell.get_or_try_init(|| self.build(name, definition))
            .map(Arc::clone)
    }

    /// Build (if needed) and return every registered menu, sorted by name.
    pub fn menus(&self) -> Result<Vec<Arc<Menu>>, MenuError> {
        let menus = self
            .menu_names()
            .iter()
            .map(|name| self.get_menu(name))
            .collect::<Result<Vec<_>, _>>()?;

        info!("Initialised {} menus", menus.len());
        Ok(menus)
    }

    fn build(&self, name: &str, definition: &OptionMap) -> Result<Arc<Menu>, MenuError> {
        Menu::new(name, definition, Arc::clone(&self.environment))
            .map(Arc::new)
            .map_err(|e| {
                error!("Failed to build menu {}: {}", name, e);
                e
            })
    }
}
