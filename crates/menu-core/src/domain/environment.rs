//! Construction environment shared by every menu of a builder

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use menu_shared::constants::BASE_ITEM_KIND;
use tracing::debug;

use super::kinds::{ItemKind, ItemKindRegistry};
use crate::capabilities::ChildSource;
use crate::error::MenuError;

/// Item kinds, kind aliases and child data sources available while menus are built.
pub struct MenuEnvironment {
    kinds: ItemKindRegistry,
    kind_aliases: HashMap<String, String>,
    default_kind: String,
    sources: HashMap<String, Arc<dyn ChildSource>>,
}

impl MenuEnvironment {
    pub fn new() -> Self {
        Self {
            kinds: ItemKindRegistry::with_builtin_kinds(),
            kind_aliases: HashMap::new(),
            default_kind: BASE_ITEM_KIND.to_string(),
            sources: HashMap::new(),
        }
    }

    pub fn with_kind(mut self, kind: Arc<dyn ItemKind>) -> Self {
        self.kinds.register(kind);
        self
    }

    /// Symbolic `item_class` name resolving to a registered kind.
    pub fn with_kind_alias(mut self, alias: impl Into<String>, kind: impl Into<String>) -> Self {
        self.kind_aliases.insert(alias.into(), kind.into());
        self
    }

    pub fn with_kind_aliases<I, K, V>(mut self, aliases: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (alias, kind) in aliases {
            self.kind_aliases.insert(alias.into(), kind.into());
        }
        self
    }

    pub fn with_default_kind(mut self, kind: impl Into<String>) -> Self {
        self.default_kind = kind.into();
        self
    }

    pub fn with_source(mut self, name: impl Into<String>, source: Arc<dyn ChildSource>) -> Self {
        self.sources.insert(name.into(), source);
        self
    }

    pub fn kinds(&self) -> &ItemKindRegistry {
        &self.kinds
    }

    pub fn default_kind(&self) -> &str {
        &self.default_kind
    }

    /// Explicit name (or the default kind), then the alias table, then the registry.
    pub fn resolve_kind(&self, requested: Option<&str>) -> Result<Arc<dyn ItemKind>, MenuError> {
        let requested = requested.unwrap_or(&self.default_kind);
        let name = self
            .kind_aliases
            .get(requested)
            .map(String::as_str)
            .unwrap_or(requested);

        debug!(requested = %requested, kind = %name, "Resolving item kind");
        self.kinds.resolve(name)
    }

    pub fn source(&self, name: &str) -> Result<Arc<dyn ChildSource>, MenuError> {
        self.sources
            .get(name)
            .cloned()
            .ok_or_else(|| MenuError::ChildSource(format!("child source {} is not registered", name)))
    }
}

impl Default for MenuEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MenuEnvironment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sources: Vec<&String> = self.sources.keys().collect();
        sources.sort();

        f.debug_struct("MenuEnvironment")
            .field("kinds", &self.kinds)
            .field("kind_aliases", &self.kind_aliases)
            .field("default_kind", &self.default_kind)
            .field("sources", &sources)
            .finish()
    }
}
