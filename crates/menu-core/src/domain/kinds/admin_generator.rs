//! Admin generator item kind

use menu_shared::constants::ADMIN_GENERATOR_ITEM_KIND;

use super::ItemKind;
use crate::error::MenuError;

const LIST_SUFFIX: &str = "_list";

/// Actions of a generated admin module, each served by `{base}_{action}`.
pub const ADMIN_ACTIONS: [&str; 9] = [
    "edit", "update", "show", "object", "batch", "new", "create", "filters", "scopes",
];

/// Entry for a generated admin list page. Stays current on every action
/// route of the same module.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminGeneratorItem;

impl ItemKind for AdminGeneratorItem {
    fn name(&self) -> &str {
        ADMIN_GENERATOR_ITEM_KIND
    }

    fn alias_route_names(&self, route_name: &str, configured: Vec<String>) -> Result<Vec<String>, MenuError> {
        let base = route_name.strip_suffix(LIST_SUFFIX).ok_or_else(|| {
            MenuError::InvalidConfiguration(format!(
                "route name {} of an admin generator item must end with {}",
                route_name, LIST_SUFFIX
            ))
        })?;

        let mut aliases: Vec<String> = ADMIN_ACTIONS
            .iter()
            .map(|action| format!("{}_{}", base, action))
            .collect();
        aliases.extend(configured);
        Ok(aliases)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generates_action_aliases() {
        let aliases = AdminGeneratorItem
            .alias_route_names("user_list", vec!["user_export".to_string()])
            .unwrap();

        assert_eq!(aliases.len(), ADMIN_ACTIONS.len() + 1);
        assert_eq!(aliases[0], "user_edit");
        assert!(aliases.contains(&"user_scopes".to_string()));
        assert_eq!(aliases.last().map(String::as_str), Some("user_export"));
    }

    #[test]
    fn test_requires_list_suffix() {
        let result = AdminGeneratorItem.alias_route_names("users", Vec::new());
        assert!(matches!(result, Err(MenuError::InvalidConfiguration(_))));
    }
}
