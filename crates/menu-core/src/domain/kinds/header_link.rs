//! Header link item kind

use menu_shared::constants::{BASE_ITEM_KIND, CHILDREN_KEY, CHILDREN_SOURCE_KEY, HEADER_LINK_ITEM_KIND, ITEM_CLASS_KEY};
use serde_json::Value;
use tracing::debug;

use super::ItemKind;
use crate::domain::item::{ChildPosition, ItemId};
use crate::domain::menu::Menu;
use crate::domain::options::without_keys;
use crate::error::MenuError;

/// Dropdown header whose own link is repeated as the first child, for
/// layouts where clicking the header only opens the dropdown.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderLinkItem;

impl ItemKind for HeaderLinkItem {
    fn name(&self) -> &str {
        HEADER_LINK_ITEM_KIND
    }

    fn finish_children(&self, menu: &mut Menu, item: ItemId) -> Result<(), MenuError> {
        let (key, mut options, defaults) = {
            let header = menu.get(item);
            (
                header.key().to_string(),
                without_keys(header.options(), &[CHILDREN_KEY, CHILDREN_SOURCE_KEY]),
                header.defaults().clone(),
            )
        };
        options.insert(ITEM_CLASS_KEY.to_string(), Value::String(BASE_ITEM_KIND.to_string()));

        let copy = menu.create_item(&key, options, &defaults)?;
        menu.add_child(item, copy, ChildPosition::First)?;
        debug!(item = %key, "Inserted header link copy");
        Ok(())
    }
}
