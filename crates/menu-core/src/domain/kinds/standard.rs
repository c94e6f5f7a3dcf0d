//! Base item kind

use menu_shared::constants::BASE_ITEM_KIND;

use super::ItemKind;

/// Plain route-backed menu entry. Every other kind descends from this one.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardItem;

impl ItemKind for StandardItem {
    fn name(&self) -> &str {
        BASE_ITEM_KIND
    }

    fn parent_kind(&self) -> Option<&str> {
        None
    }
}
