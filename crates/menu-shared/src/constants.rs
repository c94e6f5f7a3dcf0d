//! Configuration keys and naming conventions shared by all menu crates

/// Reserved key supplying fallback options for the items at its level.
pub const DEFAULTS_KEY: &str = ".defaults";
pub const CHILDREN_KEY: &str = "children";
pub const CHILDREN_SOURCE_KEY: &str = "children_source";
pub const ITEM_CLASS_KEY: &str = "item_class";

/// Item keys starting with these markers are detected as structural entries.
/// The prefixes are not reserved: a route named `.divider_x` is treated as a divider.
pub const DIVIDER_KEY_PREFIX: &str = ".divider";
pub const SECTION_HEADER_KEY_PREFIX: &str = ".header";

pub const BASE_ITEM_KIND: &str = "menu_item";
pub const ADMIN_GENERATOR_ITEM_KIND: &str = "admin_generator";
pub const SINGLE_PAGE_ITEM_KIND: &str = "single_page";
pub const HEADER_LINK_ITEM_KIND: &str = "header_link";

pub const DEFAULT_ITEM_GROUP: &str = "default";

/// Request variable carrying the matched route name.
pub const ROUTE_REQUEST_VARIABLE: &str = "_route";
