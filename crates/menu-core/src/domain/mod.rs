//! Menu domain: options, items, item kinds and menu trees

pub mod options;
pub mod links;
pub mod kinds;
pub mod item;
pub mod environment;
pub mod menu;

pub use options::{ChildSourceSpec, OptionResolver, OptionSpec, ResolvedOptions, BASE_SCHEMA};
pub use kinds::{AdminGeneratorItem, HeaderLinkItem, ItemKind, ItemKindRegistry, SinglePageItem, StandardItem};
pub use item::{ChildPosition, ItemId, ItemRef, MenuItem};
pub use environment::MenuEnvironment;
pub use menu::Menu;
