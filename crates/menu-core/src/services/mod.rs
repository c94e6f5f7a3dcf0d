//! Menu services

pub mod menu_builder;
pub mod menu_service;

pub use menu_builder::MenuBuilder;
pub use menu_service::{ItemView, MenuService};
