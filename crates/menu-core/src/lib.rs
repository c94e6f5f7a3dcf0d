//! # Menu Core
//! 
//! Menu tree construction, option resolution, item variants and the
//! request-time queries (visibility, enablement, current path, URLs).

pub mod capabilities;
pub mod domain;
pub mod services;
pub mod error;

#[cfg(test)]
pub(crate) mod testing;

pub use capabilities::{AccessDecision, ChildSource, RequestContext, RequestScope, UrlGenerator};
pub use domain::*;
pub use error::MenuError;
pub use services::{ItemView, MenuBuilder, MenuService};
