//! Common types

use std::collections::HashMap;

use serde_json::{Map, Value};

/// Raw option map of a single menu item. Key order follows the configuration source.
pub type OptionMap = Map<String, Value>;

/// Parameters passed to URL generation.
pub type UrlParameters = Map<String, Value>;

/// Menu definitions keyed by registry name.
pub type MenuDefinitions = HashMap<String, OptionMap>;
