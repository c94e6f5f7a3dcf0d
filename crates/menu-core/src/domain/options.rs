//! Option resolution
//!
//! Every item kind declares an ordered schema of [`OptionSpec`] entries. Each
//! entry names the configuration key, whether it is required, and the function
//! assigning the parsed value onto [`ResolvedOptions`]. Absent optional keys
//! leave the field at its `ResolvedOptions::default()` value.
//!
//! Order matters: `custom_route_name` is resolved before `alias_route_names`,
//! because alias synthesis reads the (possibly overridden) route name.

use menu_shared::constants::{CHILDREN_KEY, CHILDREN_SOURCE_KEY, DEFAULT_ITEM_GROUP, DEFAULTS_KEY};
use menu_shared::{OptionMap, UrlParameters};
use serde::Serialize;
use serde_json::Value;

use super::kinds::ItemKind;
use crate::error::MenuError;

/// Shallow merge: keys of `overrides` replace keys of `fallback`.
pub fn merge_options(fallback: &OptionMap, overrides: &OptionMap) -> OptionMap {
    let mut merged = fallback.clone();
    for (key, value) in overrides {
        merged.insert(key.clone(), value.clone());
    }
    merged
}

/// Copy of `options` without the given keys, keeping the remaining order.
pub fn without_keys(options: &OptionMap, keys: &[&str]) -> OptionMap {
    options
        .iter()
        .filter(|(key, _)| !keys.contains(&key.as_str()))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Defaults never carry a subtree of their own.
pub fn default_set(options: &OptionMap) -> OptionMap {
    without_keys(options, &[CHILDREN_KEY, CHILDREN_SOURCE_KEY, DEFAULTS_KEY])
}

/// Loose truthiness, used for flag options.
pub fn value_as_bool(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().map_or(false, |n| n != 0.0),
        Value::String(text) => !(text.is_empty() || text == "0" || text.eq_ignore_ascii_case("false")),
        Value::Array(values) => !values.is_empty(),
        Value::Object(map) => !map.is_empty(),
    }
}

/// String form of a scalar used in URLs and request comparisons. `null` has none.
pub fn parameter_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Number(number) => Some(number.to_string()),
        other => Some(other.to_string()),
    }
}

/// One option value handed to an assign function.
pub struct OptionInput<'a> {
    pub key: &'static str,
    pub item: &'a str,
    pub value: Option<&'a Value>,
    pub kind: &'a dyn ItemKind,
}

impl<'a> OptionInput<'a> {
    pub fn string(&self) -> Result<Option<String>, MenuError> {
        match self.value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Array(_)) | Some(Value::Object(_)) => {
                Err(MenuError::invalid_option(self.key, self.item, "a string"))
            }
            Some(value) => Ok(parameter_string(value)),
        }
    }

    pub fn flag(&self) -> Option<bool> {
        self.value.map(value_as_bool)
    }

    /// A single string or a list of strings.
    pub fn list(&self) -> Result<Vec<String>, MenuError> {
        let values: Vec<&Value> = match self.value {
            None | Some(Value::Null) => return Ok(Vec::new()),
            Some(Value::Array(values)) => values.iter().collect(),
            Some(Value::Object(map)) => map.values().collect(),
            Some(value) => vec![value],
        };

        values
            .into_iter()
            .filter(|value| !value.is_null())
            .map(|value| match value {
                Value::Array(_) | Value::Object(_) => {
                    Err(MenuError::invalid_option(self.key, self.item, "a list of strings"))
                }
                scalar => Ok(parameter_string(scalar).unwrap_or_default()),
            })
            .collect()
    }

    pub fn map(&self) -> Result<Option<OptionMap>, MenuError> {
        match self.value {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Object(map)) => Ok(Some(map.clone())),
            Some(_) => Err(MenuError::invalid_option(self.key, self.item, "a map")),
        }
    }
}

pub type AssignFn = fn(&mut ResolvedOptions, &OptionInput<'_>) -> Result<(), MenuError>;

/// One entry of an item kind's option schema.
#[derive(Clone, Copy)]
pub struct OptionSpec {
    pub key: &'static str,
    pub required: bool,
    pub assign: AssignFn,
}

impl OptionSpec {
    pub const fn optional(key: &'static str, assign: AssignFn) -> Self {
        Self { key, required: false, assign }
    }

    pub const fn required(key: &'static str, assign: AssignFn) -> Self {
        Self { key, required: true, assign }
    }
}

impl std::fmt::Debug for OptionSpec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OptionSpec")
            .field("key", &self.key)
            .field("required", &self.required)
            .finish()
    }
}

/// Data-source block of the `children_source` option.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChildSourceSpec {
    pub source: String,
    pub query: OptionMap,
    pub child_route: String,
    /// Route parameter name to record field name.
    pub child_route_parameters: OptionMap,
    pub child_options: OptionMap,
    pub title_field: String,
}

impl ChildSourceSpec {
    pub fn from_options(item: &str, block: &OptionMap) -> Result<Self, MenuError> {
        let required_string = |key: &str| -> Result<String, MenuError> {
            match block.get(key) {
                Some(Value::String(text)) if !text.is_empty() => Ok(text.clone()),
                Some(_) => Err(MenuError::InvalidConfiguration(format!(
                    "children_source.{} of item \"{}\" must be a non-empty string",
                    key, item
                ))),
                None => Err(MenuError::InvalidConfiguration(format!(
                    "children_source of item \"{}\" is missing {}",
                    item, key
                ))),
            }
        };
        let optional_map = |key: &str| -> Result<OptionMap, MenuError> {
            match block.get(key) {
                None | Some(Value::Null) => Ok(OptionMap::new()),
                Some(Value::Object(map)) => Ok(map.clone()),
                Some(_) => Err(MenuError::InvalidConfiguration(format!(
                    "children_source.{} of item \"{}\" must be a map",
                    key, item
                ))),
            }
        };

        let child_route_parameters = optional_map("child_route_parameters")?;
        if let Some((parameter, _)) = child_route_parameters.iter().find(|(_, field)| !field.is_string()) {
            return Err(MenuError::InvalidConfiguration(format!(
                "children_source.child_route_parameters.{} of item \"{}\" must name a record field",
                parameter, item
            )));
        }

        Ok(Self {
            source: required_string("source")?,
            query: optional_map("query")?,
            child_route: required_string("child_route")?,
            child_route_parameters,
            child_options: optional_map("child_options")?,
            title_field: required_string("title_field")?,
        })
    }

    /// Option map of the child generated for `record`.
    pub fn child_options_for(&self, record: &OptionMap) -> Result<OptionMap, MenuError> {
        let title = record
            .get(&self.title_field)
            .and_then(parameter_string)
            .ok_or_else(|| {
                MenuError::InvalidConfiguration(format!(
                    "record of source {} has no title field {}",
                    self.source, self.title_field
                ))
            })?;

        let mut parameters = UrlParameters::new();
        for (parameter, field) in &self.child_route_parameters {
            let field = field.as_str().unwrap_or_default();
            let value = record.get(field).cloned().ok_or_else(|| {
                MenuError::InvalidConfiguration(format!(
                    "record of source {} has no field {}",
                    self.source, field
                ))
            })?;
            parameters.insert(parameter.clone(), value);
        }

        let mut options = self.child_options.clone();
        options.insert("title".to_string(), Value::String(title));
        options.insert("route_parameters".to_string(), Value::Object(parameters.clone()));
        options.insert("match_request_variables".to_string(), Value::Object(parameters));
        options.insert("custom_object".to_string(), Value::Object(record.clone()));
        Ok(options)
    }
}

/// Typed option fields of one item after schema resolution.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedOptions {
    pub route_name: String,
    pub title: String,
    pub title_in_menu_header: Option<String>,
    pub item_group: String,
    pub visible: bool,
    pub visible_if_disabled: bool,
    pub alias_route_names: Vec<String>,
    pub require_route_name: Option<String>,
    pub invert_require_route_name: bool,
    pub custom_url: Option<String>,
    pub custom_url_icon: Option<String>,
    pub add_request_variables: Vec<String>,
    pub set_request_variables: UrlParameters,
    pub match_request_variables: OptionMap,
    pub route_parameters: UrlParameters,
    pub anchor: Option<String>,
    pub icon: Option<String>,
    pub require_role: Option<String>,
    pub enabled_if_role_missing: bool,
    pub template: Option<String>,
    pub children_template: Option<String>,
    pub pre_divider: bool,
    pub post_divider: bool,
    pub section_header: Option<String>,
    pub is_divider: bool,
    pub is_section_header: bool,
    pub custom_object: Option<Value>,
    pub children_source: Option<ChildSourceSpec>,
    pub is_selected: bool,
}

impl Default for ResolvedOptions {
    fn default() -> Self {
        Self {
            route_name: String::new(),
            title: String::new(),
            title_in_menu_header: None,
            item_group: DEFAULT_ITEM_GROUP.to_string(),
            visible: true,
            visible_if_disabled: true,
            alias_route_names: Vec::new(),
            require_route_name: None,
            invert_require_route_name: false,
            custom_url: None,
            custom_url_icon: None,
            add_request_variables: Vec::new(),
            set_request_variables: UrlParameters::new(),
            match_request_variables: OptionMap::new(),
            route_parameters: UrlParameters::new(),
            anchor: None,
            icon: None,
            require_role: None,
            enabled_if_role_missing: false,
            template: None,
            children_template: None,
            pre_divider: false,
            post_divider: false,
            section_header: None,
            is_divider: false,
            is_section_header: false,
            custom_object: None,
            children_source: None,
            is_selected: false,
        }
    }
}

impl ResolvedOptions {
    pub fn for_route(route_name: &str) -> Self {
        Self {
            route_name: route_name.to_string(),
            ..Self::default()
        }
    }
}

fn assign_title(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(title) = input.string()? {
        resolved.title = title;
    }
    Ok(())
}

fn assign_title_in_menu_header(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.title_in_menu_header = input.string()?;
    Ok(())
}

fn assign_item_group(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(group) = input.string()? {
        resolved.item_group = group;
    }
    Ok(())
}

fn assign_visible(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(visible) = input.flag() {
        resolved.visible = visible;
    }
    Ok(())
}

fn assign_visible_if_disabled(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(visible) = input.flag() {
        resolved.visible_if_disabled = visible;
    }
    Ok(())
}

fn assign_custom_route_name(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(route_name) = input.string()? {
        resolved.route_name = route_name;
    }
    Ok(())
}

fn assign_alias_route_names(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    let configured = input.list()?;
    let aliases = input.kind.alias_route_names(&resolved.route_name, configured)?;
    for alias in aliases {
        if !resolved.alias_route_names.contains(&alias) {
            resolved.alias_route_names.push(alias);
        }
    }
    Ok(())
}

fn assign_require_route_name(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    let Some(route_name) = input.string()? else {
        return Ok(());
    };

    match route_name.strip_prefix('!') {
        Some(negated) => {
            resolved.invert_require_route_name = true;
            resolved.require_route_name = Some(negated.to_string());
        }
        None if route_name.is_empty() => resolved.require_route_name = None,
        None => resolved.require_route_name = Some(route_name),
    }
    Ok(())
}

fn assign_custom_url(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.custom_url = input.string()?.filter(|url| !url.is_empty());
    Ok(())
}

fn assign_custom_url_icon(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.custom_url_icon = input.string()?;
    Ok(())
}

fn assign_add_request_variables(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.add_request_variables = input.list()?;
    Ok(())
}

fn assign_set_request_variables(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(variables) = input.map()? {
        resolved.set_request_variables = variables;
    }
    Ok(())
}

fn assign_match_request_variables(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(variables) = input.map()? {
        resolved.match_request_variables = variables;
    }
    Ok(())
}

fn assign_route_parameters(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(parameters) = input.map()? {
        resolved.route_parameters = parameters;
    }
    Ok(())
}

fn assign_anchor(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.anchor = input.string()?.filter(|anchor| !anchor.is_empty());
    Ok(())
}

fn assign_icon(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.icon = input.string()?;
    Ok(())
}

fn assign_require_role(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.require_role = input.string()?.filter(|role| !role.is_empty());
    Ok(())
}

fn assign_enabled_if_role_missing(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    if let Some(enabled) = input.flag() {
        resolved.enabled_if_role_missing = enabled;
    }
    Ok(())
}

fn assign_template(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.template = input.string()?;
    Ok(())
}

fn assign_children_template(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.children_template = input.string()?;
    Ok(())
}

fn assign_pre_divider(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.pre_divider = input.flag().unwrap_or(false);
    Ok(())
}

fn assign_post_divider(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.post_divider = input.flag().unwrap_or(false);
    Ok(())
}

fn assign_section_header(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.section_header = input.string()?;
    Ok(())
}

fn assign_is_divider(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.is_divider = input.flag().unwrap_or(false);
    Ok(())
}

fn assign_is_section_header(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.is_section_header = input.flag().unwrap_or(false);
    Ok(())
}

fn assign_custom_object(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.custom_object = input.value.filter(|value| !value.is_null()).cloned();
    Ok(())
}

fn assign_children_source(resolved: &mut ResolvedOptions, input: &OptionInput<'_>) -> Result<(), MenuError> {
    resolved.children_source = match input.map()? {
        Some(block) => Some(ChildSourceSpec::from_options(input.item, &block)?),
        None => None,
    };
    Ok(())
}

/// Schema of the base item kind, in resolution order.
pub const BASE_SCHEMA: &[OptionSpec] = &[
    OptionSpec::required("title", assign_title),
    OptionSpec::optional("title_in_menu_header", assign_title_in_menu_header),
    OptionSpec::optional("item_group", assign_item_group),
    OptionSpec::optional("visible", assign_visible),
    OptionSpec::optional("visible_if_disabled", assign_visible_if_disabled),
    OptionSpec::optional("custom_route_name", assign_custom_route_name),
    OptionSpec::optional("alias_route_names", assign_alias_route_names),
    OptionSpec::optional("require_route_name", assign_require_route_name),
    OptionSpec::optional("custom_url", assign_custom_url),
    OptionSpec::optional("custom_url_icon", assign_custom_url_icon),
    OptionSpec::optional("add_request_variables", assign_add_request_variables),
    OptionSpec::optional("set_request_variables", assign_set_request_variables),
    OptionSpec::optional("match_request_variables", assign_match_request_variables),
    OptionSpec::optional("route_parameters", assign_route_parameters),
    OptionSpec::optional("anchor", assign_anchor),
    OptionSpec::optional("icon", assign_icon),
    OptionSpec::optional("require_role", assign_require_role),
    OptionSpec::optional("enabled_if_role_missing", assign_enabled_if_role_missing),
    OptionSpec::optional("template", assign_template),
    OptionSpec::optional("children_template", assign_children_template),
    OptionSpec::optional("pre_divider", assign_pre_divider),
    OptionSpec::optional("post_divider", assign_post_divider),
    OptionSpec::optional("section_header", assign_section_header),
    OptionSpec::optional("is_divider", assign_is_divider),
    OptionSpec::optional("is_section_header", assign_is_section_header),
    OptionSpec::optional("custom_object", assign_custom_object),
    OptionSpec::optional(CHILDREN_SOURCE_KEY, assign_children_source),
];

/// `base` followed by `extra`, for kinds that resolve options on top of the base schema.
/// `N` must be `base.len() + 1`.
pub const fn extend_schema<const N: usize>(base: &[OptionSpec], extra: OptionSpec) -> [OptionSpec; N] {
    let mut schema = [extra; N];
    let mut index = 0;
    while index < base.len() {
        schema[index] = base[index];
        index += 1;
    }
    schema
}

/// Read access to one item's defaults-merged option map.
pub struct OptionResolver<'a> {
    item: &'a str,
    options: &'a OptionMap,
}

impl<'a> OptionResolver<'a> {
    pub fn new(item: &'a str, options: &'a OptionMap) -> Self {
        Self { item, options }
    }

    /// Presence check; an explicit `null` or `false` counts as present.
    pub fn has_option(&self, key: &str) -> bool {
        self.options.contains_key(key)
    }

    pub fn get_option(&self, key: &str) -> Option<&'a Value> {
        self.options.get(key)
    }

    pub fn get_option_or(&self, key: &str, default: &'a Value) -> &'a Value {
        self.options.get(key).unwrap_or(default)
    }

    /// Assign one schema entry onto `resolved`.
    pub fn fetch_option(
        &self,
        entry: &OptionSpec,
        kind: &dyn ItemKind,
        resolved: &mut ResolvedOptions,
    ) -> Result<(), MenuError> {
        let value = self.get_option(entry.key);
        if value.is_none() && entry.required {
            return Err(MenuError::option_required(entry.key, self.item));
        }

        let input = OptionInput {
            key: entry.key,
            item: self.item,
            value,
            kind,
        };
        (entry.assign)(resolved, &input)
    }

    /// Run the kind's whole schema in declared order.
    pub fn resolve(&self, kind: &dyn ItemKind, resolved: &mut ResolvedOptions) -> Result<(), MenuError> {
        for entry in kind.schema() {
            self.fetch_option(entry, kind, resolved)?;
        }
        Ok(())
    }
}
