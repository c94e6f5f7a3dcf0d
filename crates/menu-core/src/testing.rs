//! In-memory capability fakes for unit tests

use std::collections::{HashMap, HashSet};

use menu_shared::{OptionMap, UrlParameters};
use serde_json::Value;
use url::form_urlencoded;

use crate::capabilities::{AccessDecision, RequestContext, RequestScope, UrlGenerator};
use crate::domain::options::parameter_string;
use crate::error::MenuError;

pub fn options(value: Value) -> OptionMap {
    match value {
        Value::Object(map) => map,
        other => panic!("expected an object, got {}", other),
    }
}

pub fn definition(value: Value) -> OptionMap {
    options(value)
}

#[derive(Debug, Default)]
pub struct FakeRequest {
    route: Option<String>,
    variables: HashMap<String, Value>,
}

impl FakeRequest {
    pub fn at(route: &str) -> Self {
        Self {
            route: Some(route.to_string()),
            variables: HashMap::new(),
        }
    }

    pub fn nowhere() -> Self {
        Self::default()
    }

    pub fn with_variable(mut self, name: &str, value: Value) -> Self {
        self.variables.insert(name.to_string(), value);
        self
    }
}

impl RequestContext for FakeRequest {
    fn current_route_name(&self) -> Option<String> {
        self.route.clone()
    }

    fn request_variable(&self, name: &str) -> Option<Value> {
        self.variables.get(name).cloned()
    }
}

/// Generates `/{route}?{parameters}`; absolute URLs get `http://localhost`.
#[derive(Debug, Default)]
pub struct PathRouter;

impl PathRouter {
    pub fn new() -> Self {
        Self
    }
}

impl UrlGenerator for PathRouter {
    fn generate_url(&self, route_name: &str, parameters: &UrlParameters, absolute: bool) -> Result<String, MenuError> {
        let query = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(
                parameters
                    .iter()
                    .filter_map(|(name, value)| parameter_string(value).map(|value| (name.clone(), value))),
            )
            .finish();

        let mut url = if absolute {
            format!("http://localhost/{}", route_name)
        } else {
            format!("/{}", route_name)
        };
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }
        Ok(url)
    }
}

#[derive(Debug, Default)]
pub struct Roles(HashSet<String>);

impl Roles {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn of(roles: &[&str]) -> Self {
        Self(roles.iter().map(|role| role.to_string()).collect())
    }
}

impl AccessDecision for Roles {
    fn is_granted(&self, role: &str) -> bool {
        self.0.contains(role)
    }
}

pub fn scope_for<'a>(request: &'a FakeRequest, router: &'a PathRouter, access: &'a Roles) -> RequestScope<'a> {
    RequestScope::new(request, router, access)
}
