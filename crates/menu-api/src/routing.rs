//! Route table URL generator

use std::collections::{HashMap, HashSet};

use menu_core::domain::options::parameter_string;
use menu_core::{MenuError, UrlGenerator};
use menu_shared::UrlParameters;
use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use url::form_urlencoded;

/// Characters escaped inside one path segment, as in the URL standard's
/// path percent-encode set plus `/` and `%`.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}')
    .add(b'/')
    .add(b'%');

/// Generates URLs from configured path patterns such as `/users/{id}`.
///
/// Placeholders are filled from the parameters; the remaining parameters go
/// into the query string. Absolute URLs are prefixed with the base URL.
#[derive(Debug, Clone)]
pub struct RouteTable {
    routes: HashMap<String, String>,
    base_url: String,
}

impl RouteTable {
    pub fn new(routes: HashMap<String, String>, base_url: impl Into<String>) -> Self {
        Self {
            routes,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn pattern(&self, route_name: &str) -> Option<&str> {
        self.routes.get(route_name).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl UrlGenerator for RouteTable {
    fn generate_url(&self, route_name: &str, parameters: &UrlParameters, absolute: bool) -> Result<String, MenuError> {
        let pattern = self
            .pattern(route_name)
            .ok_or_else(|| MenuError::UrlGeneration(format!("route {} is not defined", route_name)))?;

        let mut path = String::with_capacity(pattern.len());
        let mut used = HashSet::new();
        let mut rest = pattern;

        while let Some(start) = rest.find('{') {
            let end = rest[start..]
                .find('}')
                .map(|offset| start + offset)
                .ok_or_else(|| {
                    MenuError::UrlGeneration(format!("unterminated placeholder in route {}", route_name))
                })?;

            let name = &rest[start + 1..end];
            let value = parameters.get(name).and_then(parameter_string).ok_or_else(|| {
                MenuError::UrlGeneration(format!("missing parameter {} for route {}", name, route_name))
            })?;

            path.push_str(&rest[..start]);
            path.extend(utf8_percent_encode(&value, PATH_SEGMENT));
            used.insert(name);
            rest = &rest[end + 1..];
        }
        path.push_str(rest);

        let mut query = form_urlencoded::Serializer::new(String::new());
        for (name, value) in parameters {
            if used.contains(name.as_str()) {
                continue;
            }
            if let Some(value) = parameter_string(value) {
                query.append_pair(name, &value);
            }
        }
        let query = query.finish();
        if !query.is_empty() {
            path.push('?');
            path.push_str(&query);
        }

        if absolute {
            Ok(format!("{}{}", self.base_url, path))
        } else {
            Ok(path)
        }
    }
}
