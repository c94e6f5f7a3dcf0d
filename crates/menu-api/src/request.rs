//! Request context built from the query string

use std::collections::HashMap;

use menu_core::RequestContext;
use menu_shared::constants::ROUTE_REQUEST_VARIABLE;
use serde_json::Value;

/// Live request state for menu resolution. The matched route name is passed
/// in the `_route` query parameter; every other parameter is a request variable.
#[derive(Debug, Clone, Default)]
pub struct HttpRequestContext {
    route: Option<String>,
    variables: HashMap<String, String>,
}

impl HttpRequestContext {
    pub fn from_query(mut query: HashMap<String, String>) -> Self {
        let route = query
            .remove(ROUTE_REQUEST_VARIABLE)
            .filter(|route| !route.is_empty());

        Self {
            route,
            variables: query,
        }
    }
}

impl RequestContext for HttpRequestContext {
    fn current_route_name(&self) -> Option<String> {
        self.route.clone()
    }

    fn request_variable(&self, name: &str) -> Option<Value> {
        if name == ROUTE_REQUEST_VARIABLE {
            return self.route.clone().map(Value::String);
        }
        self.variables.get(name).cloned().map(Value::String)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_is_taken_from_query() {
        let query = HashMap::from([
            ("_route".to_string(), "user_show".to_string()),
            ("id".to_string(), "7".to_string()),
        ]);
        let request = HttpRequestContext::from_query(query);

        assert_eq!(request.current_route_name().as_deref(), Some("user_show"));
        assert_eq!(request.request_variable("id"), Some(Value::String("7".to_string())));
        assert_eq!(request.request_variable("_route"), Some(Value::String("user_show".to_string())));
        assert_eq!(request.request_variable("tab"), None);
    }

    #[test]
    fn test_empty_route_means_none() {
        let query = HashMap::from([("_route".to_string(), String::new())]);
        assert_eq!(HttpRequestContext::from_query(query).current_route_name(), None);
    }
}
