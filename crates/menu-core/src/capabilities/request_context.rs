//! Request context trait (port)

use serde_json::Value;

/// Live request state consulted when items decide whether they are current.
pub trait RequestContext {
    fn current_route_name(&self) -> Option<String>;
    fn request_variable(&self, name: &str) -> Option<Value>;
}
