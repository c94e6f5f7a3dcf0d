//! Per-request resolution scope

use menu_shared::UrlParameters;
use serde_json::Value;

use super::{AccessDecision, RequestContext, UrlGenerator};
use crate::error::MenuError;

/// Everything an item needs to answer request-dependent questions.
///
/// Menu trees hold no request state; a scope is created for each request and
/// passed to every query. The current route name is read once, on creation.
pub struct RequestScope<'a> {
    request: &'a dyn RequestContext,
    router: &'a dyn UrlGenerator,
    access: &'a dyn AccessDecision,
    current_route: Option<String>,
}

impl<'a> RequestScope<'a> {
    pub fn new(
        request: &'a dyn RequestContext,
        router: &'a dyn UrlGenerator,
        access: &'a dyn AccessDecision,
    ) -> Self {
        Self {
            current_route: request.current_route_name(),
            request,
            router,
            access,
        }
    }

    pub fn current_route_name(&self) -> Option<&str> {
        self.current_route.as_deref()
    }

    pub fn request_variable(&self, name: &str) -> Option<Value> {
        self.request.request_variable(name)
    }

    pub fn generate_url(
        &self,
        route_name: &str,
        parameters: &UrlParameters,
        absolute: bool,
    ) -> Result<String, MenuError> {
        self.router.generate_url(route_name, parameters, absolute)
    }

    pub fn is_granted(&self, role: &str) -> bool {
        self.access.is_granted(role)
    }
}
