//! URL generator trait (port)

use menu_shared::UrlParameters;

use crate::error::MenuError;

#[cfg_attr(test, mockall::automock)]
pub trait UrlGenerator {
    fn generate_url(
        &self,
        route_name: &str,
        parameters: &UrlParameters,
        absolute: bool,
    ) -> Result<String, MenuError>;
}
