//! Menu errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    #[error("The menu item option {option} is required (item \"{item}\")")]
    OptionRequired { option: String, item: String },

    #[error("Item class {0} is not a menu item variant")]
    InvalidItemVariant(String),

    #[error("Invalid menu configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Menu {0} does not exist")]
    MenuNotFound(String),

    #[error("URL generation failed: {0}")]
    UrlGeneration(String),

    #[error("Child source error: {0}")]
    ChildSource(String),
}

impl MenuError {
    pub fn option_required(option: &str, item: &str) -> Self {
        MenuError::OptionRequired {
            option: option.to_string(),
            item: item.to_string(),
        }
    }

    pub fn invalid_option(option: &str, item: &str, expected: &str) -> Self {
        MenuError::InvalidConfiguration(format!(
            "option {} of item \"{}\" must be {}",
            option, item, expected
        ))
    }
}
