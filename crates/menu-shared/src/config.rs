//! Configuration management

use std::collections::HashMap;

use config::{Config, Environment, File, FileFormat};
use serde::Deserialize;

use crate::constants::BASE_ITEM_KIND;
use crate::error::AppError;
use crate::types::MenuDefinitions;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    #[serde(default)]
    pub jwt: Option<JwtSettings>,
    #[serde(default)]
    pub menu: MenuSettings,
    /// Route name to path pattern, e.g. `user_show: /users/{id}`.
    #[serde(default)]
    pub routes: HashMap<String, String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppSettings {
    pub env: String,
    pub host: String,
    pub port: u16,
    pub name: String,
    /// Prefix used when an absolute URL is requested.
    pub base_url: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct JwtSettings {
    pub secret: String,
    pub access_token_expiry: i64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MenuSettings {
    /// Variant used for items without an explicit `item_class`.
    #[serde(default = "default_item_class")]
    pub default_item_class: String,
    /// Symbolic item class name to registered variant name.
    #[serde(default)]
    pub item_class_aliases: HashMap<String, String>,
    #[serde(default)]
    pub definitions: MenuDefinitions,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            default_item_class: default_item_class(),
            item_class_aliases: HashMap::new(),
            definitions: MenuDefinitions::new(),
        }
    }
}

fn default_item_class() -> String {
    BASE_ITEM_KIND.to_string()
}

impl AppConfig {
    pub fn load() -> Result<Self, AppError> {
        dotenvy::dotenv().ok();

        let env = std::env::var("APP_ENV").unwrap_or_else(|_| "development".into());
        let builder = Self::builder_with_defaults()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("MENU").separator("__").try_parsing(true));

        Self::from_config(builder.build()?)
    }

    /// Parse a configuration document, layered over the built-in defaults.
    pub fn from_document(document: &str, format: FileFormat) -> Result<Self, AppError> {
        let config = Self::builder_with_defaults()?
            .add_source(File::from_str(document, format))
            .build()?;

        Self::from_config(config)
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, AppError> {
        Ok(Config::builder()
            .set_default("app.env", "development")?
            .set_default("app.host", "127.0.0.1")?
            .set_default("app.port", 8080)?
            .set_default("app.name", "menu-server")?
            .set_default("app.base_url", "http://127.0.0.1:8080")?)
    }

    fn from_config(config: Config) -> Result<Self, AppError> {
        let settings: AppConfig = config.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.menu.default_item_class.trim().is_empty() {
            return Err(AppError::InvalidSetting {
                key: "menu.default_item_class".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        for (route, pattern) in &self.routes {
            if !pattern.starts_with('/') {
                return Err(AppError::InvalidSetting {
                    key: format!("routes.{}", route),
                    reason: format!("path pattern {} must start with /", pattern),
                });
            }
        }

        Ok(())
    }
}
