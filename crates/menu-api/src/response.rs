//! API Response wrapper

use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use menu_core::MenuError;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ApiError>,
    pub timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

pub type ApiFailure = (StatusCode, Json<ApiResponse<()>>);

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
            timestamp: Utc::now().to_rfc3339(),
        }
    }

    pub fn error(code: &str, message: &str) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(ApiError {
                code: code.to_string(),
                message: message.to_string(),
            }),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}

/// Unknown menus are 404; every other menu error is a server-side configuration problem.
pub fn menu_failure(error: &MenuError) -> ApiFailure {
    let (status, code) = match error {
        MenuError::MenuNotFound(_) => (StatusCode::NOT_FOUND, "MENU_NOT_FOUND"),
        MenuError::OptionRequired { .. } => (StatusCode::INTERNAL_SERVER_ERROR, "OPTION_REQUIRED"),
        MenuError::InvalidItemVariant(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_ITEM_VARIANT"),
        MenuError::InvalidConfiguration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INVALID_CONFIGURATION"),
        MenuError::UrlGeneration(_) => (StatusCode::INTERNAL_SERVER_ERROR, "URL_GENERATION_ERROR"),
        MenuError::ChildSource(_) => (StatusCode::INTERNAL_SERVER_ERROR, "CHILD_SOURCE_ERROR"),
    };

    (status, Json(ApiResponse::error(code, &error.to_string())))
}
