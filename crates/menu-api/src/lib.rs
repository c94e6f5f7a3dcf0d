//! # Menu API
//! 
//! HTTP adapters for the menu engine: route table, request and session
//! capabilities, DTOs and handlers.

pub mod access;
pub mod dto;
pub mod handlers;
pub mod request;
pub mod response;
pub mod routing;
pub mod state;

pub use handlers::router;
pub use state::AppState;
