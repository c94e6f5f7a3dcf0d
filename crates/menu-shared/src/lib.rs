//! # Menu Shared
//! 
//! Shared constants, types, configuration and telemetry for the menu engine.

pub mod constants;
pub mod types;
pub mod telemetry;
pub mod config;
pub mod error;

pub use types::*;
pub use error::AppError;
