//! # Menu Security
//! 
//! Role-carrying sessions and JWT decoding used to answer menu permission checks.

pub mod jwt;
pub mod session;

pub use jwt::JwtService;
pub use session::Session;
