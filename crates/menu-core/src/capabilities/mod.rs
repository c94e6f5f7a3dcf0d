//! Capability traits (ports) the host supplies to the menu engine

pub mod request_context;
pub mod url_generator;
pub mod access_decision;
pub mod child_source;
pub mod scope;

pub use request_context::RequestContext;
pub use url_generator::UrlGenerator;
pub use access_decision::{AccessDecision, Anonymous};
pub use child_source::{ChildSource, StaticChildSource};
pub use scope::RequestScope;
