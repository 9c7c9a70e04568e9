pub mod session;
pub mod session_registry;
pub mod source_resolver;
