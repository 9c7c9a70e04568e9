#[cfg(feature = "desktop")]
pub mod commands;
pub mod route;

pub use route::Route;
