// Shared kernel: cross-module errors, configuration and utilities

pub mod config; // Environment-driven application configuration
pub mod errors; // Shared error types
pub mod utils; // Logging and validation helpers

// Re-exports for convenience
pub use config::{AppConfig, PlaybackConfig, TmdbConfig};
pub use errors::{AppError, AppResult};
