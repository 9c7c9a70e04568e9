pub mod application;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::FavoritesService;
pub use domain::{
    FavoriteId, FavoriteRecord, FavoriteToggle, FavoritesChange, FavoritesSnapshot,
    KeyValueStore, FAVORITE_IDS_KEY, FAVORITE_RECORDS_KEY,
};
pub use infrastructure::{JsonFileKeyValueStore, MemoryKeyValueStore};
