pub mod entities;
pub mod repositories;

// Re-exports for easy access
pub use entities::{
    FavoriteId, FavoriteRecord, FavoriteToggle, FavoritesChange, FavoritesSnapshot,
    FAVORITE_IDS_KEY, FAVORITE_RECORDS_KEY,
};
pub use repositories::key_value_store::KeyValueStore;
