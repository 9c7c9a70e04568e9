pub mod application;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::service::{CatalogService, HomeFeed, MovieDetailsView};
pub use domain::{
    DiscoverFilters, Genre, MetadataProvider, Movie, MovieDetails, PagedResponse, TimeWindow,
    Video,
};
pub use infrastructure::tmdb::TmdbAdapter;
