pub mod entities;
pub mod repositories;
pub mod value_objects;

// Re-exports for easy access
pub use entities::movie::{
    Genre, Movie, MovieDetails, PagedResponse, ProductionCompany, ProductionCountry,
    SpokenLanguage,
};
pub use entities::video::{Video, VideosResponse};
pub use repositories::metadata_provider::MetadataProvider;
pub use value_objects::{DiscoverFilters, ImageSize, TimeWindow};
