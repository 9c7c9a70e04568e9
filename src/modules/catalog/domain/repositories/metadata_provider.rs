use crate::modules::catalog::domain::{
    DiscoverFilters, Genre, Movie, MovieDetails, PagedResponse, TimeWindow, Video,
};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Port to a movie metadata service (TMDB in production)
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Provider name used in logs
    fn name(&self) -> &'static str;

    async fn trending(&self, window: TimeWindow) -> AppResult<PagedResponse<Movie>>;

    async fn popular(&self, page: u32) -> AppResult<PagedResponse<Movie>>;

    async fn top_rated(&self, page: u32) -> AppResult<PagedResponse<Movie>>;

    async fn upcoming(&self, page: u32) -> AppResult<PagedResponse<Movie>>;

    async fn search(&self, query: &str, page: u32) -> AppResult<PagedResponse<Movie>>;

    async fn details(&self, id: u32) -> AppResult<MovieDetails>;

    async fn videos(&self, id: u32) -> AppResult<Vec<Video>>;

    async fn genres(&self) -> AppResult<Vec<Genre>>;

    async fn discover(&self, filters: &DiscoverFilters) -> AppResult<PagedResponse<Movie>>;
}
