use crate::modules::catalog::domain::{
    entities::video::preferred_trailer, DiscoverFilters, Genre, ImageSize, MetadataProvider, Movie,
    MovieDetails, PagedResponse, TimeWindow, Video,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, TimedOperation, Validator};
use crate::{log_debug, log_warn};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;

/// Movies shown per row on the home page
pub const HOME_ROW_LIMIT: usize = 12;

/// Rows rendered on the home page
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct HomeFeed {
    pub trending: Vec<Movie>,
    pub popular: Vec<Movie>,
    pub top_rated: Vec<Movie>,
}

impl HomeFeed {
    /// Movie featured in the hero banner
    pub fn featured(&self) -> Option<&Movie> {
        self.trending
            .iter()
            .find(|movie| movie.backdrop_path.is_some())
            .or_else(|| self.trending.first())
    }
}

/// Everything the details page needs in one round trip
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct MovieDetailsView {
    pub details: MovieDetails,
    pub videos: Vec<Video>,
    pub trailer: Option<Video>,
}

pub struct CatalogService {
    provider: Arc<dyn MetadataProvider>,
    image_base_url: String,
}

impl CatalogService {
    pub fn new(provider: Arc<dyn MetadataProvider>, image_base_url: impl Into<String>) -> Self {
        Self {
            provider,
            image_base_url: image_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Trending (week), popular and top rated, fetched concurrently
    pub async fn home_feed(&self) -> AppResult<HomeFeed> {
        let timer = TimedOperation::new("home feed");

        let (trending, popular, top_rated) = futures::try_join!(
            self.provider.trending(TimeWindow::Week),
            self.provider.popular(1),
            self.provider.top_rated(1),
        )?;

        timer.finish_with_info(self.provider.name());

        Ok(HomeFeed {
            trending: trending.truncated(HOME_ROW_LIMIT).results,
            popular: popular.truncated(HOME_ROW_LIMIT).results,
            top_rated: top_rated.truncated(HOME_ROW_LIMIT).results,
        })
    }

    pub async fn trending(&self, window: TimeWindow) -> AppResult<PagedResponse<Movie>> {
        self.provider.trending(window).await
    }

    pub async fn popular(&self, page: u32) -> AppResult<PagedResponse<Movie>> {
        Validator::validate_page(page)?;
        self.provider.popular(page).await
    }

    pub async fn top_rated(&self, page: u32) -> AppResult<PagedResponse<Movie>> {
        Validator::validate_page(page)?;
        self.provider.top_rated(page).await
    }

    pub async fn upcoming(&self, page: u32) -> AppResult<PagedResponse<Movie>> {
        Validator::validate_page(page)?;
        self.provider.upcoming(page).await
    }

    /// Search by title; a blank query never reaches the network
    pub async fn search(&self, query: &str, page: u32) -> AppResult<PagedResponse<Movie>> {
        let query = query.trim();
        if query.is_empty() {
            log_debug!("Search: blank query, returning empty page");
            return Ok(PagedResponse::empty());
        }
        Validator::validate_search_query(query)?;
        Validator::validate_page(page)?;

        LogContext::search_operation(query, Some(page), None);
        let response = self.provider.search(query, page).await?;
        LogContext::search_operation(query, Some(page), Some(response.results.len()));

        Ok(response)
    }

    /// Details and videos fetched concurrently, plus the trailer to play
    pub async fn movie_details(&self, id: u32) -> AppResult<MovieDetailsView> {
        Validator::validate_movie_id(id)?;

        let (details, videos) =
            futures::join!(self.provider.details(id), self.provider.videos(id));

        let details = details?;
        // Missing videos only disable the trailer button
        let videos = videos.unwrap_or_else(|e| {
            log_warn!("Videos for movie {} unavailable: {}", id, e);
            Vec::new()
        });
        let trailer = preferred_trailer(&videos).cloned();

        Ok(MovieDetailsView {
            details,
            videos,
            trailer,
        })
    }

    pub async fn genres(&self) -> AppResult<Vec<Genre>> {
        self.provider.genres().await
    }

    pub async fn discover(&self, filters: &DiscoverFilters) -> AppResult<PagedResponse<Movie>> {
        if let Some(page) = filters.page {
            Validator::validate_page(page)?;
        }
        self.provider.discover(filters).await
    }

    /// Full image URL for a poster/backdrop path fragment
    pub fn image_url(&self, path: Option<&str>, size: ImageSize) -> Option<String> {
        path.filter(|p| !p.is_empty())
            .map(|p| format!("{}/{}{}", self.image_base_url, size.as_str(), p))
    }
}
