use crate::{
    modules::catalog::{
        domain::{
            entities::video::VideosResponse, DiscoverFilters, Genre, MetadataProvider,
            Movie, MovieDetails, PagedResponse, TimeWindow, Video,
        },
        infrastructure::http_client::RateLimitClient,
    },
    shared::{config::TmdbConfig, errors::AppResult},
};
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct GenresResponse {
    #[serde(default)]
    genres: Vec<Genre>,
}

/// TMDB (The Movie Database) REST adapter for the movie endpoints
pub struct TmdbAdapter {
    http_client: RateLimitClient,
    config: TmdbConfig,
}

impl TmdbAdapter {
    pub fn new(config: TmdbConfig) -> Self {
        Self {
            http_client: RateLimitClient::for_tmdb(),
            config,
        }
    }

    /// Create adapter with custom HTTP client (for testing)
    pub fn with_client(http_client: RateLimitClient, config: TmdbConfig) -> Self {
        Self {
            http_client,
            config,
        }
    }

    /// Check if a request can be made immediately (for testing and monitoring)
    pub fn can_make_request_now(&self) -> bool {
        self.http_client.can_make_request_now()
    }

    /// Build URL with API key and additional query parameters
    pub fn build_url(&self, endpoint: &str, params: &[(String, String)]) -> String {
        let mut url = format!(
            "{}{}?api_key={}&language={}",
            self.config.base_url,
            endpoint,
            urlencoding::encode(&self.config.api_key),
            urlencoding::encode(&self.config.language)
        );
        for (key, value) in params {
            if key != "api_key" && key != "language" {
                url.push_str(&format!("&{}={}", key, urlencoding::encode(value)));
            }
        }
        url
    }

    fn page_param(page: u32) -> Vec<(String, String)> {
        vec![("page".to_string(), page.max(1).to_string())]
    }

    async fn movie_list(&self, endpoint: &str, page: u32) -> AppResult<PagedResponse<Movie>> {
        let url = self.build_url(endpoint, &Self::page_param(page));

        tracing::info!("TMDB: Getting {} (page {})", endpoint, page);

        let response: PagedResponse<Movie> = self.http_client.get(&url).await?;

        tracing::info!(
            "TMDB: {} returned {} movies (page {}/{})",
            endpoint,
            response.results.len(),
            response.page,
            response.total_pages
        );
        Ok(response)
    }
}

#[async_trait]
impl MetadataProvider for TmdbAdapter {
    fn name(&self) -> &'static str {
        "TMDB"
    }

    async fn trending(&self, window: TimeWindow) -> AppResult<PagedResponse<Movie>> {
        let url = self.build_url(&format!("/trending/movie/{}", window), &[]);

        tracing::info!("TMDB: Getting trending movies ({})", window);

        self.http_client.get(&url).await
    }

    async fn popular(&self, page: u32) -> AppResult<PagedResponse<Movie>> {
        self.movie_list("/movie/popular", page).await
    }

    async fn top_rated(&self, page: u32) -> AppResult<PagedResponse<Movie>> {
        self.movie_list("/movie/top_rated", page).await
    }

    async fn upcoming(&self, page: u32) -> AppResult<PagedResponse<Movie>> {
        self.movie_list("/movie/upcoming", page).await
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<PagedResponse<Movie>> {
        let mut params = Self::page_param(page);
        params.push(("query".to_string(), query.to_string()));
        let url = self.build_url("/search/movie", &params);

        tracing::info!("TMDB: Searching movies for '{}' (page {})", query, page);

        let response: PagedResponse<Movie> = self.http_client.get(&url).await?;

        tracing::info!(
            "TMDB: Found {} results for '{}'",
            response.total_results,
            query
        );
        Ok(response)
    }

    async fn details(&self, id: u32) -> AppResult<MovieDetails> {
        let url = self.build_url(&format!("/movie/{}", id), &[]);

        tracing::info!("TMDB: Getting movie details for ID '{}'", id);

        self.http_client.get(&url).await
    }

    async fn videos(&self, id: u32) -> AppResult<Vec<Video>> {
        let url = self.build_url(&format!("/movie/{}/videos", id), &[]);

        tracing::info!("TMDB: Getting videos for movie ID '{}'", id);

        let response: VideosResponse = self.http_client.get(&url).await?;

        tracing::info!(
            "TMDB: Found {} videos for movie ID '{}'",
            response.results.len(),
            id
        );
        Ok(response.results)
    }

    async fn genres(&self) -> AppResult<Vec<Genre>> {
        let url = self.build_url("/genre/movie/list", &[]);

        let response: GenresResponse = self.http_client.get(&url).await?;
        Ok(response.genres)
    }

    async fn discover(&self, filters: &DiscoverFilters) -> AppResult<PagedResponse<Movie>> {
        let url = self.build_url("/discover/movie", &filters.to_query_params());

        tracing::info!("TMDB: Discovering movies with filters");

        let response: PagedResponse<Movie> = self.http_client.get(&url).await?;

        tracing::info!("TMDB: Discovered {} movies", response.results.len());
        Ok(response)
    }
}
