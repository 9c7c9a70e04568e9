use super::application::service::{CatalogService, HomeFeed, MovieDetailsView};
use super::domain::{DiscoverFilters, Genre, Movie, PagedResponse, TimeWindow};
use crate::shared::errors::AppError;
use crate::{log_error, log_warn};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use tauri::State;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct PageRequest {
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct GetTrendingRequest {
    pub window: Option<TimeWindow>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SearchMoviesRequest {
    pub query: String,
    pub page: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct GetMovieDetailsRequest {
    pub id: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct DiscoverMoviesRequest {
    pub filters: DiscoverFilters,
}

/// Log the full error, hand the UI its toast text
fn to_toast(error: AppError) -> String {
    if error.is_transient() {
        log_warn!("Catalog request failed: {}", error);
    } else {
        log_error!("Catalog request failed: {}", error);
    }
    error.user_message().to_string()
}

#[tauri::command]
#[specta::specta]
pub async fn get_home_feed(
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<HomeFeed, String> {
    catalog_service
        .home_feed()
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn get_trending(
    request: GetTrendingRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<PagedResponse<Movie>, String> {
    catalog_service
        .trending(request.window.unwrap_or_default())
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn get_popular(
    request: PageRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<PagedResponse<Movie>, String> {
    catalog_service
        .popular(request.page.unwrap_or(1))
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn get_top_rated(
    request: PageRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<PagedResponse<Movie>, String> {
    catalog_service
        .top_rated(request.page.unwrap_or(1))
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn get_upcoming(
    request: PageRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<PagedResponse<Movie>, String> {
    catalog_service
        .upcoming(request.page.unwrap_or(1))
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn search_movies(
    request: SearchMoviesRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<PagedResponse<Movie>, String> {
    catalog_service
        .search(&request.query, request.page.unwrap_or(1))
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn get_movie_details(
    request: GetMovieDetailsRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<MovieDetailsView, String> {
    catalog_service
        .movie_details(request.id)
        .await
        .map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn get_genres(
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<Vec<Genre>, String> {
    catalog_service.genres().await.map_err(to_toast)
}

#[tauri::command]
#[specta::specta]
pub async fn discover_movies(
    request: DiscoverMoviesRequest,
    catalog_service: State<'_, Arc<CatalogService>>,
) -> Result<PagedResponse<Movie>, String> {
    catalog_service
        .discover(&request.filters)
        .await
        .map_err(to_toast)
}
