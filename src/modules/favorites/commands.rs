use super::application::service::FavoritesService;
use super::domain::{FavoriteId, FavoriteRecord};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use tauri::State;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct IsFavoriteRequest {
    pub id: FavoriteId,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ToggleFavoriteRequest {
    pub movie: FavoriteRecord,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ToggleFavoriteResponse {
    pub is_favorite: bool,
    pub message: String,
}

#[tauri::command]
#[specta::specta]
pub async fn is_favorite(
    request: IsFavoriteRequest,
    favorites_service: State<'_, Arc<FavoritesService>>,
) -> Result<bool, String> {
    Ok(favorites_service.is_favorite(request.id))
}

#[tauri::command]
#[specta::specta]
pub async fn toggle_favorite(
    request: ToggleFavoriteRequest,
    favorites_service: State<'_, Arc<FavoritesService>>,
) -> Result<ToggleFavoriteResponse, String> {
    let outcome = favorites_service
        .toggle_favorite(request.movie)
        .map_err(|e| e.to_string())?;

    Ok(ToggleFavoriteResponse {
        is_favorite: outcome.is_favorite(),
        message: outcome.message().to_string(),
    })
}

#[tauri::command]
#[specta::specta]
pub async fn get_favorites(
    favorites_service: State<'_, Arc<FavoritesService>>,
) -> Result<Vec<FavoriteRecord>, String> {
    Ok(favorites_service.favorites())
}

#[tauri::command]
#[specta::specta]
pub async fn clear_favorites(
    favorites_service: State<'_, Arc<FavoritesService>>,
) -> Result<(), String> {
    favorites_service.clear_all().map_err(|e| e.to_string())
}
