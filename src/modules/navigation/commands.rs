use super::route::Route;
use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ResolveRouteRequest {
    pub path: String,
}

#[tauri::command]
#[specta::specta]
pub async fn resolve_route(request: ResolveRouteRequest) -> Result<Route, String> {
    Ok(Route::parse(&request.path))
}
