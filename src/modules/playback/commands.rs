use super::application::{session::SessionSnapshot, session_registry::PlayerSessionRegistry};
use super::domain::PlaybackRequest;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use tauri::State;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct OpenPlayerRequest {
    pub movie: PlaybackRequest,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct PlayerSessionRequest {
    pub session_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct GetPlayerSnapshotRequest {
    pub session_id: Uuid,
    /// Block until sources are resolved (bounded by the resolution timeout)
    #[serde(default)]
    pub wait_for_sources: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ReportLoadedRequest {
    pub session_id: Uuid,
    pub duration: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct ReportPositionRequest {
    pub session_id: Uuid,
    pub seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SeekPlayerRequest {
    pub session_id: Uuid,
    pub delta_seconds: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SelectSourceRequest {
    pub session_id: Uuid,
    pub index: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct SelectQualityRequest {
    pub session_id: Uuid,
    pub quality: String,
}

#[tauri::command]
#[specta::specta]
pub async fn open_player(
    request: OpenPlayerRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<SessionSnapshot, String> {
    let session = registry.open(request.movie).map_err(|e| e.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
#[specta::specta]
pub async fn get_player_snapshot(
    request: GetPlayerSnapshotRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<SessionSnapshot, String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;

    if request.wait_for_sources {
        session
            .wait_until_resolved()
            .await
            .map_err(|e| e.to_string())
    } else {
        Ok(session.snapshot())
    }
}

#[tauri::command]
#[specta::specta]
pub async fn report_player_loaded(
    request: ReportLoadedRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<SessionSnapshot, String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;
    session
        .report_loaded(request.duration)
        .await
        .map_err(|e| e.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
#[specta::specta]
pub async fn report_player_error(
    request: PlayerSessionRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<SessionSnapshot, String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;
    session.report_error().await.map_err(|e| e.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
#[specta::specta]
pub async fn report_player_position(
    request: ReportPositionRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<(), String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;
    session
        .report_position(request.seconds)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[specta::specta]
pub async fn seek_player(
    request: SeekPlayerRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<f64, String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;
    session
        .seek_by(request.delta_seconds)
        .await
        .map_err(|e| e.to_string())
}

#[tauri::command]
#[specta::specta]
pub async fn select_player_source(
    request: SelectSourceRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<SessionSnapshot, String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;
    session
        .select_source(request.index as usize)
        .await
        .map_err(|e| e.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
#[specta::specta]
pub async fn select_player_quality(
    request: SelectQualityRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<SessionSnapshot, String> {
    let session = registry
        .get(&request.session_id)
        .map_err(|e| e.to_string())?;
    session
        .select_quality(&request.quality)
        .await
        .map_err(|e| e.to_string())?;
    Ok(session.snapshot())
}

#[tauri::command]
#[specta::specta]
pub async fn close_player(
    request: PlayerSessionRequest,
    registry: State<'_, Arc<PlayerSessionRegistry>>,
) -> Result<bool, String> {
    Ok(registry.close(&request.session_id).await)
}
