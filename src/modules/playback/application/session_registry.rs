use super::session::PlaybackSession;
use super::source_resolver::SourceResolver;
use crate::log_info;
use crate::modules::playback::domain::PlaybackRequest;
use crate::shared::config::PlaybackConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::Validator;
use dashmap::DashMap;
use std::sync::Arc;
use uuid::Uuid;

/// Open player sessions addressed by id
pub struct PlayerSessionRegistry {
    resolver: Arc<SourceResolver>,
    config: PlaybackConfig,
    sessions: DashMap<Uuid, Arc<PlaybackSession>>,
}

impl PlayerSessionRegistry {
    pub fn new(resolver: Arc<SourceResolver>, config: PlaybackConfig) -> Self {
        Self {
            resolver,
            config,
            sessions: DashMap::new(),
        }
    }

    /// Start a session; resolution runs in the background
    pub fn open(&self, request: PlaybackRequest) -> AppResult<Arc<PlaybackSession>> {
        Validator::validate_movie_id(request.movie_id)?;

        let session = PlaybackSession::open(Arc::clone(&self.resolver), request, &self.config);
        self.sessions.insert(session.id(), Arc::clone(&session));

        log_info!(
            "Player {} opened for movie {} ({} open)",
            session.id(),
            session.request().movie_id,
            self.sessions.len()
        );
        Ok(session)
    }

    pub fn get(&self, id: &Uuid) -> AppResult<Arc<PlaybackSession>> {
        self.sessions
            .get(id)
            .map(|entry| Arc::clone(entry.value()))
            .ok_or_else(|| AppError::NotFound(format!("No open player with id {}", id)))
    }

    /// Close and forget a session; `false` if it was not open
    pub async fn close(&self, id: &Uuid) -> bool {
        match self.sessions.remove(id) {
            Some((_, session)) => {
                session.close().await;
                true
            }
            None => false,
        }
    }

    pub async fn close_all(&self) {
        let ids: Vec<Uuid> = self.sessions.iter().map(|entry| *entry.key()).collect();
        for id in ids {
            self.close(&id).await;
        }
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
