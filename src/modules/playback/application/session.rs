//! One open player: resolution, then the bounded-retry loop, until closed
//!
//! The session owns every background task it starts (resolution and retry
//! timers) and ties them to a single cancellation token. After `close()`
//! nothing mutates the session again: late resolutions are dropped, pending
//! retry timers are aborted and later reports are ignored.

use crate::log_debug;
use crate::modules::playback::application::source_resolver::{
    Resolution, SourceOrigin, SourceResolver,
};
use crate::modules::playback::domain::{
    format_playback_time, PlaybackAttempt, PlaybackAttemptState, PlaybackRequest, PlayerNotice,
    RetryDecision, StreamingSource, SubtitleTrack,
};
use crate::shared::config::PlaybackConfig;
use crate::shared::errors::{AppError, AppResult};
use crate::shared::utils::LogContext;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{broadcast, watch, Mutex};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

const NOTICE_CHANNEL_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum SessionPhase {
    /// Waiting for the source resolver
    Resolving,
    /// Candidate list committed; the playback attempt is running
    Active,
    Closed,
}

/// Everything a player view renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct SessionSnapshot {
    pub id: Uuid,
    pub movie_id: u32,
    pub title: String,
    pub phase: SessionPhase,
    pub state: PlaybackAttemptState,
    pub sources: Vec<StreamingSource>,
    pub subtitles: Vec<SubtitleTrack>,
    pub cursor: u32,
    pub current_source: Option<StreamingSource>,
    pub retry_count: u32,
    pub max_retries: u32,
    pub position: f64,
    pub position_label: String,
    pub origin: Option<SourceOrigin>,
    pub last_notice: Option<PlayerNotice>,
}

struct SessionInner {
    phase: SessionPhase,
    attempt: PlaybackAttempt,
    subtitles: Vec<SubtitleTrack>,
    origin: Option<SourceOrigin>,
    last_notice: Option<PlayerNotice>,
    retry_task: Option<JoinHandle<()>>,
    // Bumped whenever a pending retry must not fire anymore
    retry_generation: u64,
}

pub struct PlaybackSession {
    id: Uuid,
    request: PlaybackRequest,
    retry_delay: Duration,
    inner: Mutex<SessionInner>,
    state_tx: watch::Sender<SessionSnapshot>,
    notices: broadcast::Sender<PlayerNotice>,
    cancel: CancellationToken,
}

impl PlaybackSession {
    /// Open a session and start resolving its sources in the background
    ///
    /// Must be called from within a tokio runtime.
    pub fn open(
        resolver: Arc<SourceResolver>,
        request: PlaybackRequest,
        config: &PlaybackConfig,
    ) -> Arc<Self> {
        let session = Arc::new(Self::new(request, config));

        let task_session = Arc::clone(&session);
        tokio::spawn(async move {
            let resolution = resolver
                .resolve_until_cancelled(&task_session.request, &task_session.cancel)
                .await;

            match resolution {
                Some(resolution) => task_session.commit(resolution).await,
                None => log_debug!(
                    "Player {}: closed before sources resolved",
                    task_session.id
                ),
            }
        });

        session
    }

    fn new(request: PlaybackRequest, config: &PlaybackConfig) -> Self {
        let id = Uuid::new_v4();
        let inner = SessionInner {
            phase: SessionPhase::Resolving,
            attempt: PlaybackAttempt::new(config.max_retries),
            subtitles: Vec::new(),
            origin: None,
            last_notice: None,
            retry_task: None,
            retry_generation: 0,
        };
        let snapshot = build_snapshot(id, &request, &inner);
        let (state_tx, _) = watch::channel(snapshot);
        let (notices, _) = broadcast::channel(NOTICE_CHANNEL_CAPACITY);

        Self {
            id,
            request,
            retry_delay: config.retry_delay(),
            inner: Mutex::new(inner),
            state_tx,
            notices,
            cancel: CancellationToken::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn request(&self) -> &PlaybackRequest {
        &self.request
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        self.state_tx.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.state_tx.subscribe()
    }

    pub fn notices(&self) -> broadcast::Receiver<PlayerNotice> {
        self.notices.subscribe()
    }

    pub fn is_closed(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Wait until resolution committed (or the session closed)
    pub async fn wait_until_resolved(&self) -> AppResult<SessionSnapshot> {
        let mut states = self.subscribe();
        let snapshot = states
            .wait_for(|snapshot| snapshot.phase != SessionPhase::Resolving)
            .await
            .map_err(|e| AppError::InternalError(format!("Player state channel closed: {}", e)))?;
        Ok(snapshot.clone())
    }

    /// The player finished loading the current source
    pub async fn report_loaded(&self, duration: Option<f64>) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if !self.accepting_reports(&inner, "loaded")? {
            return Ok(());
        }

        inner.attempt.loaded(duration)?;
        self.transition_logged(&inner, PlaybackAttemptState::Loading);
        self.publish(&inner);
        Ok(())
    }

    /// The player could not load or lost the current source
    pub async fn report_error(self: &Arc<Self>) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if !self.accepting_reports(&inner, "error")? {
            return Ok(());
        }

        let from = inner.attempt.state();
        match inner.attempt.fail()? {
            RetryDecision::Retry { attempt, .. } => {
                let max_attempts = inner.attempt.max_retries() + 1;
                self.schedule_retry(&mut inner);
                self.notify(
                    &mut inner,
                    PlayerNotice::Retrying {
                        attempt,
                        max_attempts,
                    },
                );
            }
            RetryDecision::Exhausted => {
                self.notify(&mut inner, PlayerNotice::Unavailable);
            }
        }

        self.transition_logged(&inner, from);
        self.publish(&inner);
        Ok(())
    }

    pub async fn report_position(&self, seconds: f64) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if !self.accepting_reports(&inner, "position")? {
            return Ok(());
        }

        inner.attempt.set_position(seconds)?;
        self.publish(&inner);
        Ok(())
    }

    /// Skip by `delta` seconds; returns the new position
    pub async fn seek_by(&self, delta: f64) -> AppResult<f64> {
        let mut inner = self.inner.lock().await;
        if !self.accepting_reports(&inner, "seek")? {
            return Ok(inner.attempt.position());
        }

        let position = inner.attempt.seek_by(delta);
        self.publish(&inner);
        Ok(position)
    }

    /// User picked a source by index
    pub async fn select_source(&self, index: usize) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if !self.accepting_reports(&inner, "source selection")? {
            return Ok(());
        }

        let from = inner.attempt.state();
        inner.attempt.select_source(index)?;
        self.after_manual_selection(&mut inner, from);
        Ok(())
    }

    /// User picked a quality label
    pub async fn select_quality(&self, quality: &str) -> AppResult<()> {
        let mut inner = self.inner.lock().await;
        if !self.accepting_reports(&inner, "quality selection")? {
            return Ok(());
        }

        let from = inner.attempt.state();
        inner.attempt.select_quality(quality)?;
        self.after_manual_selection(&mut inner, from);
        Ok(())
    }

    /// Stop everything; idempotent
    pub async fn close(&self) {
        self.cancel.cancel();

        let mut inner = self.inner.lock().await;
        if inner.phase == SessionPhase::Closed {
            return;
        }

        Self::cancel_pending_retry(&mut inner);
        inner.phase = SessionPhase::Closed;
        LogContext::player_transition(&self.id.to_string(), inner.attempt.state().as_str(), "closed");
        self.publish(&inner);
    }

    async fn commit(&self, resolution: Resolution) {
        let mut inner = self.inner.lock().await;
        if self.cancel.is_cancelled() || inner.phase != SessionPhase::Resolving {
            log_debug!("Player {}: late resolution discarded", self.id);
            return;
        }

        if let Err(e) = inner.attempt.begin(resolution.sources) {
            LogContext::error_with_context(&e, &format!("Player {}", self.id));
            return;
        }

        inner.subtitles = resolution.subtitles;
        inner.origin = Some(resolution.origin);
        inner.phase = SessionPhase::Active;
        self.notify(&mut inner, resolution.notice);
        self.transition_logged(&inner, PlaybackAttemptState::Idle);
        self.publish(&inner);
    }

    fn schedule_retry(self: &Arc<Self>, inner: &mut SessionInner) {
        Self::cancel_pending_retry(inner);
        let generation = inner.retry_generation;

        let session = Arc::clone(self);
        let cancel = self.cancel.clone();
        let delay = self.retry_delay;

        inner.retry_task = Some(tokio::spawn(async move {
            tokio::select! {
                _ = cancel.cancelled() => {}
                _ = tokio::time::sleep(delay) => session.resume_after_retry(generation).await,
            }
        }));
    }

    async fn resume_after_retry(&self, generation: u64) {
        let mut inner = self.inner.lock().await;
        if inner.phase != SessionPhase::Active || inner.retry_generation != generation {
            return;
        }
        inner.retry_task = None;

        match inner.attempt.retry() {
            Ok(()) => {
                self.transition_logged(&inner, PlaybackAttemptState::Error);
                self.publish(&inner);
            }
            Err(e) => log_debug!("Player {}: retry skipped: {}", self.id, e),
        }
    }

    fn cancel_pending_retry(inner: &mut SessionInner) {
        inner.retry_generation += 1;
        if let Some(task) = inner.retry_task.take() {
            task.abort();
        }
    }

    fn after_manual_selection(&self, inner: &mut SessionInner, from: PlaybackAttemptState) {
        Self::cancel_pending_retry(inner);

        let quality = inner
            .attempt
            .current_source()
            .map(|source| source.quality.clone())
            .unwrap_or_default();
        self.notify(inner, PlayerNotice::QualityChanged { quality });
        self.transition_logged(inner, from);
        self.publish(inner);
    }

    /// `Ok(false)` means the session is closed and the report is ignored
    fn accepting_reports(&self, inner: &SessionInner, report: &str) -> AppResult<bool> {
        match inner.phase {
            SessionPhase::Active => Ok(true),
            SessionPhase::Closed => {
                log_debug!("Player {}: {} report after close ignored", self.id, report);
                Ok(false)
            }
            SessionPhase::Resolving => Err(AppError::InvalidOperation(format!(
                "Player {} is still resolving sources",
                self.id
            ))),
        }
    }

    fn notify(&self, inner: &mut SessionInner, notice: PlayerNotice) {
        inner.last_notice = Some(notice.clone());
        // Nobody listening is fine; the snapshot carries the last notice
        let _ = self.notices.send(notice);
    }

    fn publish(&self, inner: &SessionInner) {
        self.state_tx
            .send_replace(build_snapshot(self.id, &self.request, inner));
    }

    fn transition_logged(&self, inner: &SessionInner, from: PlaybackAttemptState) {
        LogContext::player_transition(
            &self.id.to_string(),
            from.as_str(),
            inner.attempt.state().as_str(),
        );
    }
}

fn build_snapshot(id: Uuid, request: &PlaybackRequest, inner: &SessionInner) -> SessionSnapshot {
    let attempt = &inner.attempt;
    SessionSnapshot {
        id,
        movie_id: request.movie_id,
        title: request.title.clone(),
        phase: inner.phase,
        state: attempt.state(),
        sources: attempt.sources().to_vec(),
        subtitles: inner.subtitles.clone(),
        cursor: attempt.cursor() as u32,
        current_source: attempt.current_source().cloned(),
        retry_count: attempt.retry_count(),
        max_retries: attempt.max_retries(),
        position: attempt.position(),
        position_label: format_playback_time(attempt.position()),
        origin: inner.origin,
        last_notice: inner.last_notice.clone(),
    }
}
