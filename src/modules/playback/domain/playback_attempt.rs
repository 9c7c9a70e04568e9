//! Bounded-retry playback state machine
//!
//! ```text
//! Idle -> Loading -> Playing
//! Loading | Playing -> Error
//! Error -> Loading   (retry granted, cursor advanced)
//! Error -> Failed    (retries exhausted, terminal)
//! Loading | Playing | Error | Failed -> Loading   (manual selection)
//! ```
//!
//! The machine is pure: it never sleeps or spawns. The session that owns it
//! decides when a granted retry actually re-enters `Loading`.

use super::streaming_source::StreamingSource;
use super::playback_time::seek_position;
use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use specta::Type;

/// Automatic recoveries allowed between two successful loads
pub const DEFAULT_MAX_RETRIES: u32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Type)]
pub enum PlaybackAttemptState {
    #[default]
    Idle,
    Loading,
    Playing,
    Error,
    Failed,
}

impl PlaybackAttemptState {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlaybackAttemptState::Idle => "idle",
            PlaybackAttemptState::Loading => "loading",
            PlaybackAttemptState::Playing => "playing",
            PlaybackAttemptState::Error => "error",
            PlaybackAttemptState::Failed => "failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, PlaybackAttemptState::Failed)
    }
}

impl std::fmt::Display for PlaybackAttemptState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What happened after a load error was reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum RetryDecision {
    /// Retry `attempt` of `max_retries` granted; reload at `cursor` after the delay
    Retry { attempt: u32, cursor: u32 },
    /// No retries left
    Exhausted,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackAttempt {
    state: PlaybackAttemptState,
    sources: Vec<StreamingSource>,
    cursor: usize,
    retry_count: u32,
    max_retries: u32,
    position: f64,
    duration: Option<f64>,
}

impl Default for PlaybackAttempt {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_RETRIES)
    }
}

impl PlaybackAttempt {
    pub fn new(max_retries: u32) -> Self {
        Self {
            state: PlaybackAttemptState::Idle,
            sources: Vec::new(),
            cursor: 0,
            retry_count: 0,
            max_retries,
            position: 0.0,
            duration: None,
        }
    }

    pub fn state(&self) -> PlaybackAttemptState {
        self.state
    }

    pub fn sources(&self) -> &[StreamingSource] {
        &self.sources
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn current_source(&self) -> Option<&StreamingSource> {
        self.sources.get(self.cursor)
    }

    pub fn retry_count(&self) -> u32 {
        self.retry_count
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration
    }

    /// Idle -> Loading with the resolved candidate list
    pub fn begin(&mut self, sources: Vec<StreamingSource>) -> AppResult<()> {
        self.expect_state(&[PlaybackAttemptState::Idle], "begin loading")?;
        if sources.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot start playback without a source".to_string(),
            ));
        }

        self.sources = sources;
        self.cursor = 0;
        self.retry_count = 0;
        self.position = 0.0;
        self.state = PlaybackAttemptState::Loading;
        Ok(())
    }

    /// Loading -> Playing; a successful load forgets earlier failures
    pub fn loaded(&mut self, duration: Option<f64>) -> AppResult<()> {
        self.expect_state(&[PlaybackAttemptState::Loading], "mark as loaded")?;

        self.retry_count = 0;
        self.duration = duration.filter(|d| d.is_finite() && *d > 0.0);
        self.state = PlaybackAttemptState::Playing;
        Ok(())
    }

    /// Loading | Playing -> Error, then either grant a retry or fail for good
    pub fn fail(&mut self) -> AppResult<RetryDecision> {
        self.expect_state(
            &[PlaybackAttemptState::Loading, PlaybackAttemptState::Playing],
            "report an error",
        )?;

        if self.retry_count < self.max_retries {
            self.retry_count += 1;
            self.cursor = (self.cursor + 1) % self.sources.len().max(1);
            self.state = PlaybackAttemptState::Error;
            Ok(RetryDecision::Retry {
                attempt: self.retry_count,
                cursor: self.cursor as u32,
            })
        } else {
            self.state = PlaybackAttemptState::Failed;
            Ok(RetryDecision::Exhausted)
        }
    }

    /// Error -> Loading once the retry delay elapsed; restarts from the top
    pub fn retry(&mut self) -> AppResult<()> {
        self.expect_state(&[PlaybackAttemptState::Error], "retry")?;

        self.position = 0.0;
        self.duration = None;
        self.state = PlaybackAttemptState::Loading;
        Ok(())
    }

    /// Manual source change; keeps the position, resets retry bookkeeping
    pub fn select_source(&mut self, index: usize) -> AppResult<()> {
        self.expect_state(
            &[
                PlaybackAttemptState::Loading,
                PlaybackAttemptState::Playing,
                PlaybackAttemptState::Error,
                PlaybackAttemptState::Failed,
            ],
            "select a source",
        )?;
        if index >= self.sources.len() {
            return Err(AppError::InvalidInput(format!(
                "Source {} out of range ({} available)",
                index,
                self.sources.len()
            )));
        }

        self.cursor = index;
        self.retry_count = 0;
        self.state = PlaybackAttemptState::Loading;
        Ok(())
    }

    /// Manual change by quality label (first source with that label)
    pub fn select_quality(&mut self, quality: &str) -> AppResult<usize> {
        let index = self
            .sources
            .iter()
            .position(|source| source.quality.eq_ignore_ascii_case(quality))
            .ok_or_else(|| {
                AppError::InvalidInput(format!("No '{}' source available", quality))
            })?;

        self.select_source(index)?;
        Ok(index)
    }

    /// Record the reported playback position
    pub fn set_position(&mut self, seconds: f64) -> AppResult<()> {
        if !seconds.is_finite() || seconds < 0.0 {
            return Err(AppError::ValidationError(format!(
                "Invalid playback position: {}",
                seconds
            )));
        }
        self.position = seconds;
        Ok(())
    }

    /// Skip forward or back, never before the start
    pub fn seek_by(&mut self, delta: f64) -> f64 {
        self.position = seek_position(self.position, delta, self.duration);
        self.position
    }

    fn expect_state(&self, allowed: &[PlaybackAttemptState], action: &str) -> AppResult<()> {
        if allowed.contains(&self.state) {
            Ok(())
        } else {
            Err(AppError::InvalidOperation(format!(
                "Cannot {} while {}",
                action, self.state
            )))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sources(n: usize) -> Vec<StreamingSource> {
        (0..n)
            .map(|i| StreamingSource::new(format!("Q{}", i), format!("https://cdn/{}.mp4", i)))
            .collect()
    }

    fn loading(n: usize) -> PlaybackAttempt {
        let mut attempt = PlaybackAttempt::default();
        attempt.begin(sources(n)).unwrap();
        attempt
    }

    #[test]
    fn test_happy_path() {
        let mut attempt = loading(2);
        assert_eq!(attempt.state(), PlaybackAttemptState::Loading);
        attempt.loaded(Some(5400.0)).unwrap();
        assert_eq!(attempt.state(), PlaybackAttemptState::Playing);
        assert_eq!(attempt.duration(), Some(5400.0));
    }

    #[test]
    fn test_error_advances_cursor_with_wrap() {
        let mut attempt = loading(2);

        assert_eq!(
            attempt.fail().unwrap(),
            RetryDecision::Retry { attempt: 1, cursor: 1 }
        );
        attempt.retry().unwrap();
        assert_eq!(
            attempt.fail().unwrap(),
            RetryDecision::Retry { attempt: 2, cursor: 0 }
        );
    }

    #[test]
    fn test_three_consecutive_errors_fail() {
        let mut attempt = loading(3);
        for _ in 0..2 {
            assert!(matches!(attempt.fail().unwrap(), RetryDecision::Retry { .. }));
            attempt.retry().unwrap();
        }
        assert_eq!(attempt.fail().unwrap(), RetryDecision::Exhausted);
        assert_eq!(attempt.state(), PlaybackAttemptState::Failed);
        assert!(attempt.retry().is_err());

        // Only a manual change leaves Failed
        attempt.select_source(1).unwrap();
        assert_eq!(attempt.state(), PlaybackAttemptState::Loading);
        assert_eq!(attempt.retry_count(), 0);
        assert_eq!(attempt.cursor(), 1);
    }

    #[test]
    fn test_single_source_wraps_to_itself() {
        let mut attempt = loading(1);
        assert_eq!(
            attempt.fail().unwrap(),
            RetryDecision::Retry { attempt: 1, cursor: 0 }
        );
    }

    #[test]
    fn test_successful_load_resets_retry_budget() {
        let mut attempt = loading(2);
        attempt.fail().unwrap();
        attempt.retry().unwrap();
        attempt.fail().unwrap();
        attempt.retry().unwrap();
        attempt.loaded(None).unwrap();
        assert_eq!(attempt.retry_count(), 0);

        assert!(matches!(attempt.fail().unwrap(), RetryDecision::Retry { attempt: 1, .. }));
    }

    #[test]
    fn test_manual_selection_preserves_position() {
        let mut attempt = loading(2);
        attempt.loaded(None).unwrap();
        attempt.set_position(42.0).unwrap();
        attempt.fail().unwrap();

        attempt.select_quality("q0").unwrap();
        assert_eq!(attempt.state(), PlaybackAttemptState::Loading);
        assert_eq!(attempt.cursor(), 0);
        assert_eq!(attempt.retry_count(), 0);
        assert_eq!(attempt.position(), 42.0);
    }

    #[test]
    fn test_error_recovery_resets_position() {
        let mut attempt = loading(2);
        attempt.loaded(None).unwrap();
        attempt.set_position(42.0).unwrap();
        attempt.fail().unwrap();
        attempt.retry().unwrap();
        assert_eq!(attempt.position(), 0.0);
    }

    #[test]
    fn test_invalid_transitions_are_rejected() {
        let mut attempt = PlaybackAttempt::default();
        assert!(matches!(attempt.loaded(None), Err(AppError::InvalidOperation(_))));
        assert!(matches!(attempt.fail(), Err(AppError::InvalidOperation(_))));
        assert!(matches!(attempt.retry(), Err(AppError::InvalidOperation(_))));

        assert!(attempt.begin(Vec::new()).is_err());
        attempt.begin(sources(1)).unwrap();
        assert!(matches!(attempt.begin(sources(1)), Err(AppError::InvalidOperation(_))));
    }

    #[test]
    fn test_seek_by_clamps_at_zero() {
        let mut attempt = loading(1);
        attempt.set_position(3.0).unwrap();
        assert_eq!(attempt.seek_by(-10.0), 0.0);
        assert_eq!(attempt.seek_by(10.0), 10.0);
    }
}
