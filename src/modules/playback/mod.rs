pub mod application;
#[cfg(feature = "desktop")]
pub mod commands;
pub mod domain;
pub mod infrastructure;

// Re-exports for easy external access
pub use application::{
    session::{PlaybackSession, SessionPhase, SessionSnapshot},
    session_registry::PlayerSessionRegistry,
    source_resolver::{FallbackReason, Resolution, SourceOrigin, SourceResolver},
};
pub use domain::{
    format_playback_time, FallbackMatcher, FallbackRule, FallbackRules, PlaybackAttempt,
    PlaybackAttemptState, PlaybackRequest, PlayerNotice, RetryDecision, StreamingData,
    StreamingProvider, StreamingSource, SubtitleTrack,
};
pub use infrastructure::{HttpStreamingProvider, LocalStreamingCatalog};
