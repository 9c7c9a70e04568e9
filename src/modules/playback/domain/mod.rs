pub mod fallback_rules;
pub mod notice;
pub mod playback_attempt;
pub mod playback_time;
pub mod public_domain;
pub mod repositories;
pub mod streaming_source;

// Re-exports for easy access
pub use fallback_rules::{FallbackMatcher, FallbackRule, FallbackRules};
pub use notice::{NoticeSeverity, PlayerNotice};
pub use playback_attempt::{PlaybackAttempt, PlaybackAttemptState, RetryDecision};
pub use playback_time::{format_playback_time, seek_position};
pub use repositories::streaming_provider::StreamingProvider;
pub use streaming_source::{PlaybackRequest, StreamingData, StreamingSource, SubtitleTrack};
