use serde::{Deserialize, Serialize};
use specta::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum NoticeSeverity {
    Info,
    Warning,
    Error,
}

/// User-facing player notification (rendered as a toast)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(tag = "kind")]
pub enum PlayerNotice {
    /// Provider answered in time
    SourcesReady { title: String, quality: String },
    /// Provider missed the deadline; a fallback is playing
    SlowLoading,
    /// Provider failed or had nothing; a fallback is playing
    FallbackLoaded,
    /// Automatic recovery scheduled
    Retrying { attempt: u32, max_attempts: u32 },
    /// Retries exhausted
    Unavailable,
    /// User picked another rendition
    QualityChanged { quality: String },
}

impl PlayerNotice {
    pub fn title(&self) -> &'static str {
        match self {
            PlayerNotice::SourcesReady { .. } => "Movie Ready!",
            PlayerNotice::SlowLoading => "Loading Taking Too Long",
            PlayerNotice::FallbackLoaded => "Classic Movie Loaded!",
            PlayerNotice::Retrying { .. } => "Retrying...",
            PlayerNotice::Unavailable => "Video Unavailable",
            PlayerNotice::QualityChanged { .. } => "Settings Applied",
        }
    }

    pub fn description(&self) -> String {
        match self {
            PlayerNotice::SourcesReady { title, quality } => {
                format!("{} is ready to play in {} quality.", title, quality)
            }
            PlayerNotice::SlowLoading => "Using demo video instead".to_string(),
            PlayerNotice::FallbackLoaded => {
                "Playing a classic public domain film. This is a real movie from cinema history!"
                    .to_string()
            }
            PlayerNotice::Retrying {
                attempt,
                max_attempts,
            } => format!(
                "Attempt {}/{} - Trying alternative source",
                attempt, max_attempts
            ),
            PlayerNotice::Unavailable => {
                "Unable to load video after multiple attempts. Please try again later.".to_string()
            }
            PlayerNotice::QualityChanged { quality } => format!("Now playing in {}.", quality),
        }
    }

    pub fn severity(&self) -> NoticeSeverity {
        match self {
            PlayerNotice::Unavailable => NoticeSeverity::Error,
            PlayerNotice::SlowLoading | PlayerNotice::Retrying { .. } => NoticeSeverity::Warning,
            _ => NoticeSeverity::Info,
        }
    }

    /// Terminal notices offer no further automatic recovery
    pub fn is_terminal(&self) -> bool {
        matches!(self, PlayerNotice::Unavailable)
    }
}
