//! Environment-driven configuration
//!
//! Values are read once at startup (after `dotenvy::dotenv()`) and injected
//! into the services that need them, so credentials never live in code.

use crate::shared::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_TMDB_BASE_URL: &str = "https://api.themoviedb.org/3";
pub const DEFAULT_TMDB_IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Connection settings for the TMDB metadata provider
#[derive(Clone, Deserialize)]
pub struct TmdbConfig {
    pub base_url: String,
    pub api_key: String,
    pub image_base_url: String,
    pub language: String,
}

impl fmt::Debug for TmdbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let api_key = if self.has_credentials() { "***" } else { "<unset>" };
        f.debug_struct("TmdbConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &api_key)
            .field("image_base_url", &self.image_base_url)
            .field("language", &self.language)
            .finish()
    }
}

impl TmdbConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            base_url: DEFAULT_TMDB_BASE_URL.to_string(),
            api_key: api_key.into(),
            image_base_url: DEFAULT_TMDB_IMAGE_BASE_URL.to_string(),
            language: "en-US".to_string(),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

/// Timing and retry knobs of the player
#[derive(Debug, Clone, Serialize, Deserialize, Type)]
pub struct PlaybackConfig {
    /// How long source resolution waits for the streaming provider
    pub resolution_timeout_ms: u32,
    /// Delay before an automatic retry reloads the next source
    pub retry_delay_ms: u32,
    /// Automatic recoveries allowed before playback fails for good
    pub max_retries: u32,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            resolution_timeout_ms: 5_000,
            retry_delay_ms: 2_000,
            max_retries: 2,
        }
    }
}

impl PlaybackConfig {
    pub fn resolution_timeout(&self) -> Duration {
        Duration::from_millis(self.resolution_timeout_ms as u64)
    }

    pub fn retry_delay(&self) -> Duration {
        Duration::from_millis(self.retry_delay_ms as u64)
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub tmdb: TmdbConfig,
    /// Base URL of a real streaming backend; the local catalog is used when unset
    pub streaming_api_url: Option<String>,
    /// Directory holding the persisted favorites file
    pub data_dir: Option<PathBuf>,
    pub playback: PlaybackConfig,
}

impl AppConfig {
    /// Build configuration from process environment
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();

        let api_key = env_var("TMDB_API_KEY").unwrap_or_default();
        if api_key.is_empty() {
            log::warn!("TMDB_API_KEY is not set; catalog requests will be rejected by TMDB");
        }

        let mut tmdb = TmdbConfig::new(api_key);
        if let Some(base_url) = env_var("TMDB_BASE_URL") {
            tmdb = tmdb.with_base_url(base_url);
        }
        if let Some(image_base_url) = env_var("TMDB_IMAGE_BASE_URL") {
            tmdb.image_base_url = image_base_url.trim_end_matches('/').to_string();
        }
        if let Some(language) = env_var("TMDB_LANGUAGE") {
            tmdb.language = language;
        }

        let defaults = PlaybackConfig::default();
        let playback = PlaybackConfig {
            resolution_timeout_ms: parse_env("PLAYER_RESOLUTION_TIMEOUT_MS")?
                .unwrap_or(defaults.resolution_timeout_ms),
            retry_delay_ms: parse_env("PLAYER_RETRY_DELAY_MS")?
                .unwrap_or(defaults.retry_delay_ms),
            max_retries: parse_env("PLAYER_MAX_RETRIES")?.unwrap_or(defaults.max_retries),
        };

        Ok(Self {
            tmdb,
            streaming_api_url: env_var("STREAMING_API_URL"),
            data_dir: env_var("MARQUEE_DATA_DIR").map(PathBuf::from),
            playback,
        })
    }
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parse_env(name: &str) -> AppResult<Option<u32>> {
    match env_var(name) {
        Some(raw) => raw.parse::<u32>().map(Some).map_err(|e| {
            AppError::ConfigurationError(format!("{} must be an integer: {}", name, e))
        }),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_playback_defaults_match_reference_timings() {
        let config = PlaybackConfig::default();
        assert_eq!(config.resolution_timeout(), Duration::from_secs(5));
        assert_eq!(config.retry_delay(), Duration::from_secs(2));
        assert_eq!(config.max_retries, 2);
    }

    #[test]
    fn test_base_url_trailing_slash_is_trimmed() {
        let config = TmdbConfig::new("key").with_base_url("http://localhost:8080/3/");
        assert_eq!(config.base_url, "http://localhost:8080/3");
        assert!(config.has_credentials());
        assert!(!TmdbConfig::new("  ").has_credentials());
    }

    #[test]
    fn test_debug_output_masks_api_key() {
        let config = AppConfig {
            tmdb: TmdbConfig::new("tmdb-secret-key"),
            streaming_api_url: None,
            data_dir: None,
            playback: PlaybackConfig::default(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("tmdb-secret-key"));
        assert!(rendered.contains("api_key: \"***\""));
        assert!(format!("{:?}", TmdbConfig::new("")).contains("<unset>"));
    }
}
