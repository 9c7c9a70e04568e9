use crate::modules::playback::domain::{
    public_domain, FallbackRules, PlaybackRequest, PlayerNotice, StreamingData, StreamingProvider,
    StreamingSource, SubtitleTrack,
};
use crate::shared::config::PlaybackConfig;
use crate::shared::utils::TimedOperation;
use crate::{log_info, log_warn};
use serde::{Deserialize, Serialize};
use specta::Type;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum FallbackReason {
    Timeout,
    ProviderError,
    EmptyResponse,
}

/// Where the active candidate list came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(tag = "kind", content = "reason")]
pub enum SourceOrigin {
    Provider,
    Fallback(FallbackReason),
    /// Nothing in the fallback table applied
    Default,
}

/// Outcome of one resolution; `sources` is never empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Type)]
pub struct Resolution {
    pub sources: Vec<StreamingSource>,
    pub subtitles: Vec<SubtitleTrack>,
    pub origin: SourceOrigin,
    pub notice: PlayerNotice,
    /// Name of the fallback rule that supplied the sources
    pub rule: Option<String>,
}

impl Resolution {
    pub fn is_fallback(&self) -> bool {
        !matches!(self.origin, SourceOrigin::Provider)
    }
}

/// Races the streaming provider against a deadline and falls back deterministically
pub struct SourceResolver {
    provider: Arc<dyn StreamingProvider>,
    rules: FallbackRules,
    timeout: Duration,
}

impl SourceResolver {
    pub fn new(provider: Arc<dyn StreamingProvider>, timeout: Duration) -> Self {
        Self {
            provider,
            rules: FallbackRules::standard(),
            timeout,
        }
    }

    pub fn from_config(provider: Arc<dyn StreamingProvider>, config: &PlaybackConfig) -> Self {
        Self::new(provider, config.resolution_timeout())
    }

    pub fn with_rules(mut self, rules: FallbackRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn rules(&self) -> &FallbackRules {
        &self.rules
    }

    /// Resolve the candidate list for `request`
    ///
    /// Never fails. If the deadline passes first the provider future is
    /// dropped, so its eventual answer is discarded.
    pub async fn resolve(&self, request: &PlaybackRequest) -> Resolution {
        let timer = TimedOperation::new("source resolution");
        let fetch = self.provider.fetch_sources(request.movie_id);

        let resolution = match tokio::time::timeout(self.timeout, fetch).await {
            Ok(Ok(data)) if !data.is_empty() => self.from_provider(request, data),
            Ok(Ok(_)) => {
                log_warn!(
                    "{} returned no sources for movie {}",
                    self.provider.name(),
                    request.movie_id
                );
                self.fallback(request, FallbackReason::EmptyResponse)
            }
            Ok(Err(e)) => {
                log_warn!(
                    "{} failed for movie {}: {}",
                    self.provider.name(),
                    request.movie_id,
                    e
                );
                self.fallback(request, FallbackReason::ProviderError)
            }
            Err(_) => {
                log_warn!(
                    "{} did not answer within {:?} for movie {}",
                    self.provider.name(),
                    self.timeout,
                    request.movie_id
                );
                self.fallback(request, FallbackReason::Timeout)
            }
        };

        timer.finish_with_info(&format!("{:?}", resolution.origin));
        resolution
    }

    /// Like [`resolve`](Self::resolve) but gives up as soon as `cancel` fires
    pub async fn resolve_until_cancelled(
        &self,
        request: &PlaybackRequest,
        cancel: &CancellationToken,
    ) -> Option<Resolution> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => None,
            resolution = self.resolve(request) => Some(resolution),
        }
    }

    fn from_provider(&self, request: &PlaybackRequest, data: StreamingData) -> Resolution {
        let quality = data
            .sources
            .first()
            .map(|source| source.quality.clone())
            .unwrap_or_else(|| "HD".to_string());

        log_info!(
            "{} resolved {} sources for movie {}",
            self.provider.name(),
            data.sources.len(),
            request.movie_id
        );

        Resolution {
            sources: data.sources,
            subtitles: data.subtitles,
            origin: SourceOrigin::Provider,
            notice: PlayerNotice::SourcesReady {
                title: request.title.clone(),
                quality,
            },
            rule: None,
        }
    }

    fn fallback(&self, request: &PlaybackRequest, reason: FallbackReason) -> Resolution {
        let notice = match reason {
            FallbackReason::Timeout => PlayerNotice::SlowLoading,
            FallbackReason::ProviderError | FallbackReason::EmptyResponse => {
                PlayerNotice::FallbackLoaded
            }
        };

        match self.rules.select(request) {
            Some(rule) => {
                log_info!(
                    "Fallback rule '{}' chosen for movie {} ({:?})",
                    rule.name,
                    request.movie_id,
                    reason
                );
                Resolution {
                    sources: rule.data.sources.clone(),
                    subtitles: rule.data.subtitles.clone(),
                    origin: SourceOrigin::Fallback(reason),
                    notice,
                    rule: Some(rule.name.clone()),
                }
            }
            None => Resolution {
                sources: public_domain::default_sources(),
                subtitles: Vec::new(),
                origin: SourceOrigin::Default,
                notice,
                rule: None,
            },
        }
    }
}
