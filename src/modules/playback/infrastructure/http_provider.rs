use crate::modules::catalog::infrastructure::RateLimitClient;
use crate::modules::playback::domain::{StreamingData, StreamingProvider};
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Streaming backend reachable over HTTP
///
/// Expects `GET {base_url}/movies/{id}/sources` to answer with
/// `{ "sources": [...], "subtitles": [...] }`.
pub struct HttpStreamingProvider {
    http_client: RateLimitClient,
    base_url: String,
}

impl HttpStreamingProvider {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(RateLimitClient::for_streaming(), base_url)
    }

    pub fn with_client(http_client: RateLimitClient, base_url: impl Into<String>) -> Self {
        Self {
            http_client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn sources_url(&self, movie_id: u32) -> String {
        format!("{}/movies/{}/sources", self.base_url, movie_id)
    }
}

#[async_trait]
impl StreamingProvider for HttpStreamingProvider {
    fn name(&self) -> &'static str {
        "StreamingApi"
    }

    async fn fetch_sources(&self, movie_id: u32) -> AppResult<StreamingData> {
        let url = self.sources_url(movie_id);

        tracing::info!("Streaming: Getting sources for movie {}", movie_id);

        let data: StreamingData = self.http_client.get(&url).await?;

        tracing::info!(
            "Streaming: {} sources, {} subtitle tracks for movie {}",
            data.sources.len(),
            data.subtitles.len(),
            movie_id
        );
        Ok(data)
    }
}
