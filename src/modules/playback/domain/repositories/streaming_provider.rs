use crate::modules::playback::domain::StreamingData;
use crate::shared::errors::AppResult;
use async_trait::async_trait;

/// Source of playable renditions for a catalog item
///
/// Implementations may be slow or fail; the resolver bounds them with a
/// timeout and falls back on its own.
#[async_trait]
pub trait StreamingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn fetch_sources(&self, movie_id: u32) -> AppResult<StreamingData>;
}
