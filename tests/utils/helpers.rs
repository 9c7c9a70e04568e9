/// Test doubles and service builders shared by the integration tests
use async_trait::async_trait;
use marquee_lib::modules::favorites::{FavoritesService, KeyValueStore, MemoryKeyValueStore};
use marquee_lib::modules::playback::{SourceResolver, StreamingData, StreamingProvider};
use marquee_lib::shared::{AppError, AppResult, PlaybackConfig};
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Route test output through the application logger (once per binary)
pub fn init_test_logging() {
    marquee_lib::shared::utils::init_logger();
}

/// Favorites coordinator over a fresh in-memory store
pub fn memory_favorites() -> (FavoritesService, Arc<MemoryKeyValueStore>) {
    init_test_logging();
    let store = Arc::new(MemoryKeyValueStore::new());
    (FavoritesService::new(store.clone()), store)
}

/// Unique, not yet existing directory under the system temp dir
pub fn temp_data_dir() -> PathBuf {
    std::env::temp_dir().join(format!("marquee-test-{}", uuid::Uuid::new_v4()))
}

/// Resolver with the production timeout and the standard fallback table
pub fn resolver_with(provider: Arc<dyn StreamingProvider>) -> Arc<SourceResolver> {
    init_test_logging();
    Arc::new(SourceResolver::from_config(
        provider,
        &PlaybackConfig::default(),
    ))
}

/// Answers after `delay` (or never, without one) and counts calls
pub struct DelayedProvider {
    delay: Option<Duration>,
    data: StreamingData,
    calls: AtomicUsize,
}

impl DelayedProvider {
    pub fn new(delay: Duration, data: StreamingData) -> Self {
        Self {
            delay: Some(delay),
            data,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn never() -> Self {
        Self {
            delay: None,
            data: StreamingData::default(),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StreamingProvider for DelayedProvider {
    fn name(&self) -> &'static str {
        "Delayed"
    }

    async fn fetch_sources(&self, _movie_id: u32) -> AppResult<StreamingData> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.delay {
            Some(delay) => {
                tokio::time::sleep(delay).await;
                Ok(self.data.clone())
            }
            None => futures::future::pending().await,
        }
    }
}

/// Store whose reads work but every write fails
#[derive(Default)]
pub struct ReadOnlyStore {
    inner: MemoryKeyValueStore,
}

impl ReadOnlyStore {
    pub fn with_entries(entries: Vec<(&str, &str)>) -> Self {
        Self {
            inner: MemoryKeyValueStore::with_entries(entries),
        }
    }
}

impl KeyValueStore for ReadOnlyStore {
    fn get(&self, key: &str) -> AppResult<Option<String>> {
        self.inner.get(key)
    }

    fn set_many(&self, _entries: &[(&str, String)]) -> AppResult<()> {
        Err(AppError::StorageError("disk is read-only".to_string()))
    }

    fn remove_many(&self, _keys: &[&str]) -> AppResult<()> {
        Err(AppError::StorageError("disk is read-only".to_string()))
    }
}
