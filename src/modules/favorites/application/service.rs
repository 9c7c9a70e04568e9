use crate::modules::favorites::domain::{
    FavoriteId, FavoriteRecord, FavoriteToggle, FavoritesChange, FavoritesSnapshot,
    KeyValueStore, FAVORITE_IDS_KEY, FAVORITE_RECORDS_KEY,
};
use crate::shared::errors::AppResult;
use crate::shared::utils::{LogContext, Validator};
use crate::{log_debug, log_warn};
use serde::de::DeserializeOwned;
use std::sync::{Arc, PoisonError, RwLock};
use tokio::sync::broadcast;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Single coordinator for the two persisted favorites collections
///
/// Every read goes to the store, so independent views never hold a stale
/// copy. Mutations run under the write half of `lock` and commit both keys
/// in one batch; readers take the read half and therefore never see one
/// collection updated without the other.
pub struct FavoritesService {
    store: Arc<dyn KeyValueStore>,
    lock: RwLock<()>,
    changes: broadcast::Sender<FavoritesChange>,
}

impl FavoritesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self {
            store,
            lock: RwLock::new(()),
            changes,
        }
    }

    /// Whether `id` is currently a favorite
    pub fn is_favorite(&self, id: FavoriteId) -> bool {
        self.snapshot().contains(id)
    }

    /// Add the record if absent, remove it if present
    pub fn toggle_favorite(&self, record: FavoriteRecord) -> AppResult<FavoriteToggle> {
        Validator::validate_movie_id(record.id)?;
        let id = record.id;

        let (outcome, total) = {
            let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
            let mut snapshot = self.load();
            let outcome = snapshot.toggle(record);
            self.persist(&snapshot)?;
            (outcome, snapshot.len())
        };

        let change = match outcome {
            FavoriteToggle::Added => FavoritesChange::Added(id),
            FavoriteToggle::Removed => FavoritesChange::Removed(id),
        };
        LogContext::favorites_change(outcome.message(), id, total);
        self.publish(change);

        Ok(outcome)
    }

    /// Remove both collections from the store
    pub fn clear_all(&self) -> AppResult<()> {
        {
            let _guard = self.lock.write().unwrap_or_else(PoisonError::into_inner);
            self.store
                .remove_many(&[FAVORITE_IDS_KEY, FAVORITE_RECORDS_KEY])?;
        }

        log_debug!("Favorites: cleared");
        self.publish(FavoritesChange::Cleared);
        Ok(())
    }

    /// Cached records in the order they were favorited
    pub fn favorites(&self) -> Vec<FavoriteRecord> {
        self.snapshot().into_records()
    }

    pub fn favorite_ids(&self) -> Vec<FavoriteId> {
        self.snapshot().ids().to_vec()
    }

    pub fn count(&self) -> usize {
        self.snapshot().len()
    }

    /// Consistent view of both collections
    pub fn snapshot(&self) -> FavoritesSnapshot {
        let _guard = self.lock.read().unwrap_or_else(PoisonError::into_inner);
        self.load()
    }

    /// Change feed; receivers only see mutations made after subscribing
    pub fn subscribe(&self) -> broadcast::Receiver<FavoritesChange> {
        self.changes.subscribe()
    }

    fn publish(&self, change: FavoritesChange) {
        // No subscribers is the common case
        let _ = self.changes.send(change);
    }

    fn load(&self) -> FavoritesSnapshot {
        let ids: Vec<FavoriteId> = self.read_collection(FAVORITE_IDS_KEY);
        let records: Vec<FavoriteRecord> = self.read_collection(FAVORITE_RECORDS_KEY);

        let (snapshot, repaired) = FavoritesSnapshot::reconcile(ids, records);
        if repaired {
            log_warn!(
                "Favorites: stored collections disagreed, using {} shared entries",
                snapshot.len()
            );
        }
        snapshot
    }

    /// Missing or malformed data is an empty collection
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                log_warn!("Favorites: cannot read '{}': {}", key, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            log_warn!("Favorites: malformed '{}' ignored: {}", key, e);
            Vec::new()
        })
    }

    fn persist(&self, snapshot: &FavoritesSnapshot) -> AppResult<()> {
        let ids = serde_json::to_string(snapshot.ids())?;
        let records = serde_json::to_string(snapshot.records())?;

        self.store
            .set_many(&[(FAVORITE_IDS_KEY, ids), (FAVORITE_RECORDS_KEY, records)])
    }
}
