use crate::modules::catalog::Movie;
use serde::{Deserialize, Serialize};
use specta::Type;
use std::collections::HashSet;

/// Store key holding the JSON array of favorited ids
pub const FAVORITE_IDS_KEY: &str = "movieFavorites";
/// Store key holding the JSON array of cached movie records
pub const FAVORITE_RECORDS_KEY: &str = "favoriteMovies";

pub type FavoriteId = u32;

/// Cached movie payload, so the favorites page renders without the network
pub type FavoriteRecord = Movie;

/// Outcome of a toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
pub enum FavoriteToggle {
    Added,
    Removed,
}

impl FavoriteToggle {
    /// Favorite state after the toggle
    pub fn is_favorite(&self) -> bool {
        matches!(self, FavoriteToggle::Added)
    }

    /// Toast title shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            FavoriteToggle::Added => "Added to Favorites",
            FavoriteToggle::Removed => "Removed from Favorites",
        }
    }
}

/// Published to subscribers after every committed mutation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[serde(tag = "kind", content = "id")]
pub enum FavoritesChange {
    Added(FavoriteId),
    Removed(FavoriteId),
    Cleared,
}

/// Both favorites collections, always in lockstep
///
/// Invariant: `ids` and the ids of `records` hold exactly the same members,
/// each once, in the same order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Type)]
pub struct FavoritesSnapshot {
    ids: Vec<FavoriteId>,
    records: Vec<FavoriteRecord>,
}

impl FavoritesSnapshot {
    /// Rebuild a consistent snapshot from independently stored collections
    ///
    /// Only ids present in both collections survive; duplicates collapse to
    /// their first occurrence. Returns the snapshot and whether anything had
    /// to be dropped.
    pub fn reconcile(ids: Vec<FavoriteId>, records: Vec<FavoriteRecord>) -> (Self, bool) {
        let stored_ids: HashSet<FavoriteId> = ids.iter().copied().collect();
        let original_counts = (ids.len(), records.len());

        let mut seen = HashSet::new();
        let records: Vec<FavoriteRecord> = records
            .into_iter()
            .filter(|record| stored_ids.contains(&record.id) && seen.insert(record.id))
            .collect();

        let snapshot = Self {
            ids: records.iter().map(|record| record.id).collect(),
            records,
        };
        let repaired = original_counts != (snapshot.ids.len(), snapshot.records.len());

        (snapshot, repaired)
    }

    pub fn contains(&self, id: FavoriteId) -> bool {
        self.ids.contains(&id)
    }

    pub fn ids(&self) -> &[FavoriteId] {
        &self.ids
    }

    pub fn records(&self) -> &[FavoriteRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Flip membership of `record.id` in both collections
    pub fn toggle(&mut self, record: FavoriteRecord) -> FavoriteToggle {
        if self.contains(record.id) {
            self.ids.retain(|id| *id != record.id);
            self.records.retain(|existing| existing.id != record.id);
            FavoriteToggle::Removed
        } else {
            self.ids.push(record.id);
            self.records.push(record);
            FavoriteToggle::Added
        }
    }

    pub fn into_records(self) -> Vec<FavoriteRecord> {
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u32) -> Movie {
        Movie::new(id, format!("Movie {}", id))
    }

    #[test]
    fn test_toggle_keeps_collections_in_lockstep() {
        let mut snapshot = FavoritesSnapshot::default();

        assert_eq!(snapshot.toggle(movie(550)), FavoriteToggle::Added);
        assert_eq!(snapshot.toggle(movie(12644)), FavoriteToggle::Added);
        assert_eq!(snapshot.ids(), &[550, 12644]);
        assert_eq!(snapshot.records().len(), 2);

        assert_eq!(snapshot.toggle(movie(550)), FavoriteToggle::Removed);
        assert_eq!(snapshot.ids(), &[12644]);
        assert_eq!(snapshot.records()[0].id, 12644);
    }

    #[test]
    fn test_reconcile_keeps_only_shared_ids() {
        let (snapshot, repaired) = FavoritesSnapshot::reconcile(
            vec![1, 2, 3],
            vec![movie(2), movie(3), movie(3), movie(4)],
        );
        assert!(repaired);
        assert_eq!(snapshot.ids(), &[2, 3]);
        assert_eq!(snapshot.records().len(), 2);
    }

    #[test]
    fn test_reconcile_consistent_input_is_untouched() {
        let (snapshot, repaired) =
            FavoritesSnapshot::reconcile(vec![7, 8], vec![movie(7), movie(8)]);
        assert!(!repaired);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn test_change_serialization() {
        let json = serde_json::to_value(FavoritesChange::Added(550)).unwrap();
        assert_eq!(json["kind"], "Added");
        assert_eq!(json["id"], 550);
    }
}
