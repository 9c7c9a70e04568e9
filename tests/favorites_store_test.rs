//! Favorites coordinator tests
//!
//! Exercises both persisted collections through the public service API,
//! over the in-memory and the JSON file stores.

mod utils;

use marquee_lib::modules::catalog::Movie;
use marquee_lib::modules::favorites::{
    FavoriteToggle, FavoritesChange, FavoritesService, JsonFileKeyValueStore, KeyValueStore,
    MemoryKeyValueStore, FAVORITE_IDS_KEY, FAVORITE_RECORDS_KEY,
};
use marquee_lib::shared::AppError;
use std::collections::HashSet;
use std::sync::Arc;
use utils::{factories::MovieFactory, helpers};

fn assert_lockstep(favorites: &FavoritesService) {
    let ids: HashSet<u32> = favorites.favorite_ids().into_iter().collect();
    let record_ids: HashSet<u32> = favorites.favorites().iter().map(|m| m.id).collect();
    assert_eq!(ids, record_ids);
    assert_eq!(ids.len(), favorites.count());
}

fn stored_ids(store: &dyn KeyValueStore) -> Vec<u32> {
    store
        .get(FAVORITE_IDS_KEY)
        .unwrap()
        .map(|raw| serde_json::from_str(&raw).unwrap())
        .unwrap_or_default()
}

#[test]
fn test_collections_stay_in_lockstep() {
    let (favorites, store) = helpers::memory_favorites();
    let movies = MovieFactory::batch(100, 6);

    for movie in &movies {
        favorites.toggle_favorite(movie.clone()).unwrap();
        assert_lockstep(&favorites);
    }
    for movie in movies.iter().step_by(2) {
        favorites.toggle_favorite(movie.clone()).unwrap();
        assert_lockstep(&favorites);
    }

    assert_eq!(favorites.favorite_ids(), vec![101, 103, 105]);
    assert_eq!(stored_ids(store.as_ref()), vec![101, 103, 105]);

    let records: Vec<Movie> =
        serde_json::from_str(&store.get(FAVORITE_RECORDS_KEY).unwrap().unwrap()).unwrap();
    assert_eq!(
        records.iter().map(|m| m.id).collect::<Vec<_>>(),
        vec![101, 103, 105]
    );
}

#[test]
fn test_toggle_pair_leaves_store_unchanged() {
    let (favorites, store) = helpers::memory_favorites();
    for movie in MovieFactory::batch(1, 3) {
        favorites.toggle_favorite(movie).unwrap();
    }

    let ids_before = store.get(FAVORITE_IDS_KEY).unwrap();
    let records_before = store.get(FAVORITE_RECORDS_KEY).unwrap();

    let movie = MovieFactory::new().id(42).title("Metropolis").build();
    assert_eq!(
        favorites.toggle_favorite(movie.clone()).unwrap(),
        FavoriteToggle::Added
    );
    assert_eq!(
        favorites.toggle_favorite(movie).unwrap(),
        FavoriteToggle::Removed
    );

    assert_eq!(store.get(FAVORITE_IDS_KEY).unwrap(), ids_before);
    assert_eq!(store.get(FAVORITE_RECORDS_KEY).unwrap(), records_before);
}

#[test]
fn test_rapid_double_toggle_never_duplicates() {
    let (favorites, _) = helpers::memory_favorites();
    let movie = MovieFactory::new().id(7).build();

    favorites.toggle_favorite(movie.clone()).unwrap();
    favorites.toggle_favorite(movie.clone()).unwrap();
    favorites.toggle_favorite(movie).unwrap();

    assert_eq!(favorites.favorite_ids(), vec![7]);
    assert_eq!(favorites.favorites().len(), 1);
}

#[test]
fn test_clear_all_removes_both_keys() {
    let (favorites, store) = helpers::memory_favorites();
    for movie in MovieFactory::batch(10, 4) {
        favorites.toggle_favorite(movie).unwrap();
    }

    favorites.clear_all().unwrap();

    assert_eq!(store.get(FAVORITE_IDS_KEY).unwrap(), None);
    assert_eq!(store.get(FAVORITE_RECORDS_KEY).unwrap(), None);
    assert!(store.is_empty());
    assert_eq!(favorites.count(), 0);
    assert!(!favorites.is_favorite(10));
}

#[test]
fn test_malformed_data_reads_as_empty() {
    let store = Arc::new(MemoryKeyValueStore::with_entries(vec![
        (FAVORITE_IDS_KEY, "{{definitely not json"),
        (FAVORITE_RECORDS_KEY, "[{\"id\": \"oops\"}]"),
    ]));
    let favorites = FavoritesService::new(store.clone());

    assert!(!favorites.is_favorite(550));
    assert!(favorites.favorites().is_empty());

    // The next write replaces the garbage with a consistent pair
    favorites
        .toggle_favorite(MovieFactory::new().id(550).title("Fight Club").build())
        .unwrap();
    assert_eq!(stored_ids(store.as_ref()), vec![550]);
    assert_lockstep(&favorites);
}

#[test]
fn test_inconsistent_collections_reconcile_to_intersection() {
    let records = serde_json::to_string(&vec![
        MovieFactory::new().id(2).build(),
        MovieFactory::new().id(3).build(),
        MovieFactory::new().id(3).title("Duplicate").build(),
        MovieFactory::new().id(9).build(),
    ])
    .unwrap();
    let store = Arc::new(MemoryKeyValueStore::with_entries(vec![
        (FAVORITE_IDS_KEY.to_string(), "[1, 2, 3]".to_string()),
        (FAVORITE_RECORDS_KEY.to_string(), records),
    ]));
    let favorites = FavoritesService::new(store.clone());

    assert_eq!(favorites.favorite_ids(), vec![2, 3]);
    assert!(!favorites.is_favorite(1));
    assert!(!favorites.is_favorite(9));
    assert_eq!(favorites.favorites()[1].title, "Test Movie");

    // Removing one entry rewrites storage in its repaired form
    favorites
        .toggle_favorite(MovieFactory::new().id(2).build())
        .unwrap();
    assert_eq!(stored_ids(store.as_ref()), vec![3]);
}

#[test]
fn test_fresh_instance_sees_persisted_favorite() {
    let data_dir = helpers::temp_data_dir();

    {
        let store = Arc::new(JsonFileKeyValueStore::in_dir(&data_dir));
        let favorites = FavoritesService::new(store);
        favorites
            .toggle_favorite(MovieFactory::new().id(550).title("Fight Club").build())
            .unwrap();
    }

    // New store and coordinator, as a freshly mounted view would get
    let favorites = FavoritesService::new(Arc::new(JsonFileKeyValueStore::in_dir(&data_dir)));
    assert!(favorites.is_favorite(550));
    assert_eq!(favorites.favorites()[0].title, "Fight Club");

    let _ = std::fs::remove_dir_all(&data_dir);
}

#[test]
fn test_two_coordinators_on_one_store_agree() {
    let store = Arc::new(MemoryKeyValueStore::new());
    let details_view = FavoritesService::new(store.clone());
    let favorites_page = FavoritesService::new(store);

    details_view
        .toggle_favorite(MovieFactory::new().id(12644).build())
        .unwrap();
    assert!(favorites_page.is_favorite(12644));

    favorites_page
        .toggle_favorite(MovieFactory::new().id(12644).build())
        .unwrap();
    assert!(!details_view.is_favorite(12644));
}

#[test]
fn test_failed_write_changes_nothing() {
    let favorites = FavoritesService::new(Arc::new(helpers::ReadOnlyStore::default()));

    let result = favorites.toggle_favorite(MovieFactory::new().id(5).build());
    assert!(matches!(result, Err(AppError::StorageError(_))));
    assert!(!favorites.is_favorite(5));
    assert!(favorites.clear_all().is_err());
}

#[test]
fn test_concurrent_toggles_keep_lockstep() {
    let (favorites, _) = helpers::memory_favorites();
    let favorites = Arc::new(favorites);

    std::thread::scope(|scope| {
        for worker in 0..8u32 {
            let favorites = Arc::clone(&favorites);
            scope.spawn(move || {
                for i in 0..25u32 {
                    let id = worker * 1_000 + i + 1;
                    favorites
                        .toggle_favorite(MovieFactory::new().id(id).build())
                        .unwrap();
                }
            });
        }
    });

    assert_eq!(favorites.count(), 200);
    assert_lockstep(&favorites);
}

#[tokio::test]
async fn test_subscribers_see_every_mutation() {
    let (favorites, _) = helpers::memory_favorites();
    let mut changes = favorites.subscribe();

    let movie = MovieFactory::new().id(657).title("Nosferatu").build();
    favorites.toggle_favorite(movie.clone()).unwrap();
    favorites.toggle_favorite(movie).unwrap();
    favorites.clear_all().unwrap();

    assert_eq!(changes.recv().await.unwrap(), FavoritesChange::Added(657));
    assert_eq!(changes.recv().await.unwrap(), FavoritesChange::Removed(657));
    assert_eq!(changes.recv().await.unwrap(), FavoritesChange::Cleared);
}
