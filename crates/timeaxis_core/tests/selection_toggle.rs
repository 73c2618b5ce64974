use std::time::Duration;
use timeaxis_core::db::open_db_in_memory;
use timeaxis_core::{
    current_year, Category, Record, RecordStore, SelectorCache, SlotRepository,
    SqliteSlotRepository, StoreConfig, StoreError,
};
use tokio::time::Instant;

fn seed(conn: &rusqlite::Connection) {
    let records = vec![
        Record::new(1, Category::Person, "a", 1800).with_end(1850),
        Record::new(2, Category::Person, "b", 1820).with_end(1900),
        Record::new(3, Category::Organization, "c", 1700),
    ];
    SqliteSlotRepository::new(conn)
        .write_slot("timeAxisRecords", &serde_json::to_string(&records).unwrap())
        .unwrap();
}

#[tokio::test(start_paused = true)]
async fn toggle_waits_for_configured_latency() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut store = RecordStore::with_defaults(SqliteSlotRepository::new(&conn));
    store.load().unwrap();

    let started = Instant::now();
    let selected = store.toggle_selected(2).await.unwrap();

    assert!(selected);
    assert!(started.elapsed() >= Duration::from_millis(200));
    assert_eq!(store.snapshot().selected_ids(), vec![2]);
}

#[tokio::test(start_paused = true)]
async fn dropped_toggle_leaves_previous_selection() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut store = RecordStore::with_defaults(SqliteSlotRepository::new(&conn));
    store.load().unwrap();
    let revision = store.revision();

    let pending = tokio::time::timeout(Duration::from_millis(50), store.toggle_selected(1)).await;
    assert!(pending.is_err());

    assert_eq!(store.revision(), revision);
    assert!(store.snapshot().selected_ids().is_empty());
}

#[tokio::test]
async fn toggle_only_flips_target_and_restores_after_reload() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let config = StoreConfig::default().with_toggle_min_latency(Duration::ZERO);
    let mut store = RecordStore::new(SqliteSlotRepository::new(&conn), config.clone()).unwrap();
    store.load().unwrap();

    store.toggle_selected(1).await.unwrap();
    store.toggle_selected(3).await.unwrap();
    assert!(!store.toggle_selected(3).await.unwrap());
    assert_eq!(store.snapshot().selected_ids(), vec![1]);

    let mut fresh = RecordStore::new(SqliteSlotRepository::new(&conn), config).unwrap();
    fresh.load().unwrap();
    assert!(fresh.snapshot().selected_ids().is_empty());
    assert_eq!(fresh.restore_selection().unwrap(), 1);
    assert_eq!(fresh.snapshot().selected_ids(), vec![1]);
}

#[tokio::test]
async fn toggle_unknown_id_fails_fast() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let mut store = RecordStore::with_defaults(SqliteSlotRepository::new(&conn));
    store.load().unwrap();

    let err = store.toggle_selected(42).await.unwrap_err();
    assert!(matches!(err, StoreError::NotFound(42)));
}

#[tokio::test]
async fn selectors_follow_toggles() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn);
    let config = StoreConfig::default().with_toggle_min_latency(Duration::ZERO);
    let mut store = RecordStore::new(SqliteSlotRepository::new(&conn), config).unwrap();
    store.load().unwrap();
    let mut cache = SelectorCache::new();
    let year = current_year();

    let empty = cache.view(&store.snapshot(), year);
    assert!(!empty.has_selection());
    assert_eq!((empty.area_start_year, empty.area_end_year), (0, 0));

    store.toggle_selected(2).await.unwrap();
    store.toggle_selected(1).await.unwrap();
    let view = cache.view(&store.snapshot(), year);
    let rows: Vec<u64> = view.chart_data.iter().map(|record| record.id).collect();
    assert_eq!(rows, vec![1, 2]);
    assert_eq!(view.history_range(), "A.D. 1790 ~ 1910");
    assert!(view.is_selected(2));
    assert!(!view.is_selected(3));
}
