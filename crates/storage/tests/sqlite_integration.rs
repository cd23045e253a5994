use storage::repository::KeyValueStore;
use storage::sqlite::SqliteStore;

#[tokio::test]
async fn sqlite_round_trips_a_value() {
    let store = SqliteStore::connect("sqlite:file:memdb_roundtrip?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    assert_eq!(store.get("mathblast.progress").await.unwrap(), None);

    store
        .set("mathblast.progress", "{\"totalScore\":3}")
        .await
        .unwrap();
    assert_eq!(
        store.get("mathblast.progress").await.unwrap().as_deref(),
        Some("{\"totalScore\":3}")
    );
}

#[tokio::test]
async fn sqlite_overwrites_and_removes() {
    let store = SqliteStore::connect("sqlite:file:memdb_overwrite?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("migrate");

    store.set("k", "first").await.unwrap();
    store.set("k", "second").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));

    store.remove("k").await.unwrap();
    assert_eq!(store.get("k").await.unwrap(), None);

    // Removing a key that is already gone stays quiet.
    store.remove("k").await.unwrap();
}

#[tokio::test]
async fn sqlite_migration_is_idempotent() {
    let store = SqliteStore::connect("sqlite:file:memdb_migrate?mode=memory&cache=shared")
        .await
        .expect("connect");
    store.migrate().await.expect("first migrate");
    store.migrate().await.expect("second migrate");

    store.set("k", "v").await.unwrap();
    assert_eq!(store.get("k").await.unwrap().as_deref(), Some("v"));
}
