use papilio_core::{
    KeyValueStore, PersistenceAdapter, SqliteKeyValueStore, StorageKeys, TaskStore,
};

#[test]
fn sqlite_store_get_missing_key_returns_none() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    assert_eq!(store.get("papilio:tasks").unwrap(), None);
}

#[test]
fn sqlite_store_set_overwrites_previous_value() {
    let mut store = SqliteKeyValueStore::open_in_memory().unwrap();
    store.set("papilio:tasks", "[]").unwrap();
    store.set("papilio:tasks", "[1]").unwrap();

    assert_eq!(store.get("papilio:tasks").unwrap().as_deref(), Some("[1]"));
    let rows: i64 = store
        .connection()
        .query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(rows, 1);
}

#[test]
fn adapter_survives_corrupt_sqlite_row() {
    let store = SqliteKeyValueStore::open_in_memory().unwrap();
    store
        .connection()
        .execute(
            "INSERT INTO kv_entries (key, value) VALUES ('papilio:tasks', 'not json');",
            [],
        )
        .unwrap();

    let adapter = PersistenceAdapter::new(store);
    let value: Vec<serde_json::Value> = adapter.load("papilio:tasks");
    assert!(value.is_empty());
}

#[test]
fn tasks_survive_reopening_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wheel.db");
    let keys = StorageKeys::default();

    let (first, second) = {
        let mut tasks = TaskStore::open(SqliteKeyValueStore::open(&path).unwrap(), &keys);
        let first = tasks.add("home", "Fix the door").unwrap();
        let second = tasks.add("home", "Water plants").unwrap();
        tasks.toggle(&first).unwrap();
        (first, second)
    };

    let reopened = TaskStore::open(SqliteKeyValueStore::open(&path).unwrap(), &keys);
    let ids: Vec<_> = reopened
        .tasks_for("home")
        .iter()
        .map(|task| task.id.clone())
        .collect();
    assert_eq!(ids, vec![second, first.clone()]);
    assert!(reopened.get(&first).unwrap().completed);
    assert_eq!(reopened.completion_count(), 1);
}

#[test]
fn namespaces_isolate_task_records() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("wheel.db");
    let alpha = StorageKeys::new("alpha").unwrap();
    let beta = StorageKeys::new("beta").unwrap();

    {
        let mut tasks = TaskStore::open(SqliteKeyValueStore::open(&path).unwrap(), &alpha);
        tasks.add("career", "Update resume").unwrap();
    }

    let other = TaskStore::open(SqliteKeyValueStore::open(&path).unwrap(), &beta);
    assert!(other.is_empty());
    let same = TaskStore::open(SqliteKeyValueStore::open(&path).unwrap(), &alpha);
    assert_eq!(same.len(), 1);
}
