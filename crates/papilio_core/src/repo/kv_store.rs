//! Key-value storage contracts and backends.
//!
//! # Responsibility
//! - Provide raw string get/set over a durable local store.
//! - Keep SQL details inside the persistence boundary.
//! - Scope record keys to a storage namespace.
//!
//! # Invariants
//! - `set` overwrites the previous value for the same key (last write wins).
//! - SQLite stores only accept connections with migrations applied.

use crate::db::migrations::latest_version;
use crate::db::{open_db, open_db_in_memory, DbError};
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;

/// Namespace used when the host does not configure one.
pub const DEFAULT_NAMESPACE: &str = "papilio";
/// Record name of the persisted task collection.
pub const TASKS_RECORD: &str = "tasks";

pub type StoreResult<T> = Result<T, StoreError>;

/// Storage backend and key errors.
#[derive(Debug)]
pub enum StoreError {
    Db(DbError),
    Serialize(serde_json::Error),
    InvalidNamespace(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Serialize(err) => write!(f, "failed to serialize record: {err}"),
            Self::InvalidNamespace(value) => write!(
                f,
                "storage namespace must be non-empty and must not contain `:`, got `{value}`"
            ),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Serialize(err) => Some(err),
            Self::InvalidNamespace(_) | Self::UninitializedConnection { .. } => None,
        }
    }
}

impl From<DbError> for StoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Serialize(value)
    }
}

/// Namespaced record keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageKeys {
    namespace: String,
}

impl StorageKeys {
    /// Validates and wraps a namespace.
    ///
    /// # Errors
    /// - `StoreError::InvalidNamespace` for blank values or values containing `:`.
    pub fn new(namespace: &str) -> StoreResult<Self> {
        let trimmed = namespace.trim();
        if trimmed.is_empty() || trimmed.contains(':') {
            return Err(StoreError::InvalidNamespace(namespace.to_string()));
        }
        Ok(Self {
            namespace: trimmed.to_string(),
        })
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn record(&self, name: &str) -> String {
        format!("{}:{name}", self.namespace)
    }

    pub fn tasks(&self) -> String {
        self.record(TASKS_RECORD)
    }
}

impl Default for StorageKeys {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

/// Raw string storage consumed by `PersistenceAdapter`.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> StoreResult<()>;
}

/// SQLite-backed store over the `kv_entries` table.
pub struct SqliteKeyValueStore {
    conn: Connection,
}

impl SqliteKeyValueStore {
    /// Wraps an already-bootstrapped connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations were not applied.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        let actual_version =
            conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(StoreError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Opens the database file, applying migrations first.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        Self::try_new(open_db(path)?)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueStore for SqliteKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_entries WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// In-process store for tests and throwaway sessions.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyValueStore {
    entries: HashMap<String, String>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds one raw value, bypassing serialization.
    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{StorageKeys, StoreError};

    #[test]
    fn keys_are_namespaced() {
        let keys = StorageKeys::new(" wheel ").expect("namespace should be accepted");
        assert_eq!(keys.namespace(), "wheel");
        assert_eq!(keys.tasks(), "wheel:tasks");
        assert_eq!(StorageKeys::default().tasks(), "papilio:tasks");
    }

    #[test]
    fn rejects_blank_or_separator_namespace() {
        assert!(matches!(
            StorageKeys::new("   "),
            Err(StoreError::InvalidNamespace(_))
        ));
        assert!(matches!(
            StorageKeys::new("a:b"),
            Err(StoreError::InvalidNamespace(_))
        ));
    }
}
