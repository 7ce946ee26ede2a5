//! JSON blob persistence over a key-value backend.
//!
//! # Responsibility
//! - Decode stored blobs, falling back to defaults on any failure.
//! - Serialize and write whole values synchronously.
//!
//! # Invariants
//! - `load` never returns an error; corrupt or missing data yields `T::default()`.
//! - `save` overwrites the previous value; there are no partial writes.

use crate::repo::kv_store::{KeyValueStore, StoreResult};
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Typed JSON access to one `KeyValueStore`.
pub struct PersistenceAdapter<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> PersistenceAdapter<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Reads and decodes `key`, or returns the default value.
    ///
    /// Decode and backend failures are reported as `warn` diagnostics only.
    pub fn load<T>(&self, key: &str) -> T
    where
        T: DeserializeOwned + Default,
    {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                debug!("event=persist_load module=repo status=skip reason=missing key={key}");
                return T::default();
            }
            Err(err) => {
                warn!(
                    "event=persist_load module=repo status=error error_code=read_failed key={key} error={err}"
                );
                return T::default();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(value) => value,
            Err(err) => {
                warn!(
                    "event=persist_load module=repo status=error error_code=decode_failed key={key} line={} column={}",
                    err.line(),
                    err.column()
                );
                T::default()
            }
        }
    }

    /// Serializes `value` and overwrites `key`.
    pub fn save<T>(&mut self, key: &str, value: &T) -> StoreResult<()>
    where
        T: Serialize + ?Sized,
    {
        let raw = serde_json::to_string(value)?;
        self.store.set(key, &raw)?;
        debug!(
            "event=persist_save module=repo status=ok key={key} bytes={}",
            raw.len()
        );
        Ok(())
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }
}
