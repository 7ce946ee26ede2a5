//! Persistence layer for locally stored wheel state.
//!
//! # Responsibility
//! - Define the raw key-value storage contract and its backends.
//! - Provide the JSON `PersistenceAdapter` port used by services.
//!
//! # Invariants
//! - Services never talk to SQLite directly.
//! - Reads degrade to defaults; only writes report errors.

pub mod kv_store;
pub mod persistence;
