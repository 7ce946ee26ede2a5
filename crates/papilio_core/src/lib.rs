//! Core logic for the Papilio Lux life wheel.
//! This crate is the single source of truth for wheel, task and selection invariants.

pub mod db;
pub mod geometry;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use geometry::wheel::{
    arc_path, label_anchor, layout_wheel, polar_to_cartesian, progress_arc, segment_span,
    GeometryError, GeometryResult, Point, ProgressArc, SegmentGeometry, SegmentSpan, WheelConfig,
    WheelLayout,
};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::domain::{CatalogError, Domain, DomainCatalog, DOMAIN_COUNT};
pub use model::progress::TransformationStage;
pub use model::task::{Task, TaskId, TaskValidationError};
pub use repo::kv_store::{
    KeyValueStore, MemoryKeyValueStore, SqliteKeyValueStore, StorageKeys, StoreError,
    StoreResult, DEFAULT_NAMESPACE,
};
pub use repo::persistence::PersistenceAdapter;
pub use service::id_gen::{fallback_id, generate_id, IdGenerator, SystemIdGenerator};
pub use service::selection::{CloseReason, PanelState, SelectionController};
pub use service::task_store::{DomainStats, TaskStore};
pub use service::wheel_session::{
    CalendarError, DomainSummary, PanelSnapshot, WheelSession, WheelSnapshot,
};

/// Minimal health-check API for host integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
