//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose the wheel interaction surface to Dart via FRB.
//! - Own the single process-wide `WheelSession`.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Invalid input (blank text, unknown slug or id) yields `ok=false`, never an error.
//! - The session is opened lazily on first use and reused afterwards.

use log::{error, info};
use papilio_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    CloseReason, DomainCatalog, SqliteKeyValueStore, StorageKeys, Task, TaskStore, WheelConfig,
    WheelSession, WheelSnapshot, DEFAULT_NAMESPACE,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const WHEEL_DB_FILE_NAME: &str = "papilio_wheel.sqlite3";
const DB_PATH_ENV: &str = "PAPILIO_DB_PATH";
const NAMESPACE_ENV: &str = "PAPILIO_STORAGE_NAMESPACE";

static WHEEL_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static WHEEL_NAMESPACE: OnceLock<String> = OnceLock::new();
static SESSION: Mutex<Option<WheelSession<SqliteKeyValueStore>>> = Mutex::new(None);

/// Minimal health-check API for FRB smoke integration.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Safe to call repeatedly with the same `level + log_dir`.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One wheel domain as shown by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomainItem {
    pub slug: String,
    pub label: String,
    pub order: u8,
    pub hue: u16,
}

/// One checklist row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskItem {
    pub id: String,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub domain_slug: String,
}

/// Drawable data for one wheel segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentItem {
    pub slug: String,
    pub hue: u16,
    pub wedge_path: String,
    pub progress_path: String,
    pub percent: u8,
    pub total: u32,
    pub completed: u32,
    pub label_x: f64,
    pub label_y: f64,
}

/// Read-only view of the whole wheel for one render pass.
#[derive(Debug, Clone, PartialEq)]
pub struct WheelSnapshotResponse {
    pub ok: bool,
    pub message: String,
    pub points: u32,
    /// `caterpillar|chrysalis|butterfly`.
    pub stage: String,
    pub points_to_next_stage: Option<u32>,
    pub segments: Vec<SegmentItem>,
    /// Open panel domain, `None` when closed.
    pub panel_domain: Option<String>,
    pub panel_tasks: Vec<TaskItem>,
    pub compose_text: String,
}

/// Generic action response envelope for wheel interactions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WheelActionResponse {
    /// Whether the interaction changed state.
    pub ok: bool,
    /// Affected task ID, when any.
    pub task_id: Option<String>,
    /// New completion state after a toggle.
    pub completed: Option<bool>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl WheelActionResponse {
    fn success(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            completed: None,
            message: message.into(),
        }
    }

    fn ignored(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            completed: None,
            message: message.into(),
        }
    }
}

/// Lists the wheel domains in segment order.
#[flutter_rust_bridge::frb(sync)]
pub fn list_domains() -> Vec<DomainItem> {
    DomainCatalog::all()
        .iter()
        .map(|domain| DomainItem {
            slug: domain.slug.to_string(),
            label: domain.label.to_string(),
            order: domain.order,
            hue: domain.hue,
        })
        .collect()
}

/// Opens the panel of `slug`, replacing any open panel.
#[flutter_rust_bridge::frb(sync)]
pub fn select_domain(slug: String) -> WheelActionResponse {
    respond("select_domain", |session| {
        if session.select_domain(slug.trim()) {
            WheelActionResponse::success("Panel opened.", None)
        } else {
            WheelActionResponse::ignored("Unknown domain.")
        }
    })
}

/// Closes the open panel.
///
/// `reason` is `explicit|escape|outside_click`; anything else counts as explicit.
#[flutter_rust_bridge::frb(sync)]
pub fn close_panel(reason: String) -> WheelActionResponse {
    let reason = parse_close_reason(&reason);
    respond("close_panel", |session| {
        if session.close_panel(reason) {
            WheelActionResponse::success("Panel closed.", None)
        } else {
            WheelActionResponse::ignored("No panel open.")
        }
    })
}

/// Mirrors the host's compose input so snapshots can restore it.
#[flutter_rust_bridge::frb(sync)]
pub fn set_compose_text(text: String) -> WheelActionResponse {
    respond("set_compose_text", |session| {
        session.set_compose_text(text);
        WheelActionResponse::success("Compose text updated.", None)
    })
}

/// Adds a task to the open domain.
#[flutter_rust_bridge::frb(sync)]
pub fn submit_task(text: String) -> WheelActionResponse {
    respond("submit_task", |session| match session.submit_task(&text) {
        Some(id) => WheelActionResponse::success("Task added.", Some(id)),
        None => WheelActionResponse::ignored("Nothing to add."),
    })
}

/// Flips completion of one task.
#[flutter_rust_bridge::frb(sync)]
pub fn toggle_task(task_id: String) -> WheelActionResponse {
    respond("toggle_task", |session| match session.toggle_task(&task_id) {
        Some(completed) => WheelActionResponse {
            completed: Some(completed),
            ..WheelActionResponse::success("Task toggled.", Some(task_id.clone()))
        },
        None => WheelActionResponse::ignored("Task not found."),
    })
}

/// Deletes one task.
#[flutter_rust_bridge::frb(sync)]
pub fn delete_task(task_id: String) -> WheelActionResponse {
    respond("delete_task", |session| match session.delete_task(&task_id) {
        Some(task) => WheelActionResponse::success("Task deleted.", Some(task.id)),
        None => WheelActionResponse::ignored("Task not found."),
    })
}

/// Returns everything needed to render the wheel and the open panel.
#[flutter_rust_bridge::frb(sync)]
pub fn wheel_snapshot() -> WheelSnapshotResponse {
    match with_session(|session| session.snapshot()) {
        Ok(snapshot) => to_snapshot_response(snapshot),
        Err(message) => WheelSnapshotResponse {
            ok: false,
            message,
            points: 0,
            stage: String::new(),
            points_to_next_stage: None,
            segments: Vec::new(),
            panel_domain: None,
            panel_tasks: Vec::new(),
            compose_text: String::new(),
        },
    }
}

fn respond(
    op: &'static str,
    f: impl FnOnce(&mut WheelSession<SqliteKeyValueStore>) -> WheelActionResponse,
) -> WheelActionResponse {
    with_session(f).unwrap_or_else(|err| WheelActionResponse::ignored(format!("{op} failed: {err}")))
}

fn with_session<T>(
    f: impl FnOnce(&mut WheelSession<SqliteKeyValueStore>) -> T,
) -> Result<T, String> {
    let mut guard = SESSION
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if guard.is_none() {
        match open_session() {
            Ok(session) => {
                info!("event=session_open module=ffi status=ok");
                *guard = Some(session);
            }
            Err(err) => {
                error!("event=session_open module=ffi status=error error={err}");
                return Err(err);
            }
        }
    }
    match guard.as_mut() {
        Some(session) => Ok(f(session)),
        None => Err("wheel session unavailable".to_string()),
    }
}

fn open_session() -> Result<WheelSession<SqliteKeyValueStore>, String> {
    let keys = StorageKeys::new(resolve_namespace())
        .map_err(|err| format!("storage namespace rejected: {err}"))?;
    let store = SqliteKeyValueStore::open(resolve_db_path())
        .map_err(|err| format!("wheel DB open failed: {err}"))?;
    WheelSession::new(TaskStore::open(store, &keys), WheelConfig::default())
        .map_err(|err| format!("wheel layout rejected: {err}"))
}

fn resolve_db_path() -> PathBuf {
    WHEEL_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var(DB_PATH_ENV) {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(WHEEL_DB_FILE_NAME)
        })
        .clone()
}

fn resolve_namespace() -> &'static str {
    WHEEL_NAMESPACE.get_or_init(|| {
        std::env::var(NAMESPACE_ENV)
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| DEFAULT_NAMESPACE.to_string())
    })
}

fn parse_close_reason(value: &str) -> CloseReason {
    match value.trim() {
        "escape" => CloseReason::Escape,
        "outside_click" => CloseReason::OutsideClick,
        _ => CloseReason::Explicit,
    }
}

fn to_task_item(task: Task) -> TaskItem {
    TaskItem {
        id: task.id,
        text: task.text,
        completed: task.completed,
        created_at: task.created_at,
        domain_slug: task.domain_slug,
    }
}

fn to_snapshot_response(snapshot: WheelSnapshot) -> WheelSnapshotResponse {
    let segments = snapshot
        .domains
        .iter()
        .zip(snapshot.layout.segments)
        .map(|(summary, segment)| SegmentItem {
            slug: summary.domain.slug.to_string(),
            hue: summary.domain.hue,
            wedge_path: segment.wedge_path,
            progress_path: segment.progress.path,
            percent: segment.percent,
            total: summary.stats.total as u32,
            completed: summary.stats.completed as u32,
            label_x: segment.label_anchor.x,
            label_y: segment.label_anchor.y,
        })
        .collect();

    let (panel_domain, panel_tasks, compose_text) = match snapshot.panel {
        Some(panel) => (
            Some(panel.domain.slug.to_string()),
            panel.tasks.into_iter().map(to_task_item).collect(),
            panel.compose_text,
        ),
        None => (None, Vec::new(), String::new()),
    };

    WheelSnapshotResponse {
        ok: true,
        message: String::new(),
        points: snapshot.points as u32,
        stage: snapshot.stage.as_str().to_string(),
        points_to_next_stage: snapshot.points_to_next_stage.map(|value| value as u32),
        segments,
        panel_domain,
        panel_tasks,
        compose_text,
    }
}
