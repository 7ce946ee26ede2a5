//! Interaction facade over the task store and panel selection.
//!
//! # Responsibility
//! - Route UI interactions (select, close, submit, toggle, delete).
//! - Produce read-only snapshots for the rendering layer.
//!
//! # Invariants
//! - Submissions are accepted only while a panel is open, into that domain.
//! - Closing a panel never touches committed tasks.
//! - Snapshots are derived on demand and never cached.

use crate::geometry::wheel::{layout_wheel, GeometryResult, WheelConfig, WheelLayout};
use crate::model::domain::{Domain, DomainCatalog, DOMAIN_COUNT};
use crate::model::progress::TransformationStage;
use crate::model::task::{Task, TaskId};
use crate::repo::kv_store::KeyValueStore;
use crate::service::selection::{CloseReason, PanelState, SelectionController};
use crate::service::task_store::{DomainStats, TaskStore};
use log::{error, info};
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Calendar hand-off errors. Calendar integration is not available yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    TaskNotFound(TaskId),
    Unavailable,
}

impl Display for CalendarError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Unavailable => write!(f, "calendar integration is not available"),
        }
    }
}

impl Error for CalendarError {}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DomainSummary {
    pub domain: Domain,
    pub stats: DomainStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PanelSnapshot {
    pub domain: Domain,
    pub tasks: Vec<Task>,
    pub stats: DomainStats,
    pub compose_text: String,
}

/// Everything the renderer reads in one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WheelSnapshot {
    pub points: usize,
    pub stage: TransformationStage,
    pub points_to_next_stage: Option<usize>,
    pub domains: Vec<DomainSummary>,
    pub panel: Option<PanelSnapshot>,
    pub layout: WheelLayout,
}

pub struct WheelSession<S: KeyValueStore> {
    store: TaskStore<S>,
    selection: SelectionController,
    wheel: WheelConfig,
}

impl<S: KeyValueStore> WheelSession<S> {
    /// Builds a session with a closed panel.
    ///
    /// # Errors
    /// - Returns a geometry error when `wheel` cannot draw `DOMAIN_COUNT` segments.
    pub fn new(store: TaskStore<S>, wheel: WheelConfig) -> GeometryResult<Self> {
        wheel.validate(DOMAIN_COUNT)?;
        info!(
            "event=session_start module=service status=ok tasks={} points={}",
            store.len(),
            store.completion_count()
        );
        Ok(Self {
            store,
            selection: SelectionController::new(),
            wheel,
        })
    }

    pub fn select_domain(&mut self, slug: &str) -> bool {
        self.selection.select(slug).is_some()
    }

    pub fn close_panel(&mut self, reason: CloseReason) -> bool {
        self.selection.close(reason)
    }

    pub fn set_compose_text(&mut self, text: impl Into<String>) {
        self.selection.set_compose_text(text);
    }

    /// Adds `text` to the open domain and clears the compose input.
    ///
    /// Returns `None` while closed or for blank text.
    pub fn submit_task(&mut self, text: &str) -> Option<TaskId> {
        let slug = self.selection.active_domain()?;
        let id = self.store.add(slug, text)?;
        self.selection.clear_compose_text();
        Some(id)
    }

    /// Submits the current compose text.
    pub fn submit_compose(&mut self) -> Option<TaskId> {
        let text = self.selection.compose_text().to_string();
        self.submit_task(&text)
    }

    pub fn toggle_task(&mut self, id: &str) -> Option<bool> {
        self.store.toggle(id)
    }

    pub fn delete_task(&mut self, id: &str) -> Option<Task> {
        self.store.remove(id)
    }

    /// Calendar hand-off placeholder; always fails for existing tasks.
    pub fn schedule_on_calendar(&self, id: &str) -> Result<(), CalendarError> {
        if self.store.get(id).is_none() {
            return Err(CalendarError::TaskNotFound(id.to_string()));
        }
        Err(CalendarError::Unavailable)
    }

    pub fn points(&self) -> usize {
        self.store.completion_count()
    }

    pub fn stage(&self) -> TransformationStage {
        TransformationStage::from_points(self.points())
    }

    pub fn panel_state(&self) -> PanelState {
        self.selection.state()
    }

    pub fn store(&self) -> &TaskStore<S> {
        &self.store
    }

    pub fn selection(&self) -> &SelectionController {
        &self.selection
    }

    pub fn selection_mut(&mut self) -> &mut SelectionController {
        &mut self.selection
    }

    pub fn snapshot(&self) -> WheelSnapshot {
        let stats = self.store.all_stats();
        let percents: Vec<u8> = stats.iter().map(|stats| stats.percent).collect();
        let layout = layout_wheel(&self.wheel, &percents).unwrap_or_else(|err| {
            error!("event=wheel_layout module=service status=error error={err}");
            WheelLayout {
                config: self.wheel,
                segments: Vec::new(),
            }
        });

        let domains = DomainCatalog::all()
            .iter()
            .zip(stats)
            .map(|(domain, stats)| DomainSummary {
                domain: *domain,
                stats,
            })
            .collect();

        let panel = self.selection.active_domain().and_then(|slug| {
            let domain = DomainCatalog::by_slug(slug).ok()?;
            Some(PanelSnapshot {
                domain: *domain,
                tasks: self.store.tasks_for(slug).into_iter().cloned().collect(),
                stats: self.store.stats_for(slug),
                compose_text: self.selection.compose_text().to_string(),
            })
        });

        let points = self.points();
        WheelSnapshot {
            points,
            stage: TransformationStage::from_points(points),
            points_to_next_stage: TransformationStage::points_to_next(points),
            domains,
            panel,
            layout,
        }
    }
}
