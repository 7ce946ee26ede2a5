//! Per-domain checklist store.
//!
//! # Responsibility
//! - Own the task collection and answer per-domain queries.
//! - Persist the full collection after every mutation.
//! - Derive the completion counter ("points") from task state.
//!
//! # Invariants
//! - Newest tasks come first; relative order is otherwise stable.
//! - Task ids are unique within the collection.
//! - `completion_count()` always equals the number of completed tasks.
//! - Invalid input and unknown ids are no-ops, never errors.

use crate::model::domain::{DomainCatalog, DOMAIN_COUNT};
use crate::model::task::{Task, TaskId};
use crate::repo::kv_store::{KeyValueStore, StorageKeys};
use crate::repo::persistence::PersistenceAdapter;
use crate::service::id_gen::{now_epoch_ms, IdGenerator, SystemIdGenerator};
use log::{debug, error, info, warn};
use serde::Serialize;
use std::collections::HashSet;

const MAX_ID_ATTEMPTS: usize = 8;

/// Completion summary for one domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DomainStats {
    pub total: usize,
    pub completed: usize,
    /// Rounded completion percentage, `0` for an empty domain.
    pub percent: u8,
}

impl DomainStats {
    pub fn new(total: usize, completed: usize) -> Self {
        Self {
            total,
            completed,
            percent: rounded_percent(completed, total),
        }
    }
}

/// Rounds `completed / total * 100` half-up, defined as `0` when `total == 0`.
pub fn rounded_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    ((completed * 200 + total) / (2 * total)) as u8
}

/// Task collection bound to one persisted record.
pub struct TaskStore<S: KeyValueStore> {
    persistence: PersistenceAdapter<S>,
    tasks_key: String,
    tasks: Vec<Task>,
    ids: Box<dyn IdGenerator + Send>,
}

impl<S: KeyValueStore> TaskStore<S> {
    /// Creates an empty store; call `load` to hydrate it.
    pub fn new(store: S, keys: &StorageKeys) -> Self {
        Self {
            persistence: PersistenceAdapter::new(store),
            tasks_key: keys.tasks(),
            tasks: Vec::new(),
            ids: Box::new(SystemIdGenerator),
        }
    }

    /// Creates a store and hydrates it from persisted state.
    pub fn open(store: S, keys: &StorageKeys) -> Self {
        let mut task_store = Self::new(store, keys);
        task_store.load();
        task_store
    }

    /// Replaces the id source, mainly for deterministic tests.
    pub fn with_id_generator(mut self, ids: impl IdGenerator + Send + 'static) -> Self {
        self.ids = Box::new(ids);
        self
    }

    /// Hydrates the collection, dropping malformed or duplicate entries.
    ///
    /// An unparsable blob yields an empty collection.
    pub fn load(&mut self) {
        let raw: Vec<serde_json::Value> = self.persistence.load(&self.tasks_key);
        let stored = raw.len();
        let mut seen = HashSet::new();
        let mut tasks = Vec::with_capacity(stored);

        for value in raw {
            let Ok(mut task) = serde_json::from_value::<Task>(value) else {
                continue;
            };
            task.normalize_text();
            if task.validate().is_err() || !seen.insert(task.id.clone()) {
                continue;
            }
            tasks.push(task);
        }

        let dropped = stored - tasks.len();
        if dropped > 0 {
            warn!(
                "event=tasks_load module=service status=partial loaded={} dropped={}",
                tasks.len(),
                dropped
            );
        } else {
            info!(
                "event=tasks_load module=service status=ok loaded={}",
                tasks.len()
            );
        }
        self.tasks = tasks;
    }

    /// Adds an open task at the head of the collection.
    ///
    /// Returns `None` (and changes nothing) for blank text or an unknown domain.
    pub fn add(&mut self, domain_slug: &str, text: &str) -> Option<TaskId> {
        if text.trim().is_empty() || !DomainCatalog::contains(domain_slug) {
            debug!("event=task_add module=service status=skip domain={domain_slug}");
            return None;
        }

        let id = self.fresh_id()?;
        let task = Task::from_input(id, domain_slug, text, now_epoch_ms())?;
        let id = task.id.clone();
        self.tasks.insert(0, task);
        self.persist("task_add");
        Some(id)
    }

    /// Flips completion of `id` and returns the new state.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=service status=skip reason=not_found");
            return None;
        };
        let completed = task.toggle();
        self.persist("task_toggle");
        Some(completed)
    }

    /// Deletes `id` and returns the removed task.
    pub fn remove(&mut self, id: &str) -> Option<Task> {
        let Some(index) = self.tasks.iter().position(|task| task.id == id) else {
            debug!("event=task_remove module=service status=skip reason=not_found");
            return None;
        };
        let removed = self.tasks.remove(index);
        self.persist("task_remove");
        Some(removed)
    }

    /// Tasks of one domain in stored order.
    pub fn tasks_for(&self, domain_slug: &str) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|task| task.domain_slug == domain_slug)
            .collect()
    }

    pub fn stats_for(&self, domain_slug: &str) -> DomainStats {
        let (total, completed) = self
            .tasks
            .iter()
            .filter(|task| task.domain_slug == domain_slug)
            .fold((0, 0), |(total, completed), task| {
                (total + 1, completed + usize::from(task.completed))
            });
        DomainStats::new(total, completed)
    }

    /// Stats for every domain, in wheel order.
    pub fn all_stats(&self) -> Vec<DomainStats> {
        let mut counts = [(0_usize, 0_usize); DOMAIN_COUNT];
        for task in &self.tasks {
            if let Some(index) = DomainCatalog::position(&task.domain_slug) {
                counts[index].0 += 1;
                counts[index].1 += usize::from(task.completed);
            }
        }
        counts
            .iter()
            .map(|&(total, completed)| DomainStats::new(total, completed))
            .collect()
    }

    /// Derived points: number of completed tasks across all domains.
    pub fn completion_count(&self) -> usize {
        self.tasks.iter().filter(|task| task.completed).count()
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|task| task.id == id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn persistence(&self) -> &PersistenceAdapter<S> {
        &self.persistence
    }

    fn fresh_id(&mut self) -> Option<TaskId> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.generate();
            if !id.trim().is_empty() && self.get(&id).is_none() {
                return Some(id);
            }
        }
        error!("event=task_add module=service status=error error_code=id_exhausted");
        None
    }

    fn persist(&mut self, event: &'static str) {
        match self.persistence.save(&self.tasks_key, &self.tasks) {
            Ok(()) => info!(
                "event={event} module=service status=ok tasks={} points={}",
                self.tasks.len(),
                self.completion_count()
            ),
            // In-memory state stays authoritative; the next mutation rewrites everything.
            Err(err) => error!(
                "event={event} module=service status=error error_code=persist_failed error={err}"
            ),
        }
    }
}
