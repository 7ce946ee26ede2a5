//! Task domain model.
//!
//! # Responsibility
//! - Define the checklist item owned by exactly one wheel domain.
//! - Validate records before they enter the task collection.
//!
//! # Invariants
//! - `id` is non-empty and never reused for another task.
//! - `text` is trimmed and non-empty.
//! - `domain_slug` references a domain of `DomainCatalog`.

use crate::model::domain::DomainCatalog;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Stable task identifier.
///
/// Kept as a string because persisted ids may come from either id strategy.
pub type TaskId = String;

/// One checklist item.
///
/// Serialized with the camelCase wire names used by the `tasks` record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    /// Unix epoch milliseconds.
    pub created_at: i64,
    pub domain_slug: String,
}

/// Validation failures for task records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    EmptyId,
    EmptyText,
    UntrimmedText,
    UnknownDomain(String),
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "task id must not be empty"),
            Self::EmptyText => write!(f, "task text must not be empty"),
            Self::UntrimmedText => write!(f, "task text must be trimmed"),
            Self::UnknownDomain(slug) => write!(f, "task references unknown domain `{slug}`"),
        }
    }
}

impl Error for TaskValidationError {}

impl Task {
    /// Builds an open task from raw user input.
    ///
    /// Returns `None` when `text` is blank or `domain_slug` is unknown.
    pub fn from_input(
        id: TaskId,
        domain_slug: &str,
        text: &str,
        created_at: i64,
    ) -> Option<Self> {
        let task = Self {
            id,
            text: text.trim().to_string(),
            completed: false,
            created_at,
            domain_slug: domain_slug.to_string(),
        };
        task.validate().ok().map(|()| task)
    }

    /// Checks record-level invariants.
    pub fn validate(&self) -> Result<(), TaskValidationError> {
        if self.id.trim().is_empty() {
            return Err(TaskValidationError::EmptyId);
        }
        if self.text.trim().is_empty() {
            return Err(TaskValidationError::EmptyText);
        }
        if self.text.trim() != self.text {
            return Err(TaskValidationError::UntrimmedText);
        }
        if !DomainCatalog::contains(&self.domain_slug) {
            return Err(TaskValidationError::UnknownDomain(self.domain_slug.clone()));
        }
        Ok(())
    }

    /// Trims surrounding whitespace from `text` in place.
    pub fn normalize_text(&mut self) {
        let trimmed = self.text.trim();
        if trimmed.len() != self.text.len() {
            self.text = trimmed.to_string();
        }
    }

    /// Flips completion and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.completed = !self.completed;
        self.completed
    }
}
