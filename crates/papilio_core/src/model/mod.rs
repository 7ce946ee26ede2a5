//! Domain model for the life wheel.
//!
//! # Responsibility
//! - Define the static domain catalog and the task record.
//! - Define milestone projections derived from task state.
//!
//! # Invariants
//! - The catalog is immutable for the process lifetime.
//! - Every task belongs to exactly one catalog domain.

pub mod domain;
pub mod progress;
pub mod task;
