//! Core use-case services.
//!
//! # Responsibility
//! - Own mutable wheel state (tasks, selection) behind explicit containers.
//! - Keep UI/FFI layers decoupled from storage details.

pub mod id_gen;
pub mod selection;
pub mod task_store;
pub mod wheel_session;
