//! Wheel geometry engine.
//!
//! # Responsibility
//! - Convert segment counts and completion percents into drawable paths.
//! - Stay independent of any rendering technology.

pub mod wheel;
