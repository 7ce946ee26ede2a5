//! Flutter-facing bindings for the Papilio Lux wheel core.

pub mod api;
