//! Building graph module orchestrator.
//!
//! The graph is the only boundary contract of the crate. Its JSON shape is
//! `{ "zones": [{ "id": string, "floor": integer, "neighbors": [string] }] }`.

mod core;

pub use self::core::{BuildingGraph, Zone, ZoneId};
