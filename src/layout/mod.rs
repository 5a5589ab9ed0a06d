//! Layout module orchestrator.
//!
//! Downstream code imports projector types from here while the projection
//! itself lives in the private `core` module.

pub mod config;
mod core;
pub mod grid;

pub use self::config::{ConfigOverrides, ProjectionConfig};
pub use self::core::{
    CONNECTOR_HEIGHT, Edge, FloorLayout, LayoutProjector, PlacementResult, project,
};
pub use self::grid::{FloorGrid, GridCell};
