//! Zone layout projection for building digital twins.
//!
//! A [`BuildingGraph`] of zones, floors and directed neighbor declarations is
//! packed into a near-square grid per floor, floors are stacked vertically, and
//! every resolvable neighbor reference becomes a connector [`Edge`]. The result
//! is plain data for whatever scene layer renders it.
//!
//! ```
//! use twin_layout::{BuildingGraph, ProjectionConfig, Zone, project};
//!
//! let graph = BuildingGraph::new()
//!     .with_zone(Zone::new("z1", 1).with_neighbors(["z2"]))
//!     .with_zone(Zone::new("z2", 1));
//! let placement = project(&graph, &ProjectionConfig::default())?;
//! assert_eq!(placement.edges.len(), 1);
//! # Ok::<(), twin_layout::LayoutError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod graph;
pub mod layout;
pub mod logging;
pub mod metrics;
pub mod registry;
pub mod structure;

pub use error::{ConfigError, GraphError, LayoutError, Result};
pub use geometry::{Box3D, Extent3D, Position3D};
pub use graph::{BuildingGraph, Zone, ZoneId};
pub use layout::{
    CONNECTOR_HEIGHT, ConfigOverrides, Edge, FloorGrid, FloorLayout, GridCell, LayoutProjector,
    PlacementResult, ProjectionConfig, project,
};
pub use logging::{
    FileSink, LogEvent, LogFields, LogLevel, LogSink, Logger, LoggingError, LoggingResult,
    MemorySink,
};
pub use metrics::{MetricSnapshot, ProjectionMetrics};
pub use registry::{PlacementCache, PlacementRegistry, fingerprint};
pub use structure::{BuildingShell, ShellConfig, ShellPart, ShellPartKind, WallSide};
