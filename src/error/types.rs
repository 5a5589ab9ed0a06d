use thiserror::Error;

use crate::graph::ZoneId;

/// Unified result type for the twin layout crate.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// Errors surfaced by the layout projector and its collaborators.
#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("invalid graph: {0}")]
    InvalidGraph(#[from] GraphError),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Degenerate projection geometry.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("`{field}` must be finite, got {value}")]
    NonFinite { field: &'static str, value: f64 },
    #[error("building width {width} leaves no room inside a margin of {margin}")]
    DegenerateWidth { width: f64, margin: f64 },
    #[error("building depth {depth} leaves no room inside a margin of {margin}")]
    DegenerateDepth { depth: f64, margin: f64 },
}

/// Malformed building graph data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    #[error("zone `{zone}` has non-positive floor {floor}")]
    NonPositiveFloor { zone: ZoneId, floor: i64 },
    #[error("zone `{zone}` has non-integer floor {value}")]
    NonIntegerFloor { zone: ZoneId, value: String },
    #[error("zone `{zone}` has floor {value} outside the i64 range")]
    FloorOutOfRange { zone: ZoneId, value: String },
    #[error("zone `{0}` appears more than once")]
    DuplicateZone(ZoneId),
}
