use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use serde::Serialize;
use serde_json::json;

use super::config::ProjectionConfig;
use super::grid::FloorGrid;
use crate::error::Result;
use crate::geometry::Position3D;
use crate::graph::{BuildingGraph, ZoneId};
use crate::logging::{LogLevel, Logger, event_with_fields, json_kv};
use crate::metrics::ProjectionMetrics;

/// Height above a zone's base at which connectors attach.
pub const CONNECTOR_HEIGHT: f64 = 0.25;

const PROJECTOR_TARGET: &str = "twin_layout::projector";

/// Directed connector between two placed zones.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Edge {
    pub from: ZoneId,
    pub to: ZoneId,
    pub start: Position3D,
    pub end: Position3D,
}

/// Grid chosen for one occupied floor.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FloorLayout {
    pub floor: i64,
    pub y: f64,
    pub grid: FloorGrid,
    pub cell_width: f64,
    pub cell_depth: f64,
    /// Zone ids in row-major cell order.
    pub zones: Vec<ZoneId>,
}

impl FloorLayout {
    /// Zone occupying the cell under `(x, z)`, if any.
    pub fn zone_at(&self, x: f64, z: f64) -> Option<&ZoneId> {
        let cell = self
            .grid
            .cell_at(x, z, self.cell_width, self.cell_depth)?;
        self.zones.get(self.grid.index_of(cell))
    }
}

/// Output of a projection: placements, connectors and per-floor grids.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlacementResult {
    pub positions: BTreeMap<ZoneId, Position3D>,
    pub edges: Vec<Edge>,
    pub floors: Vec<FloorLayout>,
    /// Neighbor references dropped because the target zone is unknown.
    pub skipped_references: usize,
}

impl PlacementResult {
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn position_of(&self, zone_id: &str) -> Option<Position3D> {
        self.positions.get(zone_id).copied()
    }

    pub fn floor(&self, floor: i64) -> Option<&FloorLayout> {
        self.floors.iter().find(|layout| layout.floor == floor)
    }

    /// Hit-test a point on a floor plane.
    pub fn zone_at(&self, floor: i64, x: f64, z: f64) -> Option<&ZoneId> {
        self.floor(floor)?.zone_at(x, z)
    }

    pub fn edges_from<'a>(&'a self, zone_id: &'a str) -> impl Iterator<Item = &'a Edge> + 'a {
        self.edges.iter().filter(move |edge| edge.from == zone_id)
    }
}

/// Turns a building graph into scene placements and connector geometry.
///
/// Projection is a pure function of `(graph, config)`; the optional logger and
/// metrics only observe it.
#[derive(Clone, Default)]
pub struct LayoutProjector {
    config: ProjectionConfig,
    logger: Option<Logger>,
    metrics: Option<Arc<Mutex<ProjectionMetrics>>>,
}

impl LayoutProjector {
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            config,
            logger: None,
            metrics: None,
        }
    }

    pub fn with_logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    pub fn with_metrics(mut self, metrics: Arc<Mutex<ProjectionMetrics>>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Enable metrics collection if it has not already been configured.
    pub fn enable_metrics(&mut self) -> Arc<Mutex<ProjectionMetrics>> {
        Arc::clone(
            self.metrics
                .get_or_insert_with(|| Arc::new(Mutex::new(ProjectionMetrics::new()))),
        )
    }

    pub fn metrics_handle(&self) -> Option<Arc<Mutex<ProjectionMetrics>>> {
        self.metrics.as_ref().map(Arc::clone)
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project `graph`. Either every zone is placed or an error is returned.
    pub fn project(&self, graph: &BuildingGraph) -> Result<PlacementResult> {
        match self.solve(graph) {
            Ok(result) => {
                self.observe_success(&result);
                Ok(result)
            }
            Err(err) => {
                self.observe_failure(&err.to_string());
                Err(err)
            }
        }
    }

    fn solve(&self, graph: &BuildingGraph) -> Result<PlacementResult> {
        if graph.is_empty() {
            return Ok(PlacementResult::default());
        }
        graph.validate()?;
        self.config.validate()?;

        let mut positions = BTreeMap::new();
        let mut floors = Vec::new();

        for (floor, zones) in graph.zones_by_floor() {
            let grid = FloorGrid::for_zone_count(zones.len());
            let cell_width = self.config.inner_width() / grid.cols as f64;
            let cell_depth = self.config.inner_depth() / grid.rows as f64;
            let y = (floor - 1) as f64 * self.config.floor_height;

            for (index, zone) in zones.iter().enumerate() {
                let (x, z) = grid.cell_center(grid.cell_of(index), cell_width, cell_depth);
                positions.insert(zone.id.clone(), Position3D::new(x, y, z));
            }

            floors.push(FloorLayout {
                floor,
                y,
                grid,
                cell_width,
                cell_depth,
                zones: zones.iter().map(|zone| zone.id.clone()).collect(),
            });
        }

        let mut edges = Vec::with_capacity(graph.reference_count());
        let mut skipped_references = 0;
        for zone in &graph.zones {
            let Some(start) = positions.get(&zone.id).copied() else {
                skipped_references += zone.neighbors.len();
                continue;
            };
            for neighbor in &zone.neighbors {
                match positions.get(neighbor) {
                    Some(end) => edges.push(Edge {
                        from: zone.id.clone(),
                        to: neighbor.clone(),
                        start: start.lifted(CONNECTOR_HEIGHT),
                        end: end.lifted(CONNECTOR_HEIGHT),
                    }),
                    None => skipped_references += 1,
                }
            }
        }

        Ok(PlacementResult {
            positions,
            edges,
            floors,
            skipped_references,
        })
    }

    fn observe_success(&self, result: &PlacementResult) {
        if let Some(metrics) = &self.metrics {
            if let Ok(mut metrics) = metrics.lock() {
                metrics.record_projection(
                    result.positions.len(),
                    result.edges.len(),
                    result.skipped_references,
                );
            }
        }

        let Some(logger) = &self.logger else {
            return;
        };
        let _ = logger.log_event(event_with_fields(
            LogLevel::Debug,
            PROJECTOR_TARGET,
            "projection_completed",
            [
                json_kv("zones", json!(result.positions.len())),
                json_kv("floors", json!(result.floors.len())),
                json_kv("edges", json!(result.edges.len())),
                json_kv("skipped_references", json!(result.skipped_references)),
            ],
        ));
        if result.skipped_references > 0 {
            let _ = logger.log_event(event_with_fields(
                LogLevel::Warn,
                PROJECTOR_TARGET,
                "neighbor_references_skipped",
                [json_kv("count", json!(result.skipped_references))],
            ));
        }
    }

    fn observe_failure(&self, reason: &str) {
        if let Some(metrics) = &self.metrics {
            if let Ok(mut metrics) = metrics.lock() {
                metrics.record_failure();
            }
        }
        if let Some(logger) = &self.logger {
            let _ = logger.log_event(event_with_fields(
                LogLevel::Error,
                PROJECTOR_TARGET,
                "projection_failed",
                [json_kv("reason", json!(reason))],
            ));
        }
    }
}

/// Project `graph` with `config` and no observers attached.
pub fn project(graph: &BuildingGraph, config: &ProjectionConfig) -> Result<PlacementResult> {
    LayoutProjector::new(*config).project(graph)
}
