use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Number;

use crate::error::{GraphError, Result};

/// Zone identifier, unique within a building.
pub type ZoneId = String;

/// A spatial unit on one floor with directed adjacency declarations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Zone {
    pub id: ZoneId,
    pub floor: i64,
    pub neighbors: Vec<ZoneId>,
}

impl Zone {
    pub fn new(id: impl Into<ZoneId>, floor: i64) -> Self {
        Self {
            id: id.into(),
            floor,
            neighbors: Vec::new(),
        }
    }

    pub fn with_neighbors<I, S>(mut self, neighbors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<ZoneId>,
    {
        self.neighbors = neighbors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_neighbor(mut self, neighbor: impl Into<ZoneId>) -> Self {
        self.neighbors.push(neighbor.into());
        self
    }
}

/// Ordered collection of zones as supplied by the layout source.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildingGraph {
    pub zones: Vec<Zone>,
}

impl BuildingGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_zones(zones: Vec<Zone>) -> Self {
        Self { zones }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zones.push(zone);
        self
    }

    /// Parse the JSON boundary shape. Floors must be integral; `2.0` is
    /// accepted as floor 2, `1.5` is rejected as non-integer, and integers
    /// that do not fit an `i64` are rejected as out of range.
    pub fn from_json_str(input: &str) -> Result<Self> {
        let raw: RawGraph = serde_json::from_str(input)?;
        raw.into_graph()
    }

    pub fn from_json_value(value: serde_json::Value) -> Result<Self> {
        let raw: RawGraph = serde_json::from_value(value)?;
        raw.into_graph()
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn len(&self) -> usize {
        self.zones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    pub fn zone(&self, id: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.id == id)
    }

    /// Reject duplicate ids and non-positive floors.
    pub fn validate(&self) -> std::result::Result<(), GraphError> {
        let mut seen = HashSet::with_capacity(self.zones.len());
        for zone in &self.zones {
            if zone.floor < 1 {
                return Err(GraphError::NonPositiveFloor {
                    zone: zone.id.clone(),
                    floor: zone.floor,
                });
            }
            if !seen.insert(zone.id.as_str()) {
                return Err(GraphError::DuplicateZone(zone.id.clone()));
            }
        }
        Ok(())
    }

    /// Zones grouped by floor, ascending, each group in input order.
    pub fn zones_by_floor(&self) -> BTreeMap<i64, Vec<&Zone>> {
        let mut groups: BTreeMap<i64, Vec<&Zone>> = BTreeMap::new();
        for zone in &self.zones {
            groups.entry(zone.floor).or_default().push(zone);
        }
        groups
    }

    /// Distinct floor numbers in ascending order.
    pub fn floor_numbers(&self) -> Vec<i64> {
        self.zones_by_floor().into_keys().collect()
    }

    /// Total length of all neighbor lists.
    pub fn reference_count(&self) -> usize {
        self.zones.iter().map(|zone| zone.neighbors.len()).sum()
    }
}

#[derive(Debug, Deserialize)]
struct RawGraph {
    #[serde(default)]
    zones: Vec<RawZone>,
}

#[derive(Debug, Deserialize)]
struct RawZone {
    id: ZoneId,
    floor: Number,
    #[serde(default)]
    neighbors: Vec<ZoneId>,
}

impl RawGraph {
    fn into_graph(self) -> Result<BuildingGraph> {
        let zones = self
            .zones
            .into_iter()
            .map(RawZone::into_zone)
            .collect::<std::result::Result<Vec<_>, GraphError>>()?;
        Ok(BuildingGraph { zones })
    }
}

impl RawZone {
    fn into_zone(self) -> std::result::Result<Zone, GraphError> {
        let floor = match integral_floor(&self.floor) {
            Ok(floor) => floor,
            Err(FloorValue::NotInteger) => {
                return Err(GraphError::NonIntegerFloor {
                    zone: self.id,
                    value: self.floor.to_string(),
                });
            }
            Err(FloorValue::OutOfRange) => {
                return Err(GraphError::FloorOutOfRange {
                    zone: self.id,
                    value: self.floor.to_string(),
                });
            }
        };
        Ok(Zone {
            id: self.id,
            floor,
            neighbors: self.neighbors,
        })
    }
}

enum FloorValue {
    NotInteger,
    OutOfRange,
}

// 2^63: `i64::MIN` is exactly `-I64_BOUND`, `i64::MAX` rounds up to it.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

fn integral_floor(number: &Number) -> std::result::Result<i64, FloorValue> {
    if let Some(value) = number.as_i64() {
        return Ok(value);
    }
    if number.is_u64() {
        return Err(FloorValue::OutOfRange);
    }
    let value = number.as_f64().ok_or(FloorValue::NotInteger)?;
    if !value.is_finite() || value.fract() != 0.0 {
        return Err(FloorValue::NotInteger);
    }
    if value < -I64_BOUND || value >= I64_BOUND {
        return Err(FloorValue::OutOfRange);
    }
    Ok(value as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;

    #[test]
    fn parses_boundary_shape() {
        let graph = BuildingGraph::from_json_str(
            r#"{"zones":[{"id":"a","floor":1,"neighbors":["b"]},{"id":"b","floor":2}]}"#,
        )
        .unwrap();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.zones[0].neighbors, vec!["b".to_string()]);
        assert!(graph.zones[1].neighbors.is_empty());
    }

    #[test]
    fn integral_float_floor_is_accepted() {
        let graph =
            BuildingGraph::from_json_str(r#"{"zones":[{"id":"a","floor":2.0}]}"#).unwrap();
        assert_eq!(graph.zones[0].floor, 2);
    }

    #[test]
    fn fractional_floor_is_rejected() {
        let err =
            BuildingGraph::from_json_str(r#"{"zones":[{"id":"a","floor":1.5}]}"#).unwrap_err();
        match err {
            LayoutError::InvalidGraph(GraphError::NonIntegerFloor { zone, value }) => {
                assert_eq!(zone, "a");
                assert_eq!(value, "1.5");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn large_integral_float_floor_is_accepted() {
        let graph =
            BuildingGraph::from_json_str(r#"{"zones":[{"id":"a","floor":1e16}]}"#).unwrap();
        assert_eq!(graph.zones[0].floor, 10_000_000_000_000_000);
    }

    #[test]
    fn floors_beyond_i64_are_out_of_range() {
        for floor in ["18446744073709551615", "1e19"] {
            let json = format!(r#"{{"zones":[{{"id":"a","floor":{floor}}}]}}"#);
            let err = BuildingGraph::from_json_str(&json).unwrap_err();
            assert!(
                matches!(
                    err,
                    LayoutError::InvalidGraph(GraphError::FloorOutOfRange { .. })
                ),
                "floor {floor}: {err:?}"
            );
        }
    }

    #[test]
    fn validate_flags_duplicates() {
        let graph = BuildingGraph::new()
            .with_zone(Zone::new("a", 1))
            .with_zone(Zone::new("a", 2));
        assert_eq!(
            graph.validate(),
            Err(GraphError::DuplicateZone("a".to_string()))
        );
    }

    #[test]
    fn validate_flags_non_positive_floor() {
        let graph = BuildingGraph::new().with_zone(Zone::new("basement", 0));
        assert!(matches!(
            graph.validate(),
            Err(GraphError::NonPositiveFloor { floor: 0, .. })
        ));
    }

    #[test]
    fn zones_by_floor_keeps_input_order() {
        let graph = BuildingGraph::new()
            .with_zone(Zone::new("c", 2))
            .with_zone(Zone::new("a", 1))
            .with_zone(Zone::new("b", 2));
        let groups = graph.zones_by_floor();
        let floor_two: Vec<_> = groups[&2].iter().map(|zone| zone.id.as_str()).collect();
        assert_eq!(floor_two, vec!["c", "b"]);
        assert_eq!(graph.floor_numbers(), vec![1, 2]);
    }
}
