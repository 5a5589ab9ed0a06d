//! Building shell geometry: floor slabs, a roof slab and outer walls.
//!
//! The shell shares the projector's coordinate frame. Level `f` has its zone
//! base at `y = (f - 1) * floor_height`; walls are centered on that height and
//! the level's slab sits half a floor below it. Only occupied levels get a
//! slab and walls, so sparse floor numbers stay cheap.

use std::collections::BTreeSet;

use serde::Serialize;

use crate::error::{ConfigError, Result};
use crate::geometry::{Box3D, Extent3D, Position3D};
use crate::layout::{PlacementResult, ProjectionConfig};

pub const DEFAULT_WALL_THICKNESS: f64 = 0.2;
pub const DEFAULT_SLAB_THICKNESS: f64 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShellConfig {
    pub wall_thickness: f64,
    pub slab_thickness: f64,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            wall_thickness: DEFAULT_WALL_THICKNESS,
            slab_thickness: DEFAULT_SLAB_THICKNESS,
        }
    }
}

impl ShellConfig {
    fn validate(&self) -> std::result::Result<(), ConfigError> {
        for (field, value) in [
            ("wallThickness", self.wall_thickness),
            ("slabThickness", self.slab_thickness),
        ] {
            if !value.is_finite() {
                return Err(ConfigError::NonFinite { field, value });
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WallSide {
    Front,
    Back,
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShellPartKind {
    FloorSlab { floor: i64 },
    Roof,
    Wall { floor: i64, side: WallSide },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShellPart {
    pub kind: ShellPartKind,
    pub bounds: Box3D,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BuildingShell {
    pub parts: Vec<ShellPart>,
}

impl BuildingShell {
    /// Shell for the given occupied levels. Duplicates are merged and levels
    /// below 1 are ignored; an empty set yields an empty shell.
    pub fn build(config: &ProjectionConfig, shell: &ShellConfig, floors: &[i64]) -> Result<Self> {
        let levels: BTreeSet<i64> = floors.iter().copied().filter(|floor| *floor >= 1).collect();
        let Some(&top_floor) = levels.last() else {
            return Ok(Self::default());
        };
        config.validate()?;
        shell.validate()?;

        let width = config.building_width;
        let depth = config.building_depth;
        let height = config.floor_height;
        let mut parts = Vec::with_capacity(levels.len() * 5 + 1);

        for &floor in &levels {
            let y = level_y(floor, height);
            parts.push(ShellPart {
                kind: ShellPartKind::FloorSlab { floor },
                bounds: Box3D::new(
                    Position3D::new(0.0, y - height / 2.0, 0.0),
                    Extent3D::new(width, shell.slab_thickness, depth),
                ),
            });
            for (side, center, size) in [
                (
                    WallSide::Front,
                    Position3D::new(0.0, y, depth / 2.0),
                    Extent3D::new(width, height, shell.wall_thickness),
                ),
                (
                    WallSide::Back,
                    Position3D::new(0.0, y, -depth / 2.0),
                    Extent3D::new(width, height, shell.wall_thickness),
                ),
                (
                    WallSide::Left,
                    Position3D::new(-width / 2.0, y, 0.0),
                    Extent3D::new(shell.wall_thickness, height, depth),
                ),
                (
                    WallSide::Right,
                    Position3D::new(width / 2.0, y, 0.0),
                    Extent3D::new(shell.wall_thickness, height, depth),
                ),
            ] {
                parts.push(ShellPart {
                    kind: ShellPartKind::Wall { floor, side },
                    bounds: Box3D::new(center, size),
                });
            }
        }

        let top_y = level_y(top_floor, height);
        parts.push(ShellPart {
            kind: ShellPartKind::Roof,
            bounds: Box3D::new(
                Position3D::new(0.0, top_y + height / 2.0 + shell.slab_thickness / 2.0, 0.0),
                Extent3D::new(width, shell.slab_thickness, depth),
            ),
        });

        Ok(Self { parts })
    }

    /// Shell around every occupied floor of a projection.
    pub fn for_placement(
        config: &ProjectionConfig,
        shell: &ShellConfig,
        placement: &PlacementResult,
    ) -> Result<Self> {
        let floors: Vec<i64> = placement.floors.iter().map(|layout| layout.floor).collect();
        Self::build(config, shell, &floors)
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn slabs(&self) -> impl Iterator<Item = &ShellPart> {
        self.parts
            .iter()
            .filter(|part| matches!(part.kind, ShellPartKind::FloorSlab { .. }))
    }

    pub fn walls(&self) -> impl Iterator<Item = &ShellPart> {
        self.parts
            .iter()
            .filter(|part| matches!(part.kind, ShellPartKind::Wall { .. }))
    }

    pub fn roof(&self) -> Option<&ShellPart> {
        self.parts
            .iter()
            .find(|part| part.kind == ShellPartKind::Roof)
    }
}

fn level_y(floor: i64, floor_height: f64) -> f64 {
    (floor - 1) as f64 * floor_height
}
