use serde::{Deserialize, Serialize};

/// Point in the building-local coordinate frame. `y` is up.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Position3D {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position3D {
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Copy of this point raised by `dy`.
    pub fn lifted(self, dy: f64) -> Self {
        Self {
            y: self.y + dy,
            ..self
        }
    }

    pub fn to_array(self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Axis-aligned size of a box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Extent3D {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Extent3D {
    pub const fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }
}

/// Axis-aligned box anchored at its center.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Box3D {
    pub center: Position3D,
    pub size: Extent3D,
}

impl Box3D {
    pub const fn new(center: Position3D, size: Extent3D) -> Self {
        Self { center, size }
    }

    pub fn min(&self) -> Position3D {
        Position3D::new(
            self.center.x - self.size.width / 2.0,
            self.center.y - self.size.height / 2.0,
            self.center.z - self.size.depth / 2.0,
        )
    }

    pub fn max(&self) -> Position3D {
        Position3D::new(
            self.center.x + self.size.width / 2.0,
            self.center.y + self.size.height / 2.0,
            self.center.z + self.size.depth / 2.0,
        )
    }

    pub fn contains(&self, point: Position3D) -> bool {
        let (lo, hi) = (self.min(), self.max());
        (lo.x..=hi.x).contains(&point.x)
            && (lo.y..=hi.y).contains(&point.y)
            && (lo.z..=hi.z).contains(&point.z)
    }
}
