//! Floor grid packing - near-square row-major cells for the zones of one floor
//!
//! Every floor is packed independently:
//! - `cols = ceil(sqrt(n))`, `rows = ceil(n / cols)`, so `cols * rows >= n`
//! - zone `i` lands in `(i % cols, i / cols)`
//! - cell centers are symmetric around the footprint origin
//!
//! # Example
//! ```
//! use twin_layout::layout::grid::{FloorGrid, GridCell};
//!
//! let grid = FloorGrid::for_zone_count(5);
//! assert_eq!((grid.cols, grid.rows), (3, 2));
//! assert_eq!(grid.cell_of(4), GridCell::new(1, 1));
//! ```

use serde::Serialize;

/// Column/row address of a cell within a floor grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct GridCell {
    pub col: usize,
    pub row: usize,
}

impl GridCell {
    pub const fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }
}

/// Grid dimensions chosen for one floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FloorGrid {
    pub cols: usize,
    pub rows: usize,
}

impl FloorGrid {
    /// Smallest near-square grid holding `count` zones. Zero zones yields a 0x0 grid.
    pub fn for_zone_count(count: usize) -> Self {
        if count == 0 {
            return Self { cols: 0, rows: 0 };
        }
        let cols = ceil_sqrt(count);
        Self {
            cols,
            rows: count.div_ceil(cols),
        }
    }

    pub fn capacity(&self) -> usize {
        self.cols * self.rows
    }

    /// Row-major cell for the zone at `index` in floor order.
    pub fn cell_of(&self, index: usize) -> GridCell {
        GridCell::new(index % self.cols, index / self.cols)
    }

    /// Inverse of [`FloorGrid::cell_of`].
    pub fn index_of(&self, cell: GridCell) -> usize {
        cell.row * self.cols + cell.col
    }

    /// World-space `(x, z)` of a cell center.
    pub fn cell_center(&self, cell: GridCell, cell_width: f64, cell_depth: f64) -> (f64, f64) {
        (
            centered(cell.col, self.cols) * cell_width,
            centered(cell.row, self.rows) * cell_depth,
        )
    }

    /// Cell covering world-space `(x, z)`, if the point lies inside the grid.
    pub fn cell_at(&self, x: f64, z: f64, cell_width: f64, cell_depth: f64) -> Option<GridCell> {
        let col = axis_index(x, cell_width, self.cols)?;
        let row = axis_index(z, cell_depth, self.rows)?;
        Some(GridCell::new(col, row))
    }
}

fn centered(index: usize, count: usize) -> f64 {
    index as f64 - count as f64 / 2.0 + 0.5
}

fn axis_index(coord: f64, cell: f64, count: usize) -> Option<usize> {
    if count == 0 || !coord.is_finite() || cell.is_nan() || cell <= 0.0 {
        return None;
    }
    let offset = (coord / cell + count as f64 / 2.0).floor();
    if !(offset >= 0.0 && offset < count as f64) {
        return None;
    }
    Some(offset as usize)
}

fn ceil_sqrt(n: usize) -> usize {
    let mut root = (n as f64).sqrt() as usize;
    while root * root < n {
        root += 1;
    }
    while root > 1 && (root - 1) * (root - 1) >= n {
        root -= 1;
    }
    root
}
