//! Core data types: grid cells and 8-directional adjacency.
//!
//! Cells are addressed as `(row, col)` within `[0, height) × [0, width)`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// A board coordinate. Ordered row-major, so sorted collections of cells
/// iterate the grid top-left to bottom-right.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[inline(always)]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    #[inline(always)]
    pub fn in_bounds(self, height: usize, width: usize) -> bool {
        self.row < height && self.col < width
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

const DISPLACEMENTS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Applies `delta` to `cell`, returning a value only when it stays in bounds.
fn apply_delta(cell: Cell, delta: (isize, isize), height: usize, width: usize) -> Option<Cell> {
    let row = cell.row.checked_add_signed(delta.0)?;
    let col = cell.col.checked_add_signed(delta.1)?;
    let next = Cell::new(row, col);
    next.in_bounds(height, width).then_some(next)
}

/// All in-bounds cells surrounding `cell`, excluding `cell` itself.
///
/// Corners yield 3 cells, edges 5, interior cells 8.
pub fn neighbors(cell: Cell, height: usize, width: usize) -> BTreeSet<Cell> {
    DISPLACEMENTS
        .iter()
        .filter_map(|&delta| apply_delta(cell, delta, height, width))
        .collect()
}

/// Every cell of a `height × width` grid in row-major order.
pub fn all_cells(height: usize, width: usize) -> impl Iterator<Item = Cell> {
    (0..height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
}
