//! A single logical sentence about the board: exactly `count` of `cells`
//! are mines.

use crate::types::Cell;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Result of pushing an external fact into a constraint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Removed,
    /// The cell was removed but the count was already zero.
    Clamped,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Constraint {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Constraint {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        Self {
            cells: cells.into_iter().collect(),
            count,
        }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// An empty constraint carries no information and is never used for
    /// inference.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    pub fn is_consistent(&self) -> bool {
        self.count <= self.cells.len()
    }

    /// Every cell is a mine when the count equals the number of cells.
    pub fn known_mines(&self) -> BTreeSet<Cell> {
        if !self.cells.is_empty() && self.count == self.cells.len() {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    /// Every cell is safe when the count is zero.
    pub fn known_safe(&self) -> BTreeSet<Cell> {
        if self.count == 0 {
            self.cells.clone()
        } else {
            BTreeSet::new()
        }
    }

    pub fn mark_mine(&mut self, cell: Cell) -> MarkOutcome {
        if !self.cells.remove(&cell) {
            return MarkOutcome::NoChange;
        }
        match self.count.checked_sub(1) {
            Some(count) => {
                self.count = count;
                MarkOutcome::Removed
            }
            None => MarkOutcome::Clamped,
        }
    }

    pub fn mark_safe(&mut self, cell: Cell) -> MarkOutcome {
        if self.cells.remove(&cell) {
            MarkOutcome::Removed
        } else {
            MarkOutcome::NoChange
        }
    }

    pub fn is_subset_of(&self, other: &Constraint) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// The constraint on the cells of `self` not covered by `subset`.
    ///
    /// Only meaningful when `subset.is_subset_of(self)`. The count floors at
    /// zero; `is_negative_difference` tells callers when that happened.
    pub fn difference(&self, subset: &Constraint) -> Constraint {
        Constraint {
            cells: self.cells.difference(&subset.cells).copied().collect(),
            count: self.count.saturating_sub(subset.count),
        }
    }

    pub fn is_negative_difference(&self, subset: &Constraint) -> bool {
        subset.count > self.count
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, cell) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{cell}")?;
        }
        write!(f, "}} = {}", self.count)
    }
}
