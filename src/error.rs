//! Error and contradiction types.

use crate::types::Cell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failures when building a board or its configuration.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum SweeperError {
    #[error("Board dimensions must be non-zero, got {height}x{width}")]
    InvalidDimensions { height: usize, width: usize },
    #[error("Too many mines: {mines} requested but the board only has {cells} cells")]
    TooManyMines { mines: usize, cells: usize },
    #[error("Cell {0} is outside the board")]
    InvalidCell(Cell),
}

pub type Result<T> = std::result::Result<T, SweeperError>;

/// Evidence that the clues fed into the knowledge base cannot all be true.
///
/// These are recorded, never raised, while propagating: the engine keeps
/// going with floored counts. Callers wanting strict behaviour can turn the
/// first one into an error with `KnowledgeBase::check_consistency`.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Contradiction {
    #[error("Marking {cell} as a mine would drive a constraint count below zero")]
    NegativeCount { cell: Cell },
    #[error("Constraint touching {cell} needs {count} mines from only {available} cells")]
    Overcommitted {
        cell: Cell,
        count: usize,
        available: usize,
    },
    #[error(
        "Subset derivation needed {needed} mines from a constraint that holds only {available}"
    )]
    NegativeDerivation { needed: usize, available: usize },
    #[error("Probed cell {cell} had previously been deduced to be a mine")]
    ProbedKnownMine { cell: Cell },
    #[error("Cell {cell} was marked both safe and a mine")]
    ConflictingMark { cell: Cell },
}
