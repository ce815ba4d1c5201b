//! Move selection on top of the knowledge base.
//!
//! Callers try [`KnowledgeBase::safe_move`] first and fall back to
//! [`KnowledgeBase::random_move`] only when no cell is proven safe;
//! [`KnowledgeBase::next_move`] packages that protocol.

use crate::knowledge::KnowledgeBase;
use crate::rng::RandomSource;
use crate::types::{all_cells, Cell};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveKind {
    /// The cell is proven safe.
    Safe,
    /// No proof was available; the cell was drawn at random.
    Guess,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub cell: Cell,
    pub kind: MoveKind,
}

impl KnowledgeBase {
    /// A proven-safe cell that has not been probed yet.
    ///
    /// Which one is returned when several qualify is unspecified.
    pub fn safe_move(&self) -> Option<Cell> {
        self.known_safe()
            .iter()
            .filter(|cell| !self.is_probed(**cell))
            .min()
            .copied()
    }

    /// A uniformly random cell that is neither probed nor a known mine.
    ///
    /// Candidates are enumerated row-major, so a seeded source reproduces the
    /// same choice.
    pub fn random_move<R: RandomSource>(
        &self,
        height: usize,
        width: usize,
        rng: &mut R,
    ) -> Option<Cell> {
        let candidates: Vec<Cell> = all_cells(height, width)
            .filter(|&cell| !self.is_probed(cell) && !self.is_known_mine(cell))
            .collect();
        if candidates.is_empty() {
            return None;
        }
        Some(candidates[rng.gen_range(candidates.len())])
    }

    pub fn next_move<R: RandomSource>(&self, rng: &mut R) -> Option<Move> {
        if let Some(cell) = self.safe_move() {
            return Some(Move {
                cell,
                kind: MoveKind::Safe,
            });
        }
        let cell = self.random_move(self.height(), self.width(), rng)?;
        log::debug!("No safe move, guessing {cell}");
        Some(Move {
            cell,
            kind: MoveKind::Guess,
        })
    }
}
