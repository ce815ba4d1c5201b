//! The knowledge base: everything the agent has learned about the board.
//!
//! Holds the probed cells, the cells proven to be mines or safe, and an
//! arena of [`Constraint`]s. Every new fact is pushed into all constraints
//! and then two rules are applied until neither changes anything:
//!
//! - direct inference: a constraint whose count is zero proves its cells
//!   safe, one whose count equals its size proves them mines;
//! - subset inference: if `B.cells ⊆ A.cells`, the cells of `A` outside `B`
//!   hold exactly `A.count - B.count` mines.
//!
//! Inconsistent clues never abort propagation. Counts are floored at zero
//! and the problem is recorded as a [`Contradiction`].

use crate::constraint::{Constraint, MarkOutcome};
use crate::error::Contradiction;
use crate::types::{neighbors, Cell};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Stable index of a constraint in the knowledge base arena.
///
/// Constraints are never removed from the arena; emptied ones stay inert, so
/// an id keeps naming the same constraint for the lifetime of the knowledge
/// base.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ConstraintId(usize);

impl ConstraintId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Clone, Debug)]
pub struct KnowledgeBase {
    height: usize,
    width: usize,
    probed: HashSet<Cell>,
    known_mines: HashSet<Cell>,
    known_safe: HashSet<Cell>,
    constraints: Vec<Constraint>,
    contradictions: Vec<Contradiction>,
}

/// Sorted, serializable view of a knowledge base.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeSnapshot {
    pub height: usize,
    pub width: usize,
    pub probed: Vec<Cell>,
    pub known_mines: Vec<Cell>,
    pub known_safe: Vec<Cell>,
    pub constraints: Vec<Constraint>,
    pub contradictions: Vec<Contradiction>,
}

impl KnowledgeBase {
    pub fn new(height: usize, width: usize) -> Self {
        Self {
            height,
            width,
            probed: HashSet::new(),
            known_mines: HashSet::new(),
            known_safe: HashSet::new(),
            constraints: Vec::new(),
            contradictions: Vec::new(),
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn probed(&self) -> &HashSet<Cell> {
        &self.probed
    }

    pub fn known_mines(&self) -> &HashSet<Cell> {
        &self.known_mines
    }

    pub fn known_safe(&self) -> &HashSet<Cell> {
        &self.known_safe
    }

    pub fn is_probed(&self, cell: Cell) -> bool {
        self.probed.contains(&cell)
    }

    pub fn is_known_mine(&self, cell: Cell) -> bool {
        self.known_mines.contains(&cell)
    }

    pub fn is_known_safe(&self, cell: Cell) -> bool {
        self.known_safe.contains(&cell)
    }

    /// Live (non-empty) constraints with their ids.
    pub fn constraints(&self) -> impl Iterator<Item = (ConstraintId, &Constraint)> {
        self.constraints
            .iter()
            .enumerate()
            .filter(|(_, c)| !c.is_empty())
            .map(|(i, c)| (ConstraintId(i), c))
    }

    pub fn constraint(&self, id: ConstraintId) -> Option<&Constraint> {
        self.constraints.get(id.0)
    }

    pub fn contradictions(&self) -> &[Contradiction] {
        &self.contradictions
    }

    pub fn is_consistent(&self) -> bool {
        self.contradictions.is_empty()
    }

    /// Strict-mode check: the first contradiction recorded so far, if any.
    pub fn check_consistency(&self) -> Result<(), Contradiction> {
        match self.contradictions.first() {
            Some(&contradiction) => Err(contradiction),
            None => Ok(()),
        }
    }

    /// Learn that `cell` was probed safely and has `count` mines around it.
    pub fn record_clue(&mut self, cell: Cell, count: usize) {
        log::debug!("Clue {count} at {cell}");

        if self.known_mines.remove(&cell) {
            // The board is authoritative: a revealed cell is never a mine.
            self.record(Contradiction::ProbedKnownMine { cell });
        }
        self.probed.insert(cell);
        self.apply_safe(cell);

        let mut remaining = count;
        let mut unresolved = BTreeSet::new();
        for neighbor in neighbors(cell, self.height, self.width) {
            if self.known_mines.contains(&neighbor) {
                match remaining.checked_sub(1) {
                    Some(next) => remaining = next,
                    None => self.record(Contradiction::NegativeCount { cell: neighbor }),
                }
            } else if !self.known_safe.contains(&neighbor) && !self.probed.contains(&neighbor) {
                unresolved.insert(neighbor);
            }
        }

        if remaining > unresolved.len() {
            self.record(Contradiction::Overcommitted {
                cell,
                count: remaining,
                available: unresolved.len(),
            });
        }

        self.insert(Constraint::new(unresolved, remaining));
        self.propagate();
    }

    /// Add an externally built constraint.
    ///
    /// Cells already known are stripped first, with known mines deducted from
    /// the count. Returns the id of the stored constraint, or `None` when it
    /// ended up empty or duplicated an existing one.
    pub fn add_constraint(&mut self, mut constraint: Constraint) -> Option<ConstraintId> {
        let known: Vec<Cell> = constraint
            .cells()
            .iter()
            .copied()
            .filter(|c| {
                self.known_mines.contains(c)
                    || self.known_safe.contains(c)
                    || self.probed.contains(c)
            })
            .collect();
        for cell in known {
            if self.known_mines.contains(&cell) {
                if constraint.mark_mine(cell) == MarkOutcome::Clamped {
                    self.record(Contradiction::NegativeCount { cell });
                }
            } else {
                constraint.mark_safe(cell);
            }
        }

        let id = self.insert(constraint);
        self.propagate();
        id
    }

    /// Record `cell` as a mine and propagate. Repeated calls are no-ops.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.apply_mine(cell) {
            self.propagate();
        }
    }

    /// Record `cell` as safe and propagate. Repeated calls are no-ops.
    pub fn mark_safe(&mut self, cell: Cell) {
        if self.apply_safe(cell) {
            self.propagate();
        }
    }

    pub fn snapshot(&self) -> KnowledgeSnapshot {
        fn sorted(set: &HashSet<Cell>) -> Vec<Cell> {
            let mut cells: Vec<Cell> = set.iter().copied().collect();
            cells.sort_unstable();
            cells
        }

        KnowledgeSnapshot {
            height: self.height,
            width: self.width,
            probed: sorted(&self.probed),
            known_mines: sorted(&self.known_mines),
            known_safe: sorted(&self.known_safe),
            constraints: self.constraints().map(|(_, c)| c.clone()).collect(),
            contradictions: self.contradictions.clone(),
        }
    }

    fn record(&mut self, contradiction: Contradiction) {
        if !self.contradictions.contains(&contradiction) {
            log::warn!("Inconsistent knowledge: {contradiction}");
            self.contradictions.push(contradiction);
        }
    }

    /// Whether a live constraint equal to `constraint` is already stored.
    /// Emptied constraints stay in the arena, which only grows, so they are
    /// skipped here.
    fn is_stored(&self, constraint: &Constraint) -> bool {
        self.constraints
            .iter()
            .any(|c| !c.is_empty() && c == constraint)
    }

    fn insert(&mut self, constraint: Constraint) -> Option<ConstraintId> {
        if constraint.is_empty() || self.is_stored(&constraint) {
            return None;
        }
        log::trace!("New constraint {constraint}");
        self.constraints.push(constraint);
        Some(ConstraintId(self.constraints.len() - 1))
    }

    /// Returns true if this was new information.
    fn apply_mine(&mut self, cell: Cell) -> bool {
        if self.known_mines.contains(&cell) {
            return false;
        }
        if self.known_safe.contains(&cell) || self.probed.contains(&cell) {
            self.record(Contradiction::ConflictingMark { cell });
            return false;
        }

        self.known_mines.insert(cell);
        let mut clamped = false;
        for constraint in &mut self.constraints {
            clamped |= constraint.mark_mine(cell) == MarkOutcome::Clamped;
        }
        if clamped {
            self.record(Contradiction::NegativeCount { cell });
        }
        true
    }

    /// Returns true if this was new information.
    fn apply_safe(&mut self, cell: Cell) -> bool {
        if self.known_safe.contains(&cell) {
            return false;
        }
        if self.known_mines.contains(&cell) {
            self.record(Contradiction::ConflictingMark { cell });
            return false;
        }

        self.known_safe.insert(cell);
        let mut overcommitted = Vec::new();
        for constraint in &mut self.constraints {
            if constraint.mark_safe(cell).has_update() && !constraint.is_consistent() {
                overcommitted.push(Contradiction::Overcommitted {
                    cell,
                    count: constraint.count(),
                    available: constraint.len(),
                });
            }
        }
        for contradiction in overcommitted {
            self.record(contradiction);
        }
        true
    }

    /// Interleave both inference rules until neither produces anything new.
    fn propagate(&mut self) {
        let mut rounds = 0usize;
        loop {
            rounds += 1;
            let direct = self.infer_direct();
            let derived = self.infer_subsets();
            if !direct && derived == 0 {
                break;
            }
        }
        log::debug!(
            "Fixpoint after {rounds} rounds: {} mines, {} safe, {} live constraints",
            self.known_mines.len(),
            self.known_safe.len(),
            self.constraints().count()
        );
    }

    /// Direct inference, repeated until a full pass learns nothing.
    fn infer_direct(&mut self) -> bool {
        let mut changed = false;
        loop {
            let mut progress = false;
            for index in 0..self.constraints.len() {
                let constraint = &self.constraints[index];
                if constraint.is_empty() {
                    continue;
                }
                let mines = constraint.known_mines();
                let safe = constraint.known_safe();
                for cell in mines {
                    progress |= self.apply_mine(cell);
                }
                for cell in safe {
                    progress |= self.apply_safe(cell);
                }
            }
            if !progress {
                return changed;
            }
            changed = true;
        }
    }

    /// Subset inference over every ordered pair of distinct live constraints.
    /// Returns how many new constraints were stored.
    fn infer_subsets(&mut self) -> usize {
        let live: Vec<usize> = (0..self.constraints.len())
            .filter(|&i| !self.constraints[i].is_empty())
            .collect();

        let mut derived: Vec<Constraint> = Vec::new();
        let mut contradictions = Vec::new();
        for &a in &live {
            for &b in &live {
                if a == b {
                    continue;
                }
                let (outer, inner) = (&self.constraints[a], &self.constraints[b]);
                if !inner.is_subset_of(outer) {
                    continue;
                }
                let candidate = outer.difference(inner);
                if candidate.is_empty()
                    || self.is_stored(&candidate)
                    || derived.contains(&candidate)
                {
                    continue;
                }
                if outer.is_negative_difference(inner) {
                    contradictions.push(Contradiction::NegativeDerivation {
                        needed: inner.count(),
                        available: outer.count(),
                    });
                }
                log::trace!("Derived {candidate} from {outer} minus {inner}");
                derived.push(candidate);
            }
        }

        for contradiction in contradictions {
            self.record(contradiction);
        }
        let added = derived.len();
        self.constraints.extend(derived);
        added
    }
}
