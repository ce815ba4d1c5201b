//! Game loop: drive a knowledge base against a board until the game ends.

use crate::board::Board;
use crate::knowledge::KnowledgeBase;
use crate::policy::MoveKind;
use crate::rng::RandomSource;
use crate::types::Cell;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOutcome {
    /// Every safe cell was probed.
    Won,
    /// A guess landed on a mine.
    Lost(Cell),
    /// The policy ran out of moves before the board was cleared.
    Stalled,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameReport {
    pub outcome: GameOutcome,
    pub moves: usize,
    pub guesses: usize,
}

/// Play `board` to the end using `knowledge` and the caller's random source.
///
/// Each move probes the chosen cell, feeds the clue back into the knowledge
/// base and flags every mine it has proven so far.
pub fn play<R: RandomSource>(
    board: &mut Board,
    knowledge: &mut KnowledgeBase,
    rng: &mut R,
) -> GameReport {
    let mut moves = 0;
    let mut guesses = 0;

    let outcome = loop {
        if knowledge.probed().len() >= board.safe_cell_count() {
            break GameOutcome::Won;
        }

        let Some(next) = knowledge.next_move(rng) else {
            break GameOutcome::Stalled;
        };
        moves += 1;
        if next.kind == MoveKind::Guess {
            guesses += 1;
        }

        if board.is_mine(next.cell) {
            break GameOutcome::Lost(next.cell);
        }

        let clue = board.nearby_mines(next.cell);
        log::debug!("Move {moves}: {:?} {} shows {clue}", next.kind, next.cell);
        knowledge.record_clue(next.cell, clue);

        for &mine in knowledge.known_mines() {
            board.flag(mine);
        }
    };

    log::info!("Game over after {moves} moves ({guesses} guesses): {outcome:?}");
    GameReport {
        outcome,
        moves,
        guesses,
    }
}
