//! The board oracle: mine placement and adjacent-mine counts.
//!
//! The knowledge base never looks at a `Board`; the game loop asks the board
//! for a clue and hands the number over.

use crate::error::{Result, SweeperError};
use crate::rng::RandomSource;
use crate::types::{all_cells, neighbors, Cell};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

impl BoardConfig {
    pub fn new(height: usize, width: usize, mines: usize) -> Result<Self> {
        let config = Self { height, width, mines };
        config.validate()?;
        Ok(config)
    }

    pub const fn beginner() -> Self {
        Self { height: 9, width: 9, mines: 10 }
    }

    pub const fn intermediate() -> Self {
        Self { height: 16, width: 16, mines: 40 }
    }

    pub const fn expert() -> Self {
        Self { height: 16, width: 30, mines: 99 }
    }

    pub const fn total_cells(&self) -> usize {
        self.height.saturating_mul(self.width)
    }

    pub fn validate(&self) -> Result<()> {
        if self.height == 0 || self.width == 0 {
            return Err(SweeperError::InvalidDimensions {
                height: self.height,
                width: self.width,
            });
        }
        if self.mines > self.total_cells() {
            return Err(SweeperError::TooManyMines {
                mines: self.mines,
                cells: self.total_cells(),
            });
        }
        Ok(())
    }
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self { height: 8, width: 8, mines: 8 }
    }
}

/// Mine layout plus the set of mines the player has flagged.
///
/// Mines are stored flat in row-major order: `mines[row * width + col]`.
#[derive(Clone, Debug)]
pub struct Board {
    height: usize,
    width: usize,
    mines: Vec<bool>,
    mine_count: usize,
    found: HashSet<Cell>,
}

impl Board {
    /// Place `config.mines` distinct mines uniformly at random.
    pub fn random<R: RandomSource>(config: BoardConfig, rng: &mut R) -> Result<Self> {
        config.validate()?;

        let mut free: Vec<usize> = (0..config.total_cells()).collect();
        let mut mines = vec![false; config.total_cells()];
        for _ in 0..config.mines {
            let index = free.swap_remove(rng.gen_range(free.len()));
            mines[index] = true;
        }

        log::debug!(
            "Placed {} mines on a {}x{} board",
            config.mines,
            config.height,
            config.width
        );
        Ok(Self {
            height: config.height,
            width: config.width,
            mines,
            mine_count: config.mines,
            found: HashSet::new(),
        })
    }

    /// Build a board with mines at exactly the given cells.
    pub fn from_mines(height: usize, width: usize, cells: &[Cell]) -> Result<Self> {
        BoardConfig::new(height, width, 0)?;

        let mut mines = vec![false; height * width];
        for &cell in cells {
            if !cell.in_bounds(height, width) {
                return Err(SweeperError::InvalidCell(cell));
            }
            mines[cell.row * width + cell.col] = true;
        }
        let mine_count = mines.iter().filter(|&&m| m).count();

        Ok(Self {
            height,
            width,
            mines,
            mine_count,
            found: HashSet::new(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn config(&self) -> BoardConfig {
        BoardConfig {
            height: self.height,
            width: self.width,
            mines: self.mine_count,
        }
    }

    pub fn mine_count(&self) -> usize {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> usize {
        self.height * self.width - self.mine_count
    }

    /// Out-of-bounds cells are never mines.
    #[inline(always)]
    pub fn is_mine(&self, cell: Cell) -> bool {
        cell.in_bounds(self.height, self.width) && self.mines[cell.row * self.width + cell.col]
    }

    pub fn mines(&self) -> impl Iterator<Item = Cell> + '_ {
        all_cells(self.height, self.width).filter(|&cell| self.is_mine(cell))
    }

    /// Number of mines among the 8 neighbours of `cell`, not counting `cell`.
    pub fn nearby_mines(&self, cell: Cell) -> usize {
        neighbors(cell, self.height, self.width)
            .into_iter()
            .filter(|&n| self.is_mine(n))
            .count()
    }

    /// Record that the player has identified `cell` as a mine.
    pub fn flag(&mut self, cell: Cell) {
        self.found.insert(cell);
    }

    pub fn found(&self) -> &HashSet<Cell> {
        &self.found
    }

    /// All mines flagged and nothing else.
    pub fn won(&self) -> bool {
        self.found.len() == self.mine_count && self.found.iter().all(|&cell| self.is_mine(cell))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SweeperRng;

    #[test]
    fn test_config_validation() {
        assert!(BoardConfig::default().validate().is_ok());
        assert!(BoardConfig::expert().validate().is_ok());
        assert_eq!(
            BoardConfig::new(0, 4, 0),
            Err(SweeperError::InvalidDimensions { height: 0, width: 4 })
        );
        assert_eq!(
            BoardConfig::new(2, 2, 5),
            Err(SweeperError::TooManyMines { mines: 5, cells: 4 })
        );
    }

    #[test]
    fn test_random_places_exact_count() {
        let mut rng = SweeperRng::from_seed(42);
        let board = Board::random(BoardConfig::expert(), &mut rng).unwrap();
        assert_eq!(board.mines().count(), 99);
        assert_eq!(board.mine_count(), 99);
        assert_eq!(board.safe_cell_count(), 16 * 30 - 99);
        assert_eq!(board.config(), BoardConfig::expert());
    }

    #[test]
    fn test_random_full_board() {
        let mut rng = SweeperRng::from_seed(3);
        let board = Board::random(BoardConfig { height: 3, width: 3, mines: 9 }, &mut rng).unwrap();
        assert_eq!(board.safe_cell_count(), 0);
        assert!(all_cells(3, 3).all(|c| board.is_mine(c)));
    }

    #[test]
    fn test_random_is_seed_reproducible() {
        let a = Board::random(BoardConfig::beginner(), &mut SweeperRng::from_seed(9)).unwrap();
        let b = Board::random(BoardConfig::beginner(), &mut SweeperRng::from_seed(9)).unwrap();
        assert_eq!(a.mines().collect::<Vec<_>>(), b.mines().collect::<Vec<_>>());
    }

    #[test]
    fn test_nearby_mines_center() {
        let board = Board::from_mines(3, 3, &[Cell::new(1, 1)]).unwrap();
        for cell in all_cells(3, 3).filter(|&c| c != Cell::new(1, 1)) {
            assert_eq!(board.nearby_mines(cell), 1);
        }
        assert_eq!(board.nearby_mines(Cell::new(1, 1)), 0);
    }

    #[test]
    fn test_nearby_mines_corner() {
        let board = Board::from_mines(3, 3, &[Cell::new(0, 0)]).unwrap();
        assert_eq!(board.nearby_mines(Cell::new(0, 1)), 1);
        assert_eq!(board.nearby_mines(Cell::new(1, 1)), 1);
        assert_eq!(board.nearby_mines(Cell::new(0, 2)), 0);
        assert_eq!(board.nearby_mines(Cell::new(2, 2)), 0);
    }

    #[test]
    fn test_from_mines_rejects_out_of_bounds() {
        assert_eq!(
            Board::from_mines(2, 2, &[Cell::new(2, 0)]).unwrap_err(),
            SweeperError::InvalidCell(Cell::new(2, 0))
        );
    }

    #[test]
    fn test_won_requires_exact_flags() {
        let mut board = Board::from_mines(2, 2, &[Cell::new(0, 0)]).unwrap();
        assert!(!board.won());
        board.flag(Cell::new(1, 1));
        assert!(board.found().contains(&Cell::new(1, 1)));
        assert!(!board.won());

        let mut board = Board::from_mines(2, 2, &[Cell::new(0, 0)]).unwrap();
        board.flag(Cell::new(0, 0));
        assert!(board.won());
    }
}
