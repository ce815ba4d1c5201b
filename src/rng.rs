//! Injectable randomness for the move policy and mine placement.
//!
//! Everything random in the crate goes through [`RandomSource`]: guesses in
//! `random_move` and mine layout in `Board::random`. `SweeperRng` is the
//! production source and `ScriptedRng` lets a test decide each pick.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// A uniform source of indices.
pub trait RandomSource {
    /// A value in `[0, max)`. `max` is always non-zero.
    fn gen_range(&mut self, max: usize) -> usize;
}

/// Seedable RNG backed by `SmallRng`.
pub struct SweeperRng {
    inner: SmallRng,
}

impl SweeperRng {
    /// Unseeded source; two agents built this way guess independently.
    pub fn new() -> Self {
        Self {
            inner: SmallRng::from_os_rng(),
        }
    }

    /// Same seed, same guesses and same mine layouts.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            inner: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for SweeperRng {
    fn default() -> Self {
        Self::new()
    }
}

impl RandomSource for SweeperRng {
    #[inline(always)]
    fn gen_range(&mut self, max: usize) -> usize {
        self.inner.random_range(0..max)
    }
}

/// Replays a fixed sequence of picks, cycling when exhausted. Each pick is
/// reduced modulo the requested range.
#[derive(Clone, Debug)]
pub struct ScriptedRng {
    picks: Vec<usize>,
    next: usize,
}

impl ScriptedRng {
    pub fn new(picks: impl Into<Vec<usize>>) -> Self {
        Self {
            picks: picks.into(),
            next: 0,
        }
    }
}

impl RandomSource for ScriptedRng {
    fn gen_range(&mut self, max: usize) -> usize {
        if self.picks.is_empty() {
            return 0;
        }
        let pick = self.picks[self.next % self.picks.len()];
        self.next += 1;
        pick % max
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::knowledge::KnowledgeBase;
    use crate::types::Cell;

    #[test]
    fn test_same_seed_replays_guesses() {
        let kb = KnowledgeBase::new(9, 9);
        let guesses = |seed| {
            let mut rng = SweeperRng::from_seed(seed);
            (0..20)
                .map(|_| kb.random_move(9, 9, &mut rng))
                .collect::<Vec<Option<Cell>>>()
        };
        assert_eq!(guesses(7), guesses(7));
    }

    #[test]
    fn test_picks_fit_shrinking_candidate_lists() {
        let mut rng = SweeperRng::from_seed(99);
        for max in (1..=81).rev() {
            assert!(rng.gen_range(max) < max);
        }
        assert_eq!(rng.gen_range(1), 0);
    }

    #[test]
    fn test_scripted_cycles_and_wraps() {
        let mut rng = ScriptedRng::new(vec![1, 7]);
        assert_eq!(rng.gen_range(5), 1);
        assert_eq!(rng.gen_range(5), 2);
        assert_eq!(rng.gen_range(5), 1);
        assert_eq!(ScriptedRng::new(Vec::<usize>::new()).gen_range(3), 0);
    }
}
