//! Rule-based Minesweeper inference engine.
//!
//! A [`KnowledgeBase`] turns clue counts from probed cells into proven mines
//! and proven safe cells using direct and subset inference, and picks the
//! next cell to probe: a proven-safe one when available, otherwise a uniform
//! random guess among the cells not known to be mines.
//!
//! On `wasm32` the engine is also exported to JavaScript as `SweeperAgent`.

pub mod board;
pub mod constraint;
pub mod error;
pub mod game;
pub mod knowledge;
pub mod policy;
pub mod rng;
pub mod types;

pub use board::{Board, BoardConfig};
pub use constraint::{Constraint, MarkOutcome};
pub use error::{Contradiction, Result, SweeperError};
pub use game::{play, GameOutcome, GameReport};
pub use knowledge::{ConstraintId, KnowledgeBase, KnowledgeSnapshot};
pub use policy::{Move, MoveKind};
pub use rng::{RandomSource, ScriptedRng, SweeperRng};
pub use types::{all_cells, neighbors, Cell};

// ─── WASM Exports (only compiled for wasm32 target) ─────────────────────────

#[cfg(target_arch = "wasm32")]
mod wasm_exports {
    use crate::knowledge::KnowledgeBase;
    use crate::rng::SweeperRng;
    use crate::types::Cell;
    use wasm_bindgen::prelude::*;

    /// A knowledge base bundled with its own random source.
    #[wasm_bindgen]
    pub struct SweeperAgent {
        knowledge: KnowledgeBase,
        rng: SweeperRng,
    }

    #[wasm_bindgen]
    impl SweeperAgent {
        /// Agent whose guesses use browser entropy.
        #[wasm_bindgen(constructor)]
        pub fn new(height: usize, width: usize) -> SweeperAgent {
            Self {
                knowledge: KnowledgeBase::new(height, width),
                rng: SweeperRng::new(),
            }
        }

        /// Agent with reproducible guesses.
        #[wasm_bindgen(js_name = "withSeed")]
        pub fn with_seed(height: usize, width: usize, seed: u64) -> SweeperAgent {
            Self {
                knowledge: KnowledgeBase::new(height, width),
                rng: SweeperRng::from_seed(seed),
            }
        }

        #[wasm_bindgen(js_name = "recordClue")]
        pub fn record_clue(&mut self, row: usize, col: usize, count: usize) {
            self.knowledge.record_clue(Cell::new(row, col), count);
        }

        #[wasm_bindgen(js_name = "markMine")]
        pub fn mark_mine(&mut self, row: usize, col: usize) {
            self.knowledge.mark_mine(Cell::new(row, col));
        }

        #[wasm_bindgen(js_name = "markSafe")]
        pub fn mark_safe(&mut self, row: usize, col: usize) {
            self.knowledge.mark_safe(Cell::new(row, col));
        }

        /// Next cell to probe as `{ row, col, safe }`, or `null`.
        #[wasm_bindgen(js_name = "nextMove")]
        pub fn next_move(&mut self) -> JsValue {
            let Some(next) = self.knowledge.next_move(&mut self.rng) else {
                return JsValue::NULL;
            };

            let obj = js_sys::Object::new();
            let safe = next.kind == crate::policy::MoveKind::Safe;
            js_sys::Reflect::set(&obj, &"row".into(), &(next.cell.row as u32).into()).unwrap();
            js_sys::Reflect::set(&obj, &"col".into(), &(next.cell.col as u32).into()).unwrap();
            js_sys::Reflect::set(&obj, &"safe".into(), &safe.into()).unwrap();
            obj.into()
        }

        /// Full knowledge snapshot as a plain JS object.
        pub fn snapshot(&self) -> Result<JsValue, JsValue> {
            serde_wasm_bindgen::to_value(&self.knowledge.snapshot()).map_err(Into::into)
        }

        #[wasm_bindgen(js_name = "isConsistent")]
        pub fn is_consistent(&self) -> bool {
            self.knowledge.is_consistent()
        }
    }
}
