//! Selection engine for Nihon
//!
//! Decides which character of the active pool to present next, balancing
//! new material against weighted review of characters already seen.

pub mod engine;
pub mod random;

pub use engine::{review_weight, Selection, SelectionEngine, NEW_ITEM_PROBABILITY};
pub use random::{RandomSource, RngSource, ScriptedRandom};
