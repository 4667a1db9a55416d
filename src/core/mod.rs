//! Core types: cards, board, layout, rules, RNG, errors.
//!
//! These are the game-agnostic building blocks the services operate on.

pub mod board;
pub mod card;
pub mod config;
pub mod error;
pub mod rng;

pub use board::{BoardGenerator, BoardState};
pub use card::{CardId, CardState, PairId};
pub use config::{GameRules, Layout};
pub use error::EngineError;
pub use rng::EngineRng;
