//! Session orchestration.

mod game;

pub use game::GameSession;
