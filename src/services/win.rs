//! Win detection.
//!
//! Publishes `GameEnded(is_win=true)` when a match completes the board.
//! Latched by any observed `GameEnded`, including the attempts-exhausted
//! loss path, so the end fires at most once per session even if a
//! spurious `PairResolved` is replayed afterwards.

use crate::core::BoardState;
use crate::events::GameEvent;

/// Detects the board-complete win condition.
#[derive(Clone, Debug, Default)]
pub struct WinConditionService {
    ended: bool,
}

impl WinConditionService {
    /// Create an unlatched win detector.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply a pair resolution.
    pub fn on_pair_resolved(&mut self, is_match: bool, board: &BoardState, out: &mut Vec<GameEvent>) {
        if self.ended || !is_match {
            return;
        }

        if board.is_complete() {
            out.push(GameEvent::GameEnded { is_win: true });
        }
    }

    /// Latch on any game end, whatever its source.
    pub fn on_game_ended(&mut self) {
        self.ended = true;
    }
}
