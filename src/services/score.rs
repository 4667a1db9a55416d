//! Score and combo tracking.
//!
//! Reacts to `PairResolved`: a match raises the combo streak and awards
//! `match_base * combo`, plus a one-time `win_bonus` when the final pair
//! completes the board; a mismatch resets the combo and deducts a penalty,
//! with the score floored at zero. Every reaction publishes `ScoreChanged`.

use crate::core::BoardState;
use crate::events::GameEvent;

/// Score, combo, and their scoring constants.
#[derive(Clone, Debug)]
pub struct ScoreService {
    score: u32,
    combo: u32,
    match_base: u32,
    mismatch_penalty: u32,
    win_bonus: u32,
}

impl ScoreService {
    /// Create a score service with the given constants, starting at zero.
    #[must_use]
    pub fn new(match_base: u32, mismatch_penalty: u32, win_bonus: u32) -> Self {
        Self {
            score: 0,
            combo: 0,
            match_base,
            mismatch_penalty,
            win_bonus,
        }
    }

    /// Current score.
    #[must_use]
    pub fn score(&self) -> u32 {
        self.score
    }

    /// Current consecutive-match streak.
    #[must_use]
    pub fn combo(&self) -> u32 {
        self.combo
    }

    /// Restore score and combo from a snapshot. Publishes a zero-delta
    /// `ScoreChanged` so observers resynchronize.
    pub fn load_state(&mut self, score: u32, combo: u32, out: &mut Vec<GameEvent>) {
        self.score = score;
        self.combo = combo;
        out.push(GameEvent::ScoreChanged {
            score: self.score,
            combo: self.combo,
            delta: 0,
        });
    }

    /// Apply a pair resolution.
    ///
    /// All arithmetic saturates: the score is floored at zero on penalties
    /// and capped at `u32::MAX` on gains, and the reported `delta` is
    /// clamped into `i32` range.
    pub fn on_pair_resolved(&mut self, is_match: bool, board: &BoardState, out: &mut Vec<GameEvent>) {
        let delta: i32;

        if is_match {
            self.combo += 1;
            let mut gained = self.match_base.saturating_mul(self.combo);
            self.score = self.score.saturating_add(gained);

            // Win bonus lands exactly once, when the board becomes complete.
            if board.is_complete() {
                self.score = self.score.saturating_add(self.win_bonus);
                gained = gained.saturating_add(self.win_bonus);
            }
            delta = gained.min(i32::MAX as u32) as i32;
        } else {
            self.combo = 0;
            self.score = self.score.saturating_sub(self.mismatch_penalty);
            delta = -(self.mismatch_penalty.min(i32::MAX as u32) as i32);
        }

        out.push(GameEvent::ScoreChanged {
            score: self.score,
            combo: self.combo,
            delta,
        });
    }
}
