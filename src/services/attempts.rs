//! Try budget tracking.
//!
//! Every mismatch consumes one try while any remain; the budget reaching
//! zero ends the game as a loss, exactly once. Matches never consume tries.
//! A `max_tries` of zero disables the limit: no try is ever consumed and
//! the loss path is unreachable.

use crate::events::GameEvent;

/// Remaining-mismatch budget.
#[derive(Clone, Debug)]
pub struct AttemptsService {
    remaining: u32,
    max: u32,
}

impl AttemptsService {
    /// Create a full budget of `max_tries`.
    #[must_use]
    pub fn new(max_tries: u32) -> Self {
        Self {
            remaining: max_tries,
            max: max_tries,
        }
    }

    /// Tries left.
    #[must_use]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Configured maximum.
    #[must_use]
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Restore the budget from a snapshot, clamped into `[0, max]`.
    /// Publishes `AttemptsChanged` so observers resynchronize.
    pub fn load_state(&mut self, tries_remaining: u32, out: &mut Vec<GameEvent>) {
        self.remaining = tries_remaining.min(self.max);
        out.push(GameEvent::AttemptsChanged {
            remaining: self.remaining,
            max: self.max,
        });
    }

    /// Apply a pair resolution.
    pub fn on_pair_resolved(&mut self, is_match: bool, out: &mut Vec<GameEvent>) {
        if is_match || self.remaining == 0 {
            return;
        }

        self.remaining -= 1;
        out.push(GameEvent::AttemptsChanged {
            remaining: self.remaining,
            max: self.max,
        });

        if self.remaining == 0 {
            out.push(GameEvent::GameEnded { is_win: false });
        }
    }
}
