//! Mismatch flip-back timers.
//!
//! Each pending entry counts down by the tick delta and fires a
//! `FlipBackPairDue` for its card pair when it reaches zero. Entries are
//! tagged with the session generation they were scheduled under; entries
//! from a superseded generation are discarded on the next tick without
//! firing, so a timer can never act on a board that replaced its own.

use smallvec::SmallVec;

use crate::core::CardId;

#[derive(Clone, Copy, Debug)]
struct PendingFlipBack {
    remaining: f64,
    a: CardId,
    b: CardId,
    generation: u64,
}

/// Countdown timers for mismatched pairs awaiting their flip-back.
#[derive(Clone, Debug, Default)]
pub struct FlipBackTimer {
    pending: SmallVec<[PendingFlipBack; 4]>,
}

impl FlipBackTimer {
    /// Create an empty timer set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a flip-back for a pair after `delay` seconds.
    pub fn schedule(&mut self, delay: f64, a: CardId, b: CardId, generation: u64) {
        self.pending.push(PendingFlipBack {
            remaining: delay,
            a,
            b,
            generation,
        });
    }

    /// Advance all timers by `dt` seconds.
    ///
    /// Returns the pairs that came due, oldest first. Entries from a
    /// generation other than `current_generation` are dropped silently.
    pub fn tick(&mut self, dt: f64, current_generation: u64) -> SmallVec<[(CardId, CardId); 2]> {
        let mut due = SmallVec::new();

        let mut write = 0;
        for read in 0..self.pending.len() {
            let mut entry = self.pending[read];
            if entry.generation != current_generation {
                continue;
            }

            entry.remaining -= dt;
            if entry.remaining <= 0.0 {
                due.push((entry.a, entry.b));
                continue;
            }

            self.pending[write] = entry;
            write += 1;
        }
        self.pending.truncate(write);

        due
    }

    /// Number of pending entries (stale ones included until the next tick).
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Check whether no entries are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}
