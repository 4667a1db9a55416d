//! One-shot delayed actions.
//!
//! A closed set of deferred session actions, each stamped with an absolute
//! due time on the injected tick clock. Used for the preview start/end and
//! the post-game restart. Like the flip-back timers, entries carry the
//! session generation they were scheduled under and are dropped silently
//! once that generation is superseded.

use smallvec::SmallVec;

/// The closed set of actions the session can defer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DelayedAction {
    /// Reveal every face-down card and schedule the preview end.
    StartPreview,
    /// Hide the previewed cards again and publish `PreviewEnded`.
    EndPreview,
    /// Publish `RestartRequested`.
    Restart,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    due: f64,
    action: DelayedAction,
    generation: u64,
}

/// Due-time scheduler for one-shot session actions.
#[derive(Clone, Debug, Default)]
pub struct DelayedRunner {
    entries: SmallVec<[Entry; 4]>,
}

impl DelayedRunner {
    /// Create an empty runner.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule an action to fire once `now` reaches `due`.
    pub fn schedule(&mut self, due: f64, action: DelayedAction, generation: u64) {
        self.entries.push(Entry {
            due,
            action,
            generation,
        });
    }

    /// Collect every action due at `now`, in scheduling order.
    ///
    /// Entries from a generation other than `current_generation` are
    /// dropped silently.
    pub fn tick(&mut self, now: f64, current_generation: u64) -> SmallVec<[DelayedAction; 2]> {
        let mut due = SmallVec::new();

        let mut write = 0;
        for read in 0..self.entries.len() {
            let entry = self.entries[read];
            if entry.generation != current_generation {
                continue;
            }

            if now >= entry.due {
                due.push(entry.action);
                continue;
            }

            self.entries[write] = entry;
            write += 1;
        }
        self.entries.truncate(write);

        due
    }

    /// Number of pending entries (stale ones included until the next tick).
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether no entries are pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
