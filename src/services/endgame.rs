//! Post-game restart scheduling.
//!
//! On the first `GameEnded` of a session, schedules a delayed restart
//! (win and defeat delays are configured independently) and reports that
//! the end was newly observed so the orchestrator can clear the save.
//! Later `GameEnded` events in the same session are ignored.

use crate::runtime::{DelayedAction, DelayedRunner};

/// Schedules the automatic restart after a game ends.
#[derive(Clone, Debug)]
pub struct EndgameService {
    scheduled: bool,
    win_delay: f64,
    defeat_delay: f64,
}

impl EndgameService {
    /// Create an endgame service with the configured restart delays.
    #[must_use]
    pub fn new(win_delay: f64, defeat_delay: f64) -> Self {
        Self {
            scheduled: false,
            win_delay,
            defeat_delay,
        }
    }

    /// React to a game end. Returns `true` when this is the first end of
    /// the session and a restart was scheduled.
    pub fn on_game_ended(
        &mut self,
        is_win: bool,
        now: f64,
        runner: &mut DelayedRunner,
        generation: u64,
    ) -> bool {
        if self.scheduled {
            return false;
        }
        self.scheduled = true;

        let delay = if is_win { self.win_delay } else { self.defeat_delay };
        runner.schedule(now + delay, DelayedAction::Restart, generation);
        true
    }
}
