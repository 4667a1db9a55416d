//! Session configuration: board layout and game rules.
//!
//! Everything here is externally supplied and validated once, at session
//! start or on a rebuild request. Defaults mirror a conventional memory
//! game: 10 tries, a one-second opening preview, 0.8s mismatch flip-back,
//! three-second end screens, and 100/20/250 scoring constants.

use serde::{Deserialize, Serialize};

use super::error::EngineError;

/// Grid dimensions for a board.
///
/// Valid layouts have both dimensions >= 2, an even total (so every card
/// can belong to exactly one pair), and at most `u16::MAX` cards so every
/// card is addressable by a `CardId`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Layout {
    pub rows: u16,
    pub cols: u16,
}

impl Layout {
    /// Create a new layout. Call `validate` before building a board from it.
    #[must_use]
    pub const fn new(rows: u16, cols: u16) -> Self {
        Self { rows, cols }
    }

    /// Total number of cards on the board.
    #[must_use]
    pub const fn total_cards(self) -> usize {
        self.rows as usize * self.cols as usize
    }

    /// Number of pairs on the board.
    #[must_use]
    pub const fn pair_count(self) -> usize {
        self.total_cards() / 2
    }

    /// Check the layout invariants: each dimension >= 2, even total, and
    /// a total within the card id space.
    pub fn validate(self) -> Result<(), EngineError> {
        if self.rows < 2
            || self.cols < 2
            || self.total_cards() % 2 != 0
            || self.total_cards() > u16::MAX as usize
        {
            return Err(EngineError::InvalidLayout {
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.rows, self.cols)
    }
}

/// Game rules and tuning constants.
///
/// Scoring constants are non-negative by construction (`u32`). Delays are
/// seconds on the injected tick clock and must be finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct GameRules {
    /// Mismatch budget. `0` disables the limit entirely: tries are never
    /// consumed and the game cannot be lost.
    pub max_tries: u32,

    /// Show-all-then-hide reveal at the start of every fresh board.
    pub preview_enabled: bool,
    /// How long the preview keeps cards revealed.
    pub preview_seconds: f64,

    /// Delay before a mismatched pair flips back down.
    pub mismatch_delay_seconds: f64,

    /// Delay between a win and the scheduled restart.
    pub win_restart_delay_seconds: f64,
    /// Delay between a defeat and the scheduled restart.
    pub defeat_restart_delay_seconds: f64,

    /// Score awarded per match, multiplied by the current combo.
    pub match_base: u32,
    /// Score removed per mismatch (floored at zero).
    pub mismatch_penalty: u32,
    /// One-time bonus added when the final pair is matched.
    pub win_bonus: u32,

    /// Persist a snapshot on every score/attempts change.
    pub autosave: bool,
    /// Resume from a compatible snapshot when the session is created.
    pub load_on_start: bool,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_tries: 10,
            preview_enabled: true,
            preview_seconds: 1.0,
            mismatch_delay_seconds: 0.8,
            win_restart_delay_seconds: 3.0,
            defeat_restart_delay_seconds: 3.0,
            match_base: 100,
            mismatch_penalty: 20,
            win_bonus: 250,
            autosave: true,
            load_on_start: true,
        }
    }
}

impl GameRules {
    /// Create rules with the default tuning.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the mismatch budget (builder pattern).
    #[must_use]
    pub fn with_max_tries(mut self, max_tries: u32) -> Self {
        self.max_tries = max_tries;
        self
    }

    /// Enable or disable the opening preview (builder pattern).
    #[must_use]
    pub fn with_preview(mut self, enabled: bool, seconds: f64) -> Self {
        self.preview_enabled = enabled;
        self.preview_seconds = seconds;
        self
    }

    /// Set the mismatch flip-back delay (builder pattern).
    #[must_use]
    pub fn with_mismatch_delay(mut self, seconds: f64) -> Self {
        self.mismatch_delay_seconds = seconds;
        self
    }

    /// Set the post-game restart delays (builder pattern).
    #[must_use]
    pub fn with_restart_delays(mut self, win_seconds: f64, defeat_seconds: f64) -> Self {
        self.win_restart_delay_seconds = win_seconds;
        self.defeat_restart_delay_seconds = defeat_seconds;
        self
    }

    /// Set the scoring constants (builder pattern).
    #[must_use]
    pub fn with_scoring(mut self, match_base: u32, mismatch_penalty: u32, win_bonus: u32) -> Self {
        self.match_base = match_base;
        self.mismatch_penalty = mismatch_penalty;
        self.win_bonus = win_bonus;
        self
    }

    /// Enable or disable autosave (builder pattern).
    #[must_use]
    pub fn with_autosave(mut self, autosave: bool) -> Self {
        self.autosave = autosave;
        self
    }

    /// Enable or disable resume-on-start (builder pattern).
    #[must_use]
    pub fn with_load_on_start(mut self, load_on_start: bool) -> Self {
        self.load_on_start = load_on_start;
        self
    }

    /// Check that every delay is finite and non-negative.
    pub fn validate(&self) -> Result<(), EngineError> {
        let delays = [
            ("preview_seconds", self.preview_seconds),
            ("mismatch_delay_seconds", self.mismatch_delay_seconds),
            ("win_restart_delay_seconds", self.win_restart_delay_seconds),
            (
                "defeat_restart_delay_seconds",
                self.defeat_restart_delay_seconds,
            ),
        ];
        for (name, value) in delays {
            if !value.is_finite() || value < 0.0 {
                return Err(EngineError::InvalidRules {
                    reason: format!("{name} must be finite and >= 0, got {value}"),
                });
            }
        }
        Ok(())
    }
}
