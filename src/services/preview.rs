//! Opening preview: show every card, then hide them again.
//!
//! `start` force-flips every `FaceDown` card up through the privileged
//! flip path (bypassing the player-facing request route) and schedules a
//! single delayed end. `finish` sends every still-`FaceUp` card back down
//! through the canonical force-flip-down and publishes `PreviewEnded`.
//! The orchestrator suppresses ordinary flip handling while the preview
//! is active.

use crate::core::{BoardState, CardState};
use crate::events::GameEvent;
use crate::runtime::{DelayedAction, DelayedRunner};

use super::flip::FlipService;

/// Timed show-all-then-hide sequence at game start.
#[derive(Clone, Debug)]
pub struct PreviewService {
    seconds: f64,
}

impl PreviewService {
    /// Create a preview of the given duration.
    #[must_use]
    pub fn new(seconds: f64) -> Self {
        Self { seconds }
    }

    /// Reveal every face-down card and schedule the hide.
    pub fn start(
        &self,
        board: &mut BoardState,
        now: f64,
        runner: &mut DelayedRunner,
        generation: u64,
        out: &mut Vec<GameEvent>,
    ) {
        for card in board.card_ids().collect::<Vec<_>>() {
            if board.state(card) == CardState::FaceDown {
                FlipService::try_flip_up(board, card, out);
            }
        }

        runner.schedule(now + self.seconds, DelayedAction::EndPreview, generation);
    }

    /// Hide every still-revealed card and publish `PreviewEnded`.
    pub fn finish(&self, board: &mut BoardState, out: &mut Vec<GameEvent>) {
        for card in board.card_ids().collect::<Vec<_>>() {
            if board.state(card) == CardState::FaceUp {
                FlipService::force_flip_down(board, card, out);
            }
        }

        out.push(GameEvent::PreviewEnded);
    }
}
