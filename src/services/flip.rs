//! Legal single-card flip transitions.
//!
//! This is the sole gate against double-flips and flips of matched cards:
//! an attempt from an ineligible state returns `false` and changes nothing.
//! Emitted events are pushed onto `out` in order (the interactable lock
//! first, then the flip start) for the caller to publish.
//!
//! `force_flip_down` is the privileged entry the preview uses to bypass the
//! player-facing request path. It is deliberately a separate operation, not
//! a flag on `try_flip_down`, so the two call paths stay auditable apart.

use crate::core::{BoardState, CardId, CardState};
use crate::events::GameEvent;

/// Flip-up/flip-down transitions on the active board.
pub struct FlipService;

impl FlipService {
    /// Flip a card face up. Succeeds only from `FaceDown`.
    pub fn try_flip_up(board: &mut BoardState, card: CardId, out: &mut Vec<GameEvent>) -> bool {
        if !board.contains(card) || board.state(card) != CardState::FaceDown {
            return false;
        }

        board.set_state(card, CardState::FaceUp);

        // Lock only this card while its animation plays.
        out.push(GameEvent::CardInteractableChanged {
            card,
            interactable: false,
        });
        out.push(GameEvent::CardFlipStarted {
            card,
            to_face_up: true,
        });
        true
    }

    /// Flip a card back down. Succeeds only from `Resolving`.
    pub fn try_flip_down(board: &mut BoardState, card: CardId, out: &mut Vec<GameEvent>) -> bool {
        if !board.contains(card) || board.state(card) != CardState::Resolving {
            return false;
        }

        out.push(GameEvent::CardInteractableChanged {
            card,
            interactable: false,
        });
        out.push(GameEvent::CardFlipStarted {
            card,
            to_face_up: false,
        });
        true
    }

    /// Canonical forced flip-down: a `FaceUp` card enters `Resolving`
    /// first, then flips down. Already-`Resolving` cards flip down as-is;
    /// anything else is a no-op.
    ///
    /// Both the mismatch flip-back and the preview teardown go through
    /// here, so the two paths share one state-transition order.
    pub fn force_flip_down(board: &mut BoardState, card: CardId, out: &mut Vec<GameEvent>) -> bool {
        if !board.contains(card) {
            return false;
        }
        if board.state(card) == CardState::FaceUp {
            board.set_state(card, CardState::Resolving);
        }
        Self::try_flip_down(board, card, out)
    }
}
