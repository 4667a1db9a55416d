//! Pair resolution state machine.
//!
//! Reacts to three events:
//! - `PairReady(a, b)`: resolve into a match (both cards `Matched`,
//!   terminal) or a mismatch (both cards `Resolving`, flip-back scheduled).
//!   Ignored unless both cards are currently `FaceUp`, which guards against
//!   stale pairs resolved by an earlier event in the same cascade.
//! - `FlipBackPairDue(a, b)`: flip both cards back down; no-op for cards
//!   that already transitioned away.
//! - `CardFlipCompleted(card, face_up=false)` on a `Resolving` card:
//!   completes the mismatch cycle, `FaceDown` again and input unlocked.
//!
//! This is the only place match payouts and mismatch penalties originate,
//! but score itself is the score service's reaction to `PairResolved`.

use crate::core::{BoardState, CardId, CardState};
use crate::events::GameEvent;
use crate::runtime::FlipBackTimer;

use super::flip::FlipService;

/// Resolves completed pairs into matches and mismatches.
#[derive(Clone, Debug)]
pub struct MatchService {
    mismatch_delay: f64,
}

impl MatchService {
    /// Create a match service with the configured flip-back delay.
    #[must_use]
    pub fn new(mismatch_delay: f64) -> Self {
        Self { mismatch_delay }
    }

    /// Resolve a completed pair.
    pub fn on_pair_ready(
        &self,
        a: CardId,
        b: CardId,
        board: &mut BoardState,
        timer: &mut FlipBackTimer,
        generation: u64,
        out: &mut Vec<GameEvent>,
    ) {
        if !board.contains(a) || !board.contains(b) {
            return;
        }
        if board.state(a) != CardState::FaceUp || board.state(b) != CardState::FaceUp {
            return;
        }

        let is_match = board.pair_id(a) == board.pair_id(b);

        if is_match {
            board.set_state(a, CardState::Matched);
            board.set_state(b, CardState::Matched);

            out.push(GameEvent::CardInteractableChanged { card: a, interactable: false });
            out.push(GameEvent::CardInteractableChanged { card: b, interactable: false });
            out.push(GameEvent::PairResolved { a, b, is_match: true });
            return;
        }

        // Mismatch: mark resolving and schedule the flip-back. Other cards
        // stay flippable in the meantime.
        board.set_state(a, CardState::Resolving);
        board.set_state(b, CardState::Resolving);

        out.push(GameEvent::CardInteractableChanged { card: a, interactable: false });
        out.push(GameEvent::CardInteractableChanged { card: b, interactable: false });
        out.push(GameEvent::PairResolved { a, b, is_match: false });

        timer.schedule(self.mismatch_delay, a, b, generation);
    }

    /// Flip a due mismatch pair back down.
    pub fn on_flip_back_due(
        &self,
        a: CardId,
        b: CardId,
        board: &mut BoardState,
        out: &mut Vec<GameEvent>,
    ) {
        FlipService::force_flip_down(board, a, out);
        FlipService::force_flip_down(board, b, out);
    }

    /// Complete the mismatch cycle once the flip-down animation finishes.
    pub fn on_flip_completed(
        &self,
        card: CardId,
        face_up: bool,
        board: &mut BoardState,
        out: &mut Vec<GameEvent>,
    ) {
        if face_up || !board.contains(card) {
            return;
        }

        if board.state(card) == CardState::Resolving {
            board.set_state(card, CardState::FaceDown);
            out.push(GameEvent::CardInteractableChanged { card, interactable: true });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardGenerator, Layout, PairId};

    fn board_and_pair() -> (BoardState, CardId, CardId, CardId) {
        // 2x2 board has two pairs; find the two cards of pair 0 and one of pair 1.
        let board = BoardGenerator::create(Layout::new(2, 2), 42).unwrap();
        let mut pair0 = Vec::new();
        let mut other = CardId::new(0);
        for card in board.card_ids() {
            if board.pair_id(card) == PairId::new(0) {
                pair0.push(card);
            } else {
                other = card;
            }
        }
        (board, pair0[0], pair0[1], other)
    }

    fn face_up(board: &mut BoardState, cards: &[CardId]) {
        for &card in cards {
            board.set_state(card, CardState::FaceUp);
        }
    }

    #[test]
    fn test_match_resolves_to_matched() {
        let (mut board, a, b, _) = board_and_pair();
        face_up(&mut board, &[a, b]);

        let matcher = MatchService::new(0.8);
        let mut timer = FlipBackTimer::new();
        let mut out = Vec::new();
        matcher.on_pair_ready(a, b, &mut board, &mut timer, 1, &mut out);

        assert_eq!(board.state(a), CardState::Matched);
        assert_eq!(board.state(b), CardState::Matched);
        assert!(timer.is_empty());
        assert_eq!(out.last(), Some(&GameEvent::PairResolved { a, b, is_match: true }));
    }

    #[test]
    fn test_mismatch_resolves_to_resolving_and_schedules() {
        let (mut board, a, _, other) = board_and_pair();
        face_up(&mut board, &[a, other]);

        let matcher = MatchService::new(0.8);
        let mut timer = FlipBackTimer::new();
        let mut out = Vec::new();
        matcher.on_pair_ready(a, other, &mut board, &mut timer, 1, &mut out);

        assert_eq!(board.state(a), CardState::Resolving);
        assert_eq!(board.state(other), CardState::Resolving);
        assert_eq!(timer.len(), 1);
        assert_eq!(
            out.last(),
            Some(&GameEvent::PairResolved { a, b: other, is_match: false })
        );
    }

    #[test]
    fn test_stale_pair_ignored() {
        let (mut board, a, b, _) = board_and_pair();
        // Only one card face up: the pair must not resolve.
        face_up(&mut board, &[a]);

        let matcher = MatchService::new(0.8);
        let mut timer = FlipBackTimer::new();
        let mut out = Vec::new();
        matcher.on_pair_ready(a, b, &mut board, &mut timer, 1, &mut out);

        assert!(out.is_empty());
        assert_eq!(board.state(a), CardState::FaceUp);
    }

    #[test]
    fn test_flip_back_due_flips_both_down() {
        let (mut board, a, _, other) = board_and_pair();
        board.set_state(a, CardState::Resolving);
        board.set_state(other, CardState::Resolving);

        let matcher = MatchService::new(0.8);
        let mut out = Vec::new();
        matcher.on_flip_back_due(a, other, &mut board, &mut out);

        // Two events per card: lock + flip start.
        assert_eq!(out.len(), 4);
        assert!(out.contains(&GameEvent::CardFlipStarted { card: a, to_face_up: false }));
        assert!(out.contains(&GameEvent::CardFlipStarted { card: other, to_face_up: false }));
    }

    #[test]
    fn test_flip_back_due_noop_after_transition() {
        let (mut board, a, b, _) = board_and_pair();
        board.set_state(a, CardState::Matched);
        board.set_state(b, CardState::Matched);

        let matcher = MatchService::new(0.8);
        let mut out = Vec::new();
        matcher.on_flip_back_due(a, b, &mut board, &mut out);
        assert!(out.is_empty());
    }

    #[test]
    fn test_flip_completed_unlocks_resolving_card() {
        let (mut board, a, _, _) = board_and_pair();
        board.set_state(a, CardState::Resolving);

        let matcher = MatchService::new(0.8);
        let mut out = Vec::new();
        matcher.on_flip_completed(a, false, &mut board, &mut out);

        assert_eq!(board.state(a), CardState::FaceDown);
        assert_eq!(
            out,
            vec![GameEvent::CardInteractableChanged { card: a, interactable: true }]
        );
    }

    #[test]
    fn test_flip_completed_face_up_ignored() {
        let (mut board, a, _, _) = board_and_pair();
        board.set_state(a, CardState::Resolving);

        let matcher = MatchService::new(0.8);
        let mut out = Vec::new();
        matcher.on_flip_completed(a, true, &mut board, &mut out);

        assert_eq!(board.state(a), CardState::Resolving);
        assert!(out.is_empty());
    }
}
