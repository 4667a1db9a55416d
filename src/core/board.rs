//! Board state and generation.
//!
//! `BoardState` is the grid's static identity (which card pairs with which)
//! plus the per-card mutable state. It is owned by exactly one game session
//! and replaced wholesale on every new game, restart, or layout change,
//! never partially reused.
//!
//! `BoardGenerator` produces a shuffled, valid board from `(layout, seed)`.
//! The shuffle is a seeded Fisher–Yates, so the same seed always yields the
//! same permutation.

use super::card::{CardId, CardState, PairId};
use super::config::Layout;
use super::error::EngineError;
use super::rng::EngineRng;

/// The grid of cards: pair identities plus runtime state.
///
/// State transitions go through `set_state`, which is crate-private: only
/// the flip and match services mutate card state.
#[derive(Clone, Debug)]
pub struct BoardState {
    rows: u16,
    cols: u16,
    pair_ids: Vec<PairId>,
    states: Vec<CardState>,
}

impl BoardState {
    /// Reconstruct a board from explicit parts (used for snapshot restore).
    ///
    /// Validates the layout and that every pair id in `[0, total/2)` appears
    /// exactly twice.
    pub fn from_parts(rows: u16, cols: u16, pair_ids: Vec<PairId>) -> Result<Self, EngineError> {
        let layout = Layout::new(rows, cols);
        layout.validate()?;

        let total = layout.total_cards();
        if pair_ids.len() != total {
            return Err(EngineError::InvalidBoard {
                reason: format!("expected {} pair ids, got {}", total, pair_ids.len()),
            });
        }

        let pairs = total / 2;
        let mut counts = vec![0u32; pairs];
        for &pid in &pair_ids {
            let idx = pid.index_checked(pairs).ok_or_else(|| EngineError::InvalidBoard {
                reason: format!("pair id {} out of range 0..{}", pid.raw(), pairs),
            })?;
            counts[idx] += 1;
        }
        if counts.iter().any(|&c| c != 2) {
            return Err(EngineError::InvalidBoard {
                reason: "every pair id must appear exactly twice".to_string(),
            });
        }

        Ok(Self {
            rows,
            cols,
            states: vec![CardState::FaceDown; total],
            pair_ids,
        })
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> u16 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> u16 {
        self.cols
    }

    /// The layout this board was built for.
    #[must_use]
    pub fn layout(&self) -> Layout {
        Layout::new(self.rows, self.cols)
    }

    /// Total number of cards.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.pair_ids.len()
    }

    /// Check whether a card id addresses a card on this board.
    #[must_use]
    pub fn contains(&self, card: CardId) -> bool {
        card.index() < self.pair_ids.len()
    }

    /// Pair identity of a card.
    #[must_use]
    pub fn pair_id(&self, card: CardId) -> PairId {
        self.pair_ids[card.index()]
    }

    /// All pair identities in grid order.
    #[must_use]
    pub fn pair_ids(&self) -> &[PairId] {
        &self.pair_ids
    }

    /// Current state of a card.
    #[must_use]
    pub fn state(&self, card: CardId) -> CardState {
        self.states[card.index()]
    }

    /// Transition a card. Crate-private: only flip/match services call this.
    pub(crate) fn set_state(&mut self, card: CardId, state: CardState) {
        self.states[card.index()] = state;
    }

    /// Iterate all card ids in grid order.
    pub fn card_ids(&self) -> impl Iterator<Item = CardId> {
        (0..self.pair_ids.len() as u16).map(CardId::new)
    }

    /// Per-card matched flags, in grid order (snapshot capture).
    #[must_use]
    pub fn matched_flags(&self) -> Vec<bool> {
        self.states.iter().map(|s| s.is_matched()).collect()
    }

    /// Replay matched flags onto a freshly reconstructed board.
    ///
    /// Cards flagged matched become `Matched`; everything else collapses to
    /// `FaceDown` (in-flight flips are never persisted).
    pub(crate) fn apply_matched(&mut self, matched: &[bool]) {
        for (state, &flag) in self.states.iter_mut().zip(matched) {
            *state = if flag { CardState::Matched } else { CardState::FaceDown };
        }
    }

    /// Check whether every card has been matched.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.states.iter().all(|s| s.is_matched())
    }
}

impl PairId {
    /// Index into per-pair arrays, if in range.
    #[must_use]
    fn index_checked(self, pair_count: usize) -> Option<usize> {
        let idx = self.raw() as usize;
        (idx < pair_count).then_some(idx)
    }
}

/// Produces shuffled boards from `(layout, seed)`.
pub struct BoardGenerator;

impl BoardGenerator {
    /// Build a shuffled board.
    ///
    /// Lays out `total/2` pair ids twice each, then applies a seeded
    /// Fisher–Yates shuffle: for `i` from `total-1` down to `1`, swap with
    /// a uniform index in `[0, i]`. Same seed, same permutation.
    pub fn create(layout: Layout, seed: u64) -> Result<BoardState, EngineError> {
        layout.validate()?;

        let total = layout.total_cards();
        let mut pair_ids = Vec::with_capacity(total);
        for p in 0..layout.pair_count() {
            pair_ids.push(PairId::new(p as u16));
            pair_ids.push(PairId::new(p as u16));
        }

        let mut rng = EngineRng::new(seed);
        for i in (1..total).rev() {
            let j = rng.gen_index(i + 1);
            pair_ids.swap(i, j);
        }

        Ok(BoardState {
            rows: layout.rows,
            cols: layout.cols,
            states: vec![CardState::FaceDown; total],
            pair_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generator_pair_multiset() {
        let board = BoardGenerator::create(Layout::new(4, 4), 42).unwrap();
        assert_eq!(board.total_cards(), 16);

        let mut counts = vec![0u32; 8];
        for card in board.card_ids() {
            counts[board.pair_id(card).raw() as usize] += 1;
        }
        assert!(counts.iter().all(|&c| c == 2));
    }

    #[test]
    fn test_generator_deterministic() {
        let a = BoardGenerator::create(Layout::new(4, 4), 7).unwrap();
        let b = BoardGenerator::create(Layout::new(4, 4), 7).unwrap();
        assert_eq!(a.pair_ids(), b.pair_ids());
    }

    #[test]
    fn test_generator_seed_changes_permutation() {
        let a = BoardGenerator::create(Layout::new(6, 6), 1).unwrap();
        let b = BoardGenerator::create(Layout::new(6, 6), 2).unwrap();
        assert_ne!(a.pair_ids(), b.pair_ids());
    }

    #[test]
    fn test_generator_rejects_invalid_layout() {
        assert!(BoardGenerator::create(Layout::new(3, 3), 0).is_err());
        assert!(BoardGenerator::create(Layout::new(1, 4), 0).is_err());
        // Too many cards for the id space.
        assert!(BoardGenerator::create(Layout::new(256, 256), 0).is_err());
    }

    #[test]
    fn test_card_ids_cover_largest_valid_board() {
        // 255x256 = 65280 cards, the largest even total a CardId can address.
        let layout = Layout::new(255, 256);
        let board = BoardGenerator::create(layout, 0).unwrap();

        assert_eq!(board.card_ids().count(), board.total_cards());
        assert_eq!(board.matched_flags().len(), board.total_cards());

        let mut counts = vec![0u32; layout.pair_count()];
        for card in board.card_ids() {
            counts[board.pair_id(card).raw() as usize] += 1;
        }
        assert!(counts.iter().all(|&c| c == 2));
    }

    #[test]
    fn test_all_cards_start_face_down() {
        let board = BoardGenerator::create(Layout::new(2, 2), 0).unwrap();
        assert!(board.card_ids().all(|c| board.state(c) == CardState::FaceDown));
        assert!(!board.is_complete());
    }

    #[test]
    fn test_from_parts_round_trip() {
        let board = BoardGenerator::create(Layout::new(2, 3), 9).unwrap();
        let rebuilt =
            BoardState::from_parts(board.rows(), board.cols(), board.pair_ids().to_vec()).unwrap();
        assert_eq!(rebuilt.pair_ids(), board.pair_ids());
    }

    #[test]
    fn test_from_parts_rejects_bad_length() {
        let err = BoardState::from_parts(2, 2, vec![PairId::new(0); 3]);
        assert!(matches!(err, Err(EngineError::InvalidBoard { .. })));
    }

    #[test]
    fn test_from_parts_rejects_bad_multiset() {
        // Pair 0 appears three times, pair 1 once.
        let ids = vec![PairId::new(0), PairId::new(0), PairId::new(0), PairId::new(1)];
        assert!(BoardState::from_parts(2, 2, ids).is_err());

        // Pair id out of range.
        let ids = vec![PairId::new(0), PairId::new(0), PairId::new(5), PairId::new(5)];
        assert!(BoardState::from_parts(2, 2, ids).is_err());
    }

    #[test]
    fn test_apply_matched() {
        let mut board = BoardGenerator::create(Layout::new(2, 2), 0).unwrap();
        board.apply_matched(&[true, false, true, false]);
        assert_eq!(board.state(CardId::new(0)), CardState::Matched);
        assert_eq!(board.state(CardId::new(1)), CardState::FaceDown);
        assert_eq!(board.matched_flags(), vec![true, false, true, false]);
    }

    #[test]
    fn test_is_complete() {
        let mut board = BoardGenerator::create(Layout::new(2, 2), 0).unwrap();
        board.apply_matched(&[true, true, true, true]);
        assert!(board.is_complete());
    }

    #[test]
    fn test_contains() {
        let board = BoardGenerator::create(Layout::new(2, 2), 0).unwrap();
        assert!(board.contains(CardId::new(3)));
        assert!(!board.contains(CardId::new(4)));
    }
}
