//! Card identity and per-card runtime state.
//!
//! Every card on the board is addressed by a `CardId` (its grid index) and
//! carries a `PairId`, the identity shared by exactly two cards, which is
//! the matching condition. The mutable half of a card is its `CardState`.

use serde::{Deserialize, Serialize};

/// Index of a card on the board.
///
/// Card ids are dense: a `rows x cols` board uses ids `0..rows*cols`.
/// `Layout::validate` caps boards at `u16::MAX` cards, so every card on a
/// valid board is addressable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into board-parallel arrays.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for CardId {
    fn from(id: u16) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// Pair identity shared by exactly two cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PairId(pub u16);

impl PairId {
    /// Create a new pair ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for PairId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Pair({})", self.0)
    }
}

/// Runtime state of a single card.
///
/// Legal transitions: `FaceDown → FaceUp → {Matched | Resolving → FaceDown}`.
/// `Matched` is terminal. Only the flip and match services perform
/// transitions; everything else observes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CardState {
    /// Hidden, eligible for a flip-up.
    #[default]
    FaceDown,
    /// Revealed, awaiting pairing.
    FaceUp,
    /// Part of a resolved mismatch, waiting to flip back down.
    Resolving,
    /// Permanently paired. Terminal.
    Matched,
}

impl CardState {
    /// Check whether the card has been permanently paired.
    #[must_use]
    pub const fn is_matched(self) -> bool {
        matches!(self, CardState::Matched)
    }
}
