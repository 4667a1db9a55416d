//! Persisted game state.
//!
//! A snapshot records exactly what survives a process restart: the board's
//! pair identities, which cards are matched, the score, the combo, and the
//! remaining tries. In-flight flips, pending timers, and the preview are
//! never persisted; restore collapses every unmatched card to face down.

use serde::{Deserialize, Serialize};

use crate::core::{BoardState, Layout};

/// Current snapshot format version.
///
/// Version 2 added `tries_remaining`. Older snapshots restore with a full
/// try budget instead of a deserialized zero.
pub const SNAPSHOT_VERSION: u32 = 2;

/// A point-in-time capture of resumable game state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshot {
    pub version: u32,
    pub rows: u16,
    pub cols: u16,
    /// Pair identity per card, in grid order.
    pub pair_ids: Vec<u16>,
    /// Matched flag per card, in grid order.
    pub matched: Vec<bool>,
    pub score: u32,
    pub combo: u32,
    #[serde(default)]
    pub tries_remaining: u32,
    /// Unix timestamp of the save, stamped by the save service.
    #[serde(default)]
    pub saved_at_utc: i64,
}

impl SaveSnapshot {
    /// Capture the resumable state of a running game.
    #[must_use]
    pub fn capture(board: &BoardState, score: u32, combo: u32, tries_remaining: u32) -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            rows: board.rows(),
            cols: board.cols(),
            pair_ids: board.pair_ids().iter().map(|p| p.raw()).collect(),
            matched: board.matched_flags(),
            score,
            combo,
            tries_remaining,
            saved_at_utc: 0,
        }
    }

    /// Check whether this snapshot can restore onto the given layout.
    ///
    /// Compatibility is exact: same dimensions, and both per-card arrays
    /// the full length of the grid.
    #[must_use]
    pub fn is_compatible(&self, layout: Layout) -> bool {
        let total = layout.total_cards();
        self.rows == layout.rows
            && self.cols == layout.cols
            && self.pair_ids.len() == total
            && self.matched.len() == total
    }

    /// The try budget to restore, accounting for format versions that
    /// predate `tries_remaining`.
    #[must_use]
    pub fn effective_tries(&self, max_tries: u32) -> u32 {
        if self.version < 2 {
            max_tries
        } else {
            self.tries_remaining
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{BoardGenerator, CardId, CardState};

    #[test]
    fn test_capture_reflects_board() {
        let mut board = BoardGenerator::create(Layout::new(2, 2), 7).unwrap();
        board.set_state(CardId::new(1), CardState::Matched);

        let snap = SaveSnapshot::capture(&board, 120, 1, 8);
        assert_eq!(snap.version, SNAPSHOT_VERSION);
        assert_eq!(snap.rows, 2);
        assert_eq!(snap.cols, 2);
        assert_eq!(snap.pair_ids.len(), 4);
        assert_eq!(snap.matched, vec![false, true, false, false]);
        assert_eq!(snap.score, 120);
        assert_eq!(snap.combo, 1);
        assert_eq!(snap.tries_remaining, 8);
    }

    #[test]
    fn test_compatibility_exact_layout() {
        let board = BoardGenerator::create(Layout::new(2, 3), 7).unwrap();
        let snap = SaveSnapshot::capture(&board, 0, 0, 10);

        assert!(snap.is_compatible(Layout::new(2, 3)));
        assert!(!snap.is_compatible(Layout::new(3, 2)));
        assert!(!snap.is_compatible(Layout::new(4, 4)));
    }

    #[test]
    fn test_compatibility_rejects_truncated_arrays() {
        let board = BoardGenerator::create(Layout::new(2, 2), 7).unwrap();
        let mut snap = SaveSnapshot::capture(&board, 0, 0, 10);
        snap.matched.pop();
        assert!(!snap.is_compatible(Layout::new(2, 2)));
    }

    #[test]
    fn test_effective_tries_by_version() {
        let board = BoardGenerator::create(Layout::new(2, 2), 7).unwrap();
        let mut snap = SaveSnapshot::capture(&board, 0, 0, 4);

        assert_eq!(snap.effective_tries(10), 4);

        snap.version = 1;
        assert_eq!(snap.effective_tries(10), 10);
    }

    #[test]
    fn test_version1_json_missing_tries_field() {
        // A pre-version-2 file has no tries_remaining key at all.
        let json = r#"{
            "version": 1,
            "rows": 2, "cols": 2,
            "pair_ids": [0, 1, 0, 1],
            "matched": [false, false, false, false],
            "score": 40, "combo": 0
        }"#;
        let snap: SaveSnapshot = serde_json::from_str(json).unwrap();
        assert_eq!(snap.tries_remaining, 0);
        assert_eq!(snap.effective_tries(10), 10);
    }
}
