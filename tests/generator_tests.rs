//! Board generation properties across arbitrary valid layouts and seeds.

use proptest::prelude::*;

use pairmatch::core::{BoardGenerator, Layout};

/// Valid layouts: each dimension >= 2, even total.
fn valid_layout() -> impl Strategy<Value = Layout> {
    (2u16..=8, 2u16..=8)
        .prop_filter("even total", |(r, c)| (*r as usize * *c as usize) % 2 == 0)
        .prop_map(|(r, c)| Layout::new(r, c))
}

proptest! {
    #[test]
    fn every_pair_id_appears_exactly_twice(layout in valid_layout(), seed: u64) {
        let board = BoardGenerator::create(layout, seed).unwrap();

        let mut counts = vec![0u32; layout.pair_count()];
        for card in board.card_ids() {
            counts[board.pair_id(card).raw() as usize] += 1;
        }
        prop_assert!(counts.iter().all(|&c| c == 2));
    }

    #[test]
    fn same_seed_same_board(layout in valid_layout(), seed: u64) {
        let a = BoardGenerator::create(layout, seed).unwrap();
        let b = BoardGenerator::create(layout, seed).unwrap();
        prop_assert_eq!(a.pair_ids(), b.pair_ids());
    }

    #[test]
    fn snapshot_restores_generated_board(layout in valid_layout(), seed: u64) {
        use pairmatch::save::SaveSnapshot;

        let board = BoardGenerator::create(layout, seed).unwrap();
        let snapshot = SaveSnapshot::capture(&board, 0, 0, 10);
        prop_assert!(snapshot.is_compatible(layout));
        prop_assert_eq!(snapshot.pair_ids.len(), layout.total_cards());
    }
}
