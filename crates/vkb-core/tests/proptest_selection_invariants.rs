//! Property-based invariant tests for grid navigation.
//!
//! 1. The selection never leaves `0..=ok_index` for any move sequence.
//! 2. Without wrap, Left then Right (and Right then Left) is the identity
//!    whenever the first move succeeds.
//! 3. With wrap, a full row of Right moves returns to the start cell.
//! 4. Row memories always point into their rows.

use proptest::prelude::*;
use vkb_core::key_grid::GridGeometry;
use vkb_core::selection::{Move, SelectionModel};

// ── Helpers ─────────────────────────────────────────────────────────────

fn geometry() -> impl Strategy<Value = GridGeometry> {
    (1usize..=6, 2usize..=16).prop_map(|(rows, columns)| GridGeometry::new(rows, columns).unwrap())
}

fn any_move() -> impl Strategy<Value = Move> {
    prop_oneof![
        Just(Move::Up),
        Just(Move::Down),
        Just(Move::Left),
        Just(Move::Right),
        Just(Move::RowStart),
        Just(Move::RowEnd),
    ]
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Selection stays in range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn selection_stays_in_range(
        geometry in geometry(),
        moves in proptest::collection::vec((any_move(), any::<bool>()), 0..128),
    ) {
        let mut model = SelectionModel::new(geometry);
        for (mv, wrap) in moves {
            model.apply(mv, wrap);
            prop_assert!(
                model.index() <= geometry.max_index(),
                "{:?} took the selection to {}", mv, model.index()
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Horizontal moves are inverse
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn left_right_inverse_without_wrap(geometry in geometry(), seed in any::<usize>()) {
        let start = seed % (geometry.max_index() + 1);
        let mut model = SelectionModel::new(geometry);
        model.select(start).unwrap();
        if model.move_left(false) {
            prop_assert!(model.move_right(false));
            prop_assert_eq!(model.index(), start);
        }

        let mut model = SelectionModel::new(geometry);
        model.select(start).unwrap();
        if model.move_right(false) {
            prop_assert!(model.move_left(false));
            prop_assert_eq!(model.index(), start);
        }
    }
}

proptest! {
    #[test]
    fn left_right_inverse_with_wrap(geometry in geometry(), seed in any::<usize>()) {
        let start = seed % (geometry.max_index() + 1);
        let mut model = SelectionModel::new(geometry);
        model.select(start).unwrap();
        prop_assert!(model.move_left(true));
        prop_assert!(model.move_right(true));
        prop_assert_eq!(model.index(), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Full row cycle
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn full_row_of_rights_wraps_home(geometry in geometry(), seed in any::<usize>()) {
        let start = seed % geometry.cell_count();
        let mut model = SelectionModel::new(geometry);
        model.select(start).unwrap();
        for _ in 0..geometry.columns() {
            prop_assert!(model.move_right(true));
            prop_assert_eq!(geometry.row_of(model.index()), geometry.row_of(start));
        }
        prop_assert_eq!(model.index(), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Row memories
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn row_memories_stay_in_their_rows(
        geometry in geometry(),
        moves in proptest::collection::vec((any_move(), any::<bool>()), 0..64),
    ) {
        let mut model = SelectionModel::new(geometry);
        for (mv, wrap) in moves {
            model.apply(mv, wrap);
            prop_assert!(geometry.is_top_row(model.top_memory()));
            prop_assert!(geometry.is_bottom_row(model.bottom_memory()));
        }
    }
}
