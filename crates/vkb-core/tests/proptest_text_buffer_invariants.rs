//! Property-based invariant tests for caret editing.
//!
//! 1. Any sequence of edits keeps the caret on a character boundary.
//! 2. Inserting a key and deleting it restores the buffer.
//! 3. A caret step right then left returns to the start position.
//! 4. Deleting everything from the end empties the buffer.
//! 5. Lead-byte unit splitting agrees with `char_indices`.

use proptest::prelude::*;
use vkb_core::key_grid::{DEFAULT_BACKSPACE_INDEX, KeyGrid};
use vkb_core::text_buffer::{CaretDirection, TextBuffer};
use vkb_core::utf8;

// ── Helpers ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Edit {
    Key { set: usize, index: usize },
    Backspace,
    Left,
    Right,
}

fn edit() -> impl Strategy<Value = Edit> {
    prop_oneof![
        (0usize..2, 0usize..52)
            .prop_filter("backspace cell deletes instead of typing", |(_, index)| {
                *index != DEFAULT_BACKSPACE_INDEX
            })
            .prop_map(|(set, index)| Edit::Key { set, index }),
        Just(Edit::Backspace),
        Just(Edit::Left),
        Just(Edit::Right),
    ]
}

fn apply(buffer: &mut TextBuffer, grid: &KeyGrid, edit: &Edit) {
    match *edit {
        Edit::Key { set, index } => {
            buffer.insert_key(grid, set, index).unwrap();
        }
        Edit::Backspace => {
            buffer.delete_before_caret();
        }
        Edit::Left => {
            buffer.move_caret(CaretDirection::Left);
        }
        Edit::Right => {
            buffer.move_caret(CaretDirection::Right);
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 1. Caret stays on a boundary
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn caret_stays_on_char_boundary(
        initial in "\\PC{0,12}",
        edits in proptest::collection::vec(edit(), 0..64),
    ) {
        let grid = KeyGrid::default();
        let mut buffer = TextBuffer::new(initial);
        for edit in &edits {
            apply(&mut buffer, &grid, edit);
            prop_assert!(buffer.caret() <= buffer.len());
            prop_assert!(
                buffer.content().is_char_boundary(buffer.caret()),
                "caret {} inside a codepoint of {:?} after {:?}",
                buffer.caret(), buffer.content(), edit
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. Insert then delete is the identity
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn insert_then_delete_restores(
        initial in "\\PC{0,12}",
        lefts in 0usize..12,
        set in 0usize..2,
        index in 0usize..52,
    ) {
        prop_assume!(index != DEFAULT_BACKSPACE_INDEX);
        let grid = KeyGrid::default();
        let mut buffer = TextBuffer::new(initial);
        for _ in 0..lefts {
            buffer.move_caret(CaretDirection::Left);
        }
        let before = buffer.clone();

        buffer.insert_key(&grid, set, index).unwrap();
        let removed = buffer.delete_before_caret();

        prop_assert!(removed.is_some());
        prop_assert_eq!(buffer, before);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. Right then Left round-trips
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn caret_right_then_left_round_trips(
        initial in "\\PC{1,16}",
        lefts in 1usize..16,
    ) {
        let mut buffer = TextBuffer::new(initial);
        for _ in 0..lefts {
            buffer.move_caret(CaretDirection::Left);
        }
        prop_assume!(buffer.caret() < buffer.len());
        let start = buffer.caret();

        buffer.move_caret(CaretDirection::Right);
        prop_assert!(buffer.caret() > start);
        buffer.move_caret(CaretDirection::Left);
        prop_assert_eq!(buffer.caret(), start);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. Backspace from the end drains the buffer one char at a time
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn backspace_drains_one_char_per_call(initial in "\\PC{0,16}") {
        let chars = initial.chars().count();
        let mut buffer = TextBuffer::new(initial);
        for remaining in (0..chars).rev() {
            prop_assert!(buffer.delete_before_caret().is_some());
            prop_assert_eq!(buffer.char_count(), remaining);
        }
        prop_assert!(buffer.is_empty());
        prop_assert!(buffer.delete_before_caret().is_none());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Unit splitting matches the standard library
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn units_match_char_indices(text in "\\PC{0,24}") {
        let ours: Vec<(usize, &str)> = utf8::units(&text).collect();
        let std: Vec<(usize, &str)> = text
            .char_indices()
            .map(|(offset, ch)| (offset, &text[offset..offset + ch.len_utf8()]))
            .collect();
        prop_assert_eq!(ours, std);
    }
}
