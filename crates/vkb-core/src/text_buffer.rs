#![forbid(unsafe_code)]

//! Caret editing over a UTF-8 string.
//!
//! The caret is a byte offset into the content. Every mutation moves it by
//! whole codepoints, so it always sits on a character boundary and slicing
//! at it never panics.

use crate::error::{Result, VkbError};
use crate::key_grid::KeyGrid;
use crate::utf8;

/// Direction of a caret step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaretDirection {
    Left,
    Right,
}

/// A removed unit: where it started (in bytes and characters) and its length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Removed {
    pub byte_offset: usize,
    pub char_index: usize,
    pub len: usize,
}

/// The string being composed and its caret.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TextBuffer {
    content: String,
    caret: usize,
}

impl TextBuffer {
    /// Start from `initial` with the caret at its end.
    #[must_use]
    pub fn new(initial: impl Into<String>) -> Self {
        let content = initial.into();
        let caret = content.len();
        Self { content, caret }
    }

    #[inline]
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Caret byte offset.
    #[inline]
    #[must_use]
    pub fn caret(&self) -> usize {
        self.caret
    }

    /// Caret position counted in characters.
    #[must_use]
    pub fn caret_char_index(&self) -> usize {
        self.content[..self.caret].chars().count()
    }

    #[must_use]
    pub fn char_count(&self) -> usize {
        self.content.chars().count()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Byte length of the unit starting at `offset` (1 for ASCII, 2 for the
    /// Latin-1 key-set symbols), or 0 at the end.
    #[must_use]
    pub fn codepoint_len(&self, offset: usize) -> usize {
        utf8::unit_len_at(&self.content, offset)
    }

    /// Insert `unit` at the caret and advance past it. Returns the bytes added.
    pub fn insert_at_caret(&mut self, unit: &str) -> usize {
        self.content.insert_str(self.caret, unit);
        self.caret += unit.len();
        tracing::trace!(caret = self.caret, len = self.content.len(), "insert");
        unit.len()
    }

    /// Insert the unit of grid cell `index` from key-set `set`.
    ///
    /// Fails with [`VkbError::InvalidSelection`] when `index` is not a key.
    pub fn insert_key(&mut self, grid: &KeyGrid, set: usize, index: usize) -> Result<usize> {
        let unit = grid
            .key(set, index)
            .ok_or(VkbError::InvalidSelection { index })?;
        Ok(self.insert_at_caret(unit))
    }

    /// Remove the whole unit right before the caret.
    ///
    /// Returns `None` (not handled) when the buffer is empty or the caret is
    /// at the start.
    pub fn delete_before_caret(&mut self) -> Option<Removed> {
        if self.content.is_empty() || self.caret == 0 {
            return None;
        }
        let len = utf8::unit_len_before(&self.content, self.caret);
        let start = self.caret - len;
        let char_index = self.content[..start].chars().count();
        self.content.replace_range(start..self.caret, "");
        self.caret = start;
        tracing::trace!(caret = self.caret, len = self.content.len(), "delete");
        Some(Removed {
            byte_offset: start,
            char_index,
            len,
        })
    }

    /// Step the caret one unit in `direction`.
    ///
    /// Reports handled whenever the buffer is non-empty, even when the caret
    /// is already at the boundary and does not move.
    pub fn move_caret(&mut self, direction: CaretDirection) -> bool {
        if self.content.is_empty() {
            return false;
        }
        match direction {
            CaretDirection::Left => {
                let step = utf8::unit_len_before(&self.content, self.caret);
                self.caret = self.caret.saturating_sub(step);
            }
            CaretDirection::Right => {
                let step = utf8::unit_len_at(&self.content, self.caret);
                self.caret = (self.caret + step).min(self.content.len());
            }
        }
        tracing::trace!(caret = self.caret, ?direction, "caret");
        true
    }

    /// Consume the buffer, yielding the composed text.
    #[must_use]
    pub fn into_content(self) -> String {
        self.content
    }
}
