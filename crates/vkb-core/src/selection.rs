#![forbid(unsafe_code)]

//! Selection over the key grid and the Cancel/OK row.
//!
//! # Movement rules
//!
//! - **Up** from the action row returns to the remembered bottom-row cell.
//!   From the top row it wraps (when allowed) to Cancel or OK depending on
//!   which half of the row the column falls in.
//! - **Down** mirrors Up: the bottom row drops onto Cancel/OK, and the
//!   action row wraps (when allowed) to the remembered top-row cell.
//! - **Left/Right** walk the row and wrap between its ends when allowed.
//!   Cancel sits left of OK; stepping outward from either one wraps to the
//!   other, so the pair forms a two-element cycle.
//! - **Row start/end** jump to the first/last column. On the action row
//!   they select Cancel/OK respectively.
//!
//! Whenever the selection lands in the top or bottom grid row the cell is
//! remembered, so vertical wraps come back to the same column instead of
//! column 0.

use crate::error::{Result, VkbError};
use crate::key_grid::{GridGeometry, Slot};

/// A navigation primitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
    RowStart,
    RowEnd,
}

/// Current selection index plus the row memories.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionModel {
    geometry: GridGeometry,
    index: usize,
    /// Last cell selected in the top row.
    top_memory: usize,
    /// Last cell selected in the bottom row.
    bottom_memory: usize,
}

impl SelectionModel {
    /// Start on cell 0.
    #[must_use]
    pub fn new(geometry: GridGeometry) -> Self {
        Self {
            geometry,
            index: 0,
            top_memory: 0,
            bottom_memory: geometry.cell_count() - 1,
        }
    }

    #[inline]
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    #[must_use]
    pub fn slot(&self) -> Slot {
        // The index never leaves `0..=ok_index`.
        self.geometry.slot(self.index).unwrap_or(Slot::Ok)
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    #[must_use]
    pub fn top_memory(&self) -> usize {
        self.top_memory
    }

    #[must_use]
    pub fn bottom_memory(&self) -> usize {
        self.bottom_memory
    }

    /// Place the selection directly.
    pub fn select(&mut self, index: usize) -> Result<()> {
        if index > self.geometry.max_index() {
            return Err(VkbError::InvalidSelection { index });
        }
        self.index = index;
        self.remember();
        Ok(())
    }

    /// Apply a move. Returns `true` if the selection changed.
    pub fn apply(&mut self, mv: Move, wrap: bool) -> bool {
        let from = self.index;
        let target = match mv {
            Move::Up => self.up_target(wrap),
            Move::Down => self.down_target(wrap),
            Move::Left => self.left_target(wrap),
            Move::Right => self.right_target(wrap),
            Move::RowStart => Some(self.row_start_target()),
            Move::RowEnd => Some(self.row_end_target()),
        };
        let Some(to) = target else {
            return false;
        };
        self.index = to;
        self.remember();
        if from != to {
            tracing::debug!(?mv, from, to, wrap, "selection moved");
        }
        from != to
    }

    pub fn move_up(&mut self, wrap: bool) -> bool {
        self.apply(Move::Up, wrap)
    }

    pub fn move_down(&mut self, wrap: bool) -> bool {
        self.apply(Move::Down, wrap)
    }

    pub fn move_left(&mut self, wrap: bool) -> bool {
        self.apply(Move::Left, wrap)
    }

    pub fn move_right(&mut self, wrap: bool) -> bool {
        self.apply(Move::Right, wrap)
    }

    pub fn jump_row_start(&mut self) -> bool {
        self.apply(Move::RowStart, true)
    }

    pub fn jump_row_end(&mut self) -> bool {
        self.apply(Move::RowEnd, true)
    }

    fn remember(&mut self) {
        let g = self.geometry;
        if g.is_top_row(self.index) {
            self.top_memory = self.index;
        }
        if g.is_bottom_row(self.index) {
            self.bottom_memory = self.index;
        }
    }

    /// Cancel or OK, by the half of the row `column` sits in.
    fn action_for_column(&self, column: usize) -> usize {
        let g = self.geometry;
        if column >= g.right_half_start() {
            g.ok_index()
        } else {
            g.cancel_index()
        }
    }

    fn up_target(&mut self, wrap: bool) -> Option<usize> {
        let g = self.geometry;
        if !g.is_key(self.index) {
            return Some(self.bottom_memory);
        }
        if !g.is_top_row(self.index) {
            return Some(self.index - g.columns());
        }
        if !wrap {
            return None;
        }
        let column = g.column_of(self.index);
        self.bottom_memory = g.index_of(g.rows() - 1, column);
        Some(self.action_for_column(column))
    }

    fn down_target(&mut self, wrap: bool) -> Option<usize> {
        let g = self.geometry;
        if !g.is_key(self.index) {
            return wrap.then_some(self.top_memory);
        }
        if !g.is_bottom_row(self.index) {
            return Some(self.index + g.columns());
        }
        let column = g.column_of(self.index);
        self.top_memory = g.index_of(0, column);
        Some(self.action_for_column(column))
    }

    fn left_target(&self, wrap: bool) -> Option<usize> {
        let g = self.geometry;
        match g.slot(self.index)? {
            Slot::Ok => Some(g.cancel_index()),
            Slot::Cancel => wrap.then_some(g.ok_index()),
            Slot::Key(index) if g.column_of(index) == 0 => {
                wrap.then_some(index + g.columns() - 1)
            }
            Slot::Key(index) => Some(index - 1),
        }
    }

    fn right_target(&self, wrap: bool) -> Option<usize> {
        let g = self.geometry;
        match g.slot(self.index)? {
            Slot::Cancel => Some(g.ok_index()),
            Slot::Ok => wrap.then_some(g.cancel_index()),
            Slot::Key(index) if g.column_of(index) == g.columns() - 1 => {
                wrap.then_some(index + 1 - g.columns())
            }
            Slot::Key(index) => Some(index + 1),
        }
    }

    fn row_start_target(&self) -> usize {
        let g = self.geometry;
        match self.slot() {
            Slot::Ok | Slot::Cancel => g.cancel_index(),
            Slot::Key(index) => g.index_of(g.row_of(index), 0),
        }
    }

    fn row_end_target(&self) -> usize {
        let g = self.geometry;
        match self.slot() {
            Slot::Ok | Slot::Cancel => g.ok_index(),
            Slot::Key(index) => g.index_of(g.row_of(index), g.columns() - 1),
        }
    }
}
