#![forbid(unsafe_code)]

//! Key layout.
//!
//! A [`KeyGrid`] is `rows × columns` keys plus the two action slots that sit
//! below the grid. Linear indices are row-major; `rows * columns` is Cancel
//! and `rows * columns + 1` is OK:
//!
//! ```text
//!  0   1   2  ...  C-1
//!  C  C+1     ... 2C-1
//!  ...
//! [    Cancel    ][      OK      ]      (R·C, R·C+1)
//! ```
//!
//! Each key-set is a single string whose codepoints map 1:1 onto the grid
//! cells. One cell is designated as the backspace key; confirming it deletes
//! instead of typing its glyph.

use crate::error::{Result, VkbError};
use crate::utf8;

pub const DEFAULT_ROWS: usize = 4;
pub const DEFAULT_COLUMNS: usize = 13;
/// Last cell of the first row carries the `«` glyph.
pub const DEFAULT_BACKSPACE_INDEX: usize = DEFAULT_COLUMNS - 1;

/// Lowercase and uppercase layouts for a 4×13 grid.
pub const DEFAULT_KEY_SETS: [&str; 2] = [
    "1234567890-=«qwertyuiop[]`asdfghjkl;'\\©zxcvbnm,./£ñ ",
    "!@#$%^&*()_+«QWERTYUIOP{}~ASDFGHJKL:\"|®ZXCVBNM<>?¿Ñ ",
];

/// What a selection index addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Key(usize),
    Cancel,
    Ok,
}

/// Grid dimensions and the index arithmetic derived from them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    rows: usize,
    columns: usize,
}

impl GridGeometry {
    /// Both dimensions must be non-zero, and the cell count plus the two
    /// action slots must fit in `usize`.
    pub fn new(rows: usize, columns: usize) -> Result<Self> {
        if rows == 0 || columns == 0 {
            return Err(VkbError::layout(format!(
                "grid must have at least one row and column, got {rows}x{columns}"
            )));
        }
        if rows.checked_mul(columns).and_then(|n| n.checked_add(2)).is_none() {
            return Err(VkbError::layout(format!(
                "grid of {rows}x{columns} cells is too large"
            )));
        }
        Ok(Self { rows, columns })
    }

    #[inline]
    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    #[must_use]
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Number of key cells (`R·C`).
    #[inline]
    #[must_use]
    pub const fn cell_count(&self) -> usize {
        self.rows * self.columns
    }

    #[inline]
    #[must_use]
    pub const fn cancel_index(&self) -> usize {
        self.cell_count()
    }

    #[inline]
    #[must_use]
    pub const fn ok_index(&self) -> usize {
        self.cell_count() + 1
    }

    /// Largest valid selection index.
    #[inline]
    #[must_use]
    pub const fn max_index(&self) -> usize {
        self.ok_index()
    }

    #[must_use]
    pub const fn slot(&self, index: usize) -> Option<Slot> {
        if index < self.cell_count() {
            Some(Slot::Key(index))
        } else if index == self.cancel_index() {
            Some(Slot::Cancel)
        } else if index == self.ok_index() {
            Some(Slot::Ok)
        } else {
            None
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_key(&self, index: usize) -> bool {
        index < self.cell_count()
    }

    /// Row of a key cell. Only meaningful for key indices.
    #[inline]
    #[must_use]
    pub const fn row_of(&self, index: usize) -> usize {
        index / self.columns
    }

    /// Column of a key cell. Only meaningful for key indices.
    #[inline]
    #[must_use]
    pub const fn column_of(&self, index: usize) -> usize {
        index % self.columns
    }

    #[inline]
    #[must_use]
    pub const fn index_of(&self, row: usize, column: usize) -> usize {
        row * self.columns + column
    }

    #[inline]
    #[must_use]
    pub const fn is_top_row(&self, index: usize) -> bool {
        index < self.columns
    }

    #[inline]
    #[must_use]
    pub const fn is_bottom_row(&self, index: usize) -> bool {
        self.is_key(index) && index >= self.cell_count() - self.columns
    }

    /// First column of the right half, `ceil(C / 2)`. Columns at or past it
    /// pair with OK when leaving the grid vertically; the rest with Cancel.
    #[inline]
    #[must_use]
    pub const fn right_half_start(&self) -> usize {
        self.columns.div_ceil(2)
    }
}

/// A key-set string split into per-cell units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySet {
    text: String,
    /// `cell_count + 1` byte boundaries into `text`.
    bounds: Vec<usize>,
}

impl KeySet {
    fn parse(text: impl Into<String>, cells: usize) -> Result<Self> {
        let text = text.into();
        let mut bounds: Vec<usize> = utf8::units(&text).map(|(offset, _)| offset).collect();
        if bounds.len() != cells {
            return Err(VkbError::layout(format!(
                "key-set has {} keys, grid needs {cells}: {text:?}",
                bounds.len()
            )));
        }
        bounds.push(text.len());
        Ok(Self { text, bounds })
    }

    /// The UTF-8 unit typed by cell `index`.
    #[must_use]
    pub fn key(&self, index: usize) -> Option<&str> {
        let start = *self.bounds.get(index)?;
        let end = *self.bounds.get(index + 1)?;
        Some(&self.text[start..end])
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len() - 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.bounds.windows(2).map(|w| &self.text[w[0]..w[1]])
    }
}

/// Layout description as found in configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
pub struct KeyGridSpec {
    pub rows: usize,
    pub columns: usize,
    /// Defaults to the last cell of the first row.
    #[cfg_attr(feature = "serde", serde(default))]
    pub backspace_index: Option<usize>,
    pub key_sets: Vec<String>,
}

impl Default for KeyGridSpec {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            columns: DEFAULT_COLUMNS,
            backspace_index: Some(DEFAULT_BACKSPACE_INDEX),
            key_sets: DEFAULT_KEY_SETS.iter().map(|s| (*s).to_string()).collect(),
        }
    }
}

/// Immutable key layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGrid {
    geometry: GridGeometry,
    key_sets: Vec<KeySet>,
    backspace_index: usize,
}

impl KeyGrid {
    /// Build a layout, checking that every key-set fills the grid exactly.
    pub fn new<I, S>(rows: usize, columns: usize, backspace_index: usize, key_sets: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let geometry = GridGeometry::new(rows, columns)?;
        let cells = geometry.cell_count();
        if backspace_index >= cells {
            return Err(VkbError::layout(format!(
                "backspace index {backspace_index} is outside the {cells} keys"
            )));
        }

        let key_sets = key_sets
            .into_iter()
            .map(|text| KeySet::parse(text, cells))
            .collect::<Result<Vec<_>>>()?;
        if key_sets.is_empty() {
            return Err(VkbError::layout("at least one key-set is required"));
        }

        Ok(Self {
            geometry,
            key_sets,
            backspace_index,
        })
    }

    pub fn from_spec(spec: &KeyGridSpec) -> Result<Self> {
        let backspace = spec
            .backspace_index
            .unwrap_or_else(|| spec.columns.saturating_sub(1));
        Self::new(spec.rows, spec.columns, backspace, spec.key_sets.iter().cloned())
    }

    #[inline]
    #[must_use]
    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    #[inline]
    #[must_use]
    pub fn backspace_index(&self) -> usize {
        self.backspace_index
    }

    #[inline]
    #[must_use]
    pub fn key_set_count(&self) -> usize {
        self.key_sets.len()
    }

    #[must_use]
    pub fn key_set(&self, set: usize) -> Option<&KeySet> {
        self.key_sets.get(set)
    }

    /// The unit typed by `index` in key-set `set`.
    #[must_use]
    pub fn key(&self, set: usize, index: usize) -> Option<&str> {
        self.key_sets.get(set)?.key(index)
    }
}

impl Default for KeyGrid {
    fn default() -> Self {
        let key_sets = DEFAULT_KEY_SETS.iter().map(|set| KeySet {
            text: (*set).to_string(),
            bounds: utf8::units(set)
                .map(|(offset, _)| offset)
                .chain(std::iter::once(set.len()))
                .collect(),
        });
        Self {
            geometry: GridGeometry {
                rows: DEFAULT_ROWS,
                columns: DEFAULT_COLUMNS,
            },
            key_sets: key_sets.collect(),
            backspace_index: DEFAULT_BACKSPACE_INDEX,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_layout_fills_every_cell() {
        let grid = KeyGrid::default();
        let cells = grid.geometry().cell_count();
        assert_eq!(cells, 52);
        assert_eq!(grid.key_set_count(), 2);
        for set in 0..grid.key_set_count() {
            assert_eq!(grid.key_set(set).map(KeySet::len), Some(cells));
        }
        assert_eq!(Ok(grid), KeyGrid::from_spec(&KeyGridSpec::default()));
    }

    #[test]
    fn lookup_resolves_multibyte_keys() {
        let grid = KeyGrid::default();
        assert_eq!(grid.key(0, 0), Some("1"));
        assert_eq!(grid.key(0, 12), Some("«"));
        assert_eq!(grid.key(0, 13), Some("q"));
        assert_eq!(grid.key(0, 38), Some("©"));
        assert_eq!(grid.key(0, 50), Some("ñ"));
        assert_eq!(grid.key(0, 51), Some(" "));
        assert_eq!(grid.key(1, 13), Some("Q"));
        assert_eq!(grid.key(1, 50), Some("Ñ"));
        assert_eq!(grid.key(0, 52), None);
        assert_eq!(grid.key(2, 0), None);
    }

    #[test]
    fn slots_classify_indices() {
        let geometry = KeyGrid::default().geometry();
        assert_eq!(geometry.slot(0), Some(Slot::Key(0)));
        assert_eq!(geometry.slot(51), Some(Slot::Key(51)));
        assert_eq!(geometry.slot(52), Some(Slot::Cancel));
        assert_eq!(geometry.slot(53), Some(Slot::Ok));
        assert_eq!(geometry.slot(54), None);
    }

    #[test]
    fn row_predicates() {
        let geometry = GridGeometry::new(4, 13).unwrap();
        assert!(geometry.is_top_row(12));
        assert!(!geometry.is_top_row(13));
        assert!(geometry.is_bottom_row(39));
        assert!(geometry.is_bottom_row(51));
        assert!(!geometry.is_bottom_row(38));
        assert!(!geometry.is_bottom_row(52));
        assert_eq!(geometry.right_half_start(), 7);
        assert_eq!(GridGeometry::new(2, 4).unwrap().right_half_start(), 2);
    }

    #[test]
    fn short_key_set_is_rejected() {
        let err = KeyGrid::new(2, 2, 1, ["abc"]).unwrap_err();
        assert!(matches!(err, VkbError::InvalidLayout { .. }));
    }

    #[test]
    fn long_key_set_is_rejected() {
        assert!(KeyGrid::new(2, 2, 1, ["abcde"]).is_err());
    }

    #[test]
    fn multibyte_units_count_once() {
        let grid = KeyGrid::new(1, 3, 2, ["ñ©a"]).unwrap();
        assert_eq!(grid.key(0, 0), Some("ñ"));
        assert_eq!(grid.key(0, 1), Some("©"));
        assert_eq!(grid.key(0, 2), Some("a"));
    }

    #[test]
    fn backspace_outside_grid_is_rejected() {
        assert!(KeyGrid::new(1, 2, 2, ["ab"]).is_err());
    }

    #[test]
    fn empty_dimensions_and_sets_are_rejected() {
        assert!(GridGeometry::new(0, 3).is_err());
        assert!(KeyGrid::new(1, 1, 0, Vec::<String>::new()).is_err());
    }

    #[test]
    fn overflowing_dimensions_are_rejected() {
        assert!(GridGeometry::new(1 << 40, 1 << 40).is_err());
        assert!(GridGeometry::new(usize::MAX, 1).is_err());
        let err = KeyGrid::new(1 << 40, 1 << 40, 0, ["a"]).unwrap_err();
        assert!(err.to_string().contains("too large"), "{err}");
    }

    #[test]
    fn layout_backspace_defaults_to_end_of_first_row() {
        let spec = KeyGridSpec {
            rows: 1,
            columns: 3,
            backspace_index: None,
            key_sets: vec!["ab<".to_string()],
        };
        let grid = KeyGrid::from_spec(&spec).unwrap();
        assert_eq!(grid.backspace_index(), 2);
    }

    #[test]
    fn key_set_iterates_units() {
        let grid = KeyGrid::default();
        let keys: Vec<&str> = grid.key_set(0).unwrap().keys().take(13).collect();
        assert_eq!(keys.concat(), "1234567890-=«");
    }
}
