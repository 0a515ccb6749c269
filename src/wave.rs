//! Mutable solver state: per-cell superpositions and the resolved view.
//!
//! A [`Wave`] is either making progress, fully collapsed, or contradicted
//! (some cell ran out of options). Contradiction is recorded in the wave
//! rather than thrown, so a failed solve leaves a well-defined state the
//! driver can report and callers can inspect.

use std::ops::Index;

use serde::{Deserialize, Serialize};

use crate::error::WfcError;
use crate::grid::{Direction, GridDims};
use crate::tiles::{Ruleset, TileId, TileSet};

/// One grid position's superposition plus cached derived state.
///
/// Invariants: `entropy == options.len()` and
/// `collapsed == (options.len() == 1)`, re-established on every change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    options: TileSet,
    entropy: usize,
    collapsed: bool,
}

impl Cell {
    fn with_options(options: TileSet) -> Cell {
        let entropy = options.len();
        Cell {
            options,
            entropy,
            collapsed: entropy == 1,
        }
    }

    #[inline]
    pub fn options(&self) -> TileSet {
        self.options
    }

    #[inline]
    pub fn entropy(&self) -> usize {
        self.entropy
    }

    #[inline]
    pub fn is_collapsed(&self) -> bool {
        self.collapsed
    }

    /// The single remaining tile, if collapsed.
    #[inline]
    pub fn tile(&self) -> Option<TileId> {
        self.options.sole()
    }
}

/// The full mutable grid of superpositions.
#[derive(Debug, Clone)]
pub struct Wave {
    dims: GridDims,
    cells: Vec<Cell>,
    contradiction: Option<usize>,
}

impl Wave {
    /// A fresh wave with every cell holding the full possibility set.
    pub fn initialize(ruleset: &Ruleset, rows: usize, cols: usize) -> Result<Wave, WfcError> {
        let len = rows
            .checked_mul(cols)
            .filter(|&n| n > 0)
            .ok_or(WfcError::InvalidDimensions { rows, cols })?;

        let full = ruleset.all_tiles();
        Ok(Wave {
            dims: GridDims::new(rows, cols),
            cells: vec![Cell::with_options(full); len],
            contradiction: None,
        })
    }

    #[inline]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Unchecked hot-path access to a cell.
    #[inline]
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Neighbor indices and directions in the canonical Up, Down, Left,
    /// Right order, off-grid directions omitted.
    #[inline]
    pub fn neighbors(&self, index: usize) -> Vec<(usize, Direction)> {
        self.dims.neighbors(index)
    }

    /// The first cell whose options emptied, if any.
    #[inline]
    pub fn contradiction(&self) -> Option<usize> {
        self.contradiction
    }

    /// Intersects cell `index`'s options with `allowed`.
    ///
    /// Returns whether the set shrank; entropy and the collapsed flag are
    /// recomputed on change. An empty result records the contradiction (the
    /// first offending index wins) and still reports a change so the caller
    /// can stop propagating.
    pub fn restrict(&mut self, index: usize, allowed: TileSet) -> bool {
        let cell = &mut self.cells[index];
        let next = cell.options.intersect(allowed);
        if next == cell.options {
            return false;
        }
        *cell = Cell::with_options(next);
        if next.is_empty() && self.contradiction.is_none() {
            self.contradiction = Some(index);
        }
        true
    }

    /// Forces cell `index` to exactly `tile` (the collapse write).
    pub fn collapse_to(&mut self, index: usize, tile: TileId) {
        self.cells[index] = Cell::with_options(TileSet::singleton(tile));
    }

    /// True iff every cell is collapsed and no contradiction is recorded.
    pub fn is_fully_collapsed(&self) -> bool {
        self.contradiction.is_none() && self.cells.iter().all(Cell::is_collapsed)
    }

    /// Snapshot of the resolved grid.
    pub fn output(&self) -> OutputGrid {
        OutputGrid {
            width: self.dims.width(),
            height: self.dims.height(),
            cells: self.cells.iter().map(Cell::tile).collect(),
        }
    }
}

/// Read-only view of the resolved grid.
///
/// Collapsed cells carry their tile id; unresolved cells are `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputGrid {
    width: usize,
    height: usize,
    cells: Vec<Option<TileId>>,
}

impl OutputGrid {
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Bounds-checked access.
    pub fn at(&self, index: usize) -> Result<Option<TileId>, WfcError> {
        self.cells
            .get(index)
            .copied()
            .ok_or(WfcError::OutOfRange {
                index,
                len: self.cells.len(),
            })
    }

    /// Forward single-pass iteration; restart by calling again.
    pub fn iter(&self) -> impl Iterator<Item = Option<TileId>> + '_ {
        self.cells.iter().copied()
    }
}

/// Unchecked hot-path access.
impl Index<usize> for OutputGrid {
    type Output = Option<TileId>;

    #[inline]
    fn index(&self, index: usize) -> &Option<TileId> {
        &self.cells[index]
    }
}

impl<'a> IntoIterator for &'a OutputGrid {
    type Item = Option<TileId>;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Option<TileId>>>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter().copied()
    }
}
