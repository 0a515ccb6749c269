use std::fmt;

use crate::grid::Direction;
use crate::tiles::TileId;

/// Structured errors returned by ruleset loading, wave accessors, and the
/// solve driver.
///
/// A contradicted or exhausted solve is *not* an error: both are ordinary
/// terminal outcomes reported through [`crate::solve::SolveResult`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WfcError {
    /// The ruleset has no tiles.
    EmptyRuleset,
    /// More tiles than the possibility-set encoding can hold.
    TooManyTiles { count: usize, max: usize },
    /// A permission list references a tile id outside the ruleset.
    InvalidRule {
        tile: TileId,
        direction: Direction,
        neighbor: TileId,
        tile_count: usize,
    },
    /// Grid dimensions describing zero cells.
    InvalidDimensions { rows: usize, cols: usize },
    /// An operation that needs an initialized wave ran before `initialize`.
    Uninitialized,
    /// Checked access outside the grid.
    OutOfRange { index: usize, len: usize },
    /// A collapse was requested on a cell with no remaining options.
    NoPossibilities { index: usize },
    /// A rule file could not be read.
    Io { path: String, error: String },
}

impl fmt::Display for WfcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WfcError::EmptyRuleset => write!(f, "ruleset contains no tiles"),
            WfcError::TooManyTiles { count, max } => {
                write!(f, "ruleset has {count} tiles, more than the supported {max}")
            }
            WfcError::InvalidRule {
                tile,
                direction,
                neighbor,
                tile_count,
            } => write!(
                f,
                "tile {tile} permits unknown neighbor {neighbor} {direction} \
                 (ruleset has {tile_count} tiles)"
            ),
            WfcError::InvalidDimensions { rows, cols } => {
                write!(f, "invalid grid dimensions: {rows}x{cols}")
            }
            WfcError::Uninitialized => write!(f, "wave is not initialized"),
            WfcError::OutOfRange { index, len } => {
                write!(f, "index {index} out of range for grid of {len} cells")
            }
            WfcError::NoPossibilities { index } => {
                write!(f, "cell {index} has no remaining tile options")
            }
            WfcError::Io { path, error } => {
                write!(f, "failed to read rule file {path}: {error}")
            }
        }
    }
}

impl std::error::Error for WfcError {}
