//! Entropy-driven cell selection and randomized collapse.

use rand::Rng;

use crate::error::WfcError;
use crate::tiles::TileId;
use crate::wave::Wave;

/// The lowest-entropy uncollapsed cell, ties broken by lowest index.
///
/// Cells with emptied option sets are skipped (they belong to a recorded
/// contradiction, which the driver checks first). Returns `None` when every
/// cell is collapsed.
pub fn select_cell(wave: &Wave) -> Option<usize> {
    let mut best: Option<(usize, usize)> = None;
    for index in 0..wave.len() {
        let cell = wave.cell(index);
        if cell.is_collapsed() || cell.options().is_empty() {
            continue;
        }
        match best {
            Some((entropy, _)) if entropy <= cell.entropy() => {}
            _ => best = Some((cell.entropy(), index)),
        }
    }
    best.map(|(_, index)| index)
}

/// Fixes cell `index` to one tile drawn uniformly from its remaining
/// options, and returns the chosen tile.
pub fn collapse_cell<R: Rng + ?Sized>(
    wave: &mut Wave,
    index: usize,
    rng: &mut R,
) -> Result<TileId, WfcError> {
    let options = wave.cell(index).options();
    if options.is_empty() {
        return Err(WfcError::NoPossibilities { index });
    }

    let pick = rng.gen_range(0..options.len());
    let tile = options.iter().nth(pick).expect("draw within option count");
    wave.collapse_to(index, tile);
    Ok(tile)
}
