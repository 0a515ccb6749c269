//! Solve driver: repeated select → collapse → propagate until the wave is
//! fully collapsed, contradicted, or out of budget.
//!
//! A [`Solver`] borrows one immutable [`Ruleset`] and exclusively owns one
//! [`Wave`] per run. Contradiction and budget exhaustion are terminal
//! [`SolveResult`] variants, not errors: the driver never continues over an
//! inconsistent wave, and callers decide whether to retry with a new seed.

pub mod collapse;
pub mod propagate;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::error::WfcError;
use crate::tiles::{Ruleset, TileId};
use crate::wave::{OutputGrid, Wave};

use self::collapse::{collapse_cell, select_cell};
use self::propagate::propagate;

/// Budget for one solve run.
///
/// One iteration is one collapse plus the propagation it triggers. Without
/// in-run backtracking a solve needs at most one iteration per cell, so the
/// default covers every grid size this crate targets; tighter budgets turn
/// long runs into [`SolveResult::Exhausted`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolveLimits {
    pub max_iterations: u64,
}

impl Default for SolveLimits {
    fn default() -> Self {
        Self {
            max_iterations: 1_000_000,
        }
    }
}

impl SolveLimits {
    #[inline]
    pub fn with_max_iterations(max_iterations: u64) -> Self {
        Self { max_iterations }
    }
}

/// Terminal result of one solve run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SolveResult {
    /// Every cell collapsed to a single tile.
    Solved(OutputGrid),
    /// Some cell ran out of options; `index` is the first offender.
    Contradicted { index: usize },
    /// The iteration budget ran out before the wave settled.
    Exhausted { iterations: u64 },
}

/// Orchestrates solve runs over a shared immutable ruleset.
///
/// State machine: uninitialized until [`Solver::initialize`], then ready;
/// [`Solver::run`] drives the wave to one of the [`SolveResult`] terminals.
/// Re-initializing discards all state from a prior run.
pub struct Solver<'r> {
    ruleset: &'r Ruleset,
    wave: Option<Wave>,
}

impl<'r> Solver<'r> {
    pub fn new(ruleset: &'r Ruleset) -> Solver<'r> {
        Solver {
            ruleset,
            wave: None,
        }
    }

    /// Allocates a fresh wave with every cell at the full possibility set.
    pub fn initialize(&mut self, rows: usize, cols: usize) -> Result<(), WfcError> {
        self.wave = Some(Wave::initialize(self.ruleset, rows, cols)?);
        Ok(())
    }

    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.wave.is_some()
    }

    /// Number of cells; 0 before initialization.
    #[inline]
    pub fn size(&self) -> usize {
        self.wave.as_ref().map_or(0, Wave::len)
    }

    #[inline]
    pub fn ruleset(&self) -> &'r Ruleset {
        self.ruleset
    }

    /// The current wave, if initialized.
    #[inline]
    pub fn wave(&self) -> Option<&Wave> {
        self.wave.as_ref()
    }

    /// Bounds-checked read of one cell's resolution.
    ///
    /// `None` means the cell is still unresolved (superposed or emptied).
    pub fn at(&self, index: usize) -> Result<Option<TileId>, WfcError> {
        let wave = self.wave.as_ref().ok_or(WfcError::Uninitialized)?;
        if index >= wave.len() {
            return Err(WfcError::OutOfRange {
                index,
                len: wave.len(),
            });
        }
        Ok(wave.cell(index).tile())
    }

    /// Neighbor indices of `index` in Up, Down, Left, Right order, off-grid
    /// directions omitted.
    pub fn neighbors(&self, index: usize) -> Result<Vec<usize>, WfcError> {
        let wave = self.wave.as_ref().ok_or(WfcError::Uninitialized)?;
        if index >= wave.len() {
            return Err(WfcError::OutOfRange {
                index,
                len: wave.len(),
            });
        }
        Ok(wave.dims().neighbor_indices(index))
    }

    /// Snapshot of the resolved grid in its current state.
    pub fn output(&self) -> Result<OutputGrid, WfcError> {
        let wave = self.wave.as_ref().ok_or(WfcError::Uninitialized)?;
        Ok(wave.output())
    }

    /// Runs to a terminal result with a generator seeded from `seed`.
    ///
    /// Same ruleset, dimensions, and seed produce the same result.
    pub fn run(&mut self, seed: u64, limits: SolveLimits) -> Result<SolveResult, WfcError> {
        let mut rng = StdRng::seed_from_u64(seed);
        self.run_with_rng(&mut rng, limits)
    }

    /// Runs to a terminal result with a caller-owned generator.
    pub fn run_with_rng<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        limits: SolveLimits,
    ) -> Result<SolveResult, WfcError> {
        let wave = self.wave.as_mut().ok_or(WfcError::Uninitialized)?;

        let mut iterations: u64 = 0;
        loop {
            if let Some(index) = wave.contradiction() {
                return Ok(SolveResult::Contradicted { index });
            }
            if wave.is_fully_collapsed() {
                return Ok(SolveResult::Solved(wave.output()));
            }
            let Some(index) = select_cell(wave) else {
                // No selectable cell and no contradiction: everything is
                // collapsed already.
                return Ok(SolveResult::Solved(wave.output()));
            };
            if iterations == limits.max_iterations {
                return Ok(SolveResult::Exhausted { iterations });
            }
            iterations += 1;

            collapse_cell(wave, index, rng)?;
            propagate(self.ruleset, wave, &[index]);
        }
    }

    /// Reinitializes and reruns with seeds derived from `seed` until a run
    /// solves or `attempts` runs out; returns the last terminal result.
    ///
    /// This is the packaged alternative to in-run backtracking: each attempt
    /// restarts from a fresh wave with the next seed.
    pub fn run_with_restarts(
        &mut self,
        seed: u64,
        limits: SolveLimits,
        attempts: u32,
    ) -> Result<SolveResult, WfcError> {
        let wave = self.wave.as_ref().ok_or(WfcError::Uninitialized)?;
        let (rows, cols) = (wave.dims().height(), wave.dims().width());

        let mut last = SolveResult::Exhausted { iterations: 0 };
        for attempt in 0..attempts.max(1) {
            self.initialize(rows, cols)?;
            last = self.run(seed.wrapping_add(u64::from(attempt)), limits)?;
            if matches!(last, SolveResult::Solved(_)) {
                return Ok(last);
            }
        }
        Ok(last)
    }
}
