//! Arc-consistency constraint propagation over the wave.
//!
//! Worklist algorithm: pop a dirty cell, recompute the set of tiles its
//! current options can consistently support in each neighbor, and intersect
//! the neighbor with that support. A neighbor that shrinks is re-queued.
//! Option sets only ever shrink, so the loop reaches a fixed point in
//! bounded work; an emptied cell records a contradiction and aborts the
//! pass immediately, leaving the wave inspectable.

use std::collections::VecDeque;

use crate::tiles::Ruleset;
use crate::wave::Wave;

/// Restores local consistency after the cells in `seeds` changed.
///
/// Returns once the queue drains (local fixed point) or as soon as the wave
/// records a contradiction. Never grows any cell's option set.
pub fn propagate(ruleset: &Ruleset, wave: &mut Wave, seeds: &[usize]) {
    let n = wave.len();
    let mut queue: VecDeque<usize> = VecDeque::new();
    let mut queued = vec![false; n];

    for &seed in seeds {
        assert!(seed < n, "propagation seed {seed} out of range for {n} cells");
        if !queued[seed] {
            queued[seed] = true;
            queue.push_back(seed);
        }
    }

    while let Some(index) = queue.pop_front() {
        queued[index] = false;
        let options = wave.cell(index).options();

        for (neighbor, direction) in wave.neighbors(index) {
            let support = ruleset.consistent_neighbors(options, direction);
            if !wave.restrict(neighbor, support) {
                continue;
            }
            if wave.contradiction().is_some() {
                return;
            }
            if !queued[neighbor] {
                queued[neighbor] = true;
                queue.push_back(neighbor);
            }
        }
    }
}
