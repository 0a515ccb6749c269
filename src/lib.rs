//! Wave Function Collapse over a 2D grid with von Neumann adjacency.
//!
//! A [`tiles::Ruleset`] fixes which tiles may sit next to which; a
//! [`wave::Wave`] tracks every cell's remaining options; the driver in
//! [`solve`] repeatedly collapses the lowest-entropy cell and propagates the
//! consequences until the grid settles, contradicts, or runs out of budget.

pub mod error;
pub mod grid;
pub mod rulefile;
pub mod solve;
pub mod tiles;
pub mod wave;
