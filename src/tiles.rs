//! Tile identities, possibility sets, and the adjacency ruleset.
//!
//! A [`Ruleset`] is an immutable table of [`Tile`]s, one per dense tile id,
//! each carrying four direction-indexed permission sets. It is built once
//! from raw [`TileSpec`]s (validated at load) and then shared read-only by
//! every wave and solver run.

use serde::{Deserialize, Serialize};

use crate::error::WfcError;
use crate::grid::Direction;

/// Dense tile identifier, `0..tile_count`.
pub type TileId = usize;

/// Upper bound on tiles per ruleset, fixed by the bitmask encoding.
pub const MAX_TILES: usize = 64;

/// A set of tile ids backed by a 64-bit mask.
///
/// Supports the operations propagation needs: membership, intersection,
/// union, cardinality, and iteration in ascending id order. Ids are kept
/// `< MAX_TILES` by ruleset validation before any set is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileSet(u64);

impl TileSet {
    pub const EMPTY: TileSet = TileSet(0);

    /// The full set `{0, .., count - 1}`.
    #[inline]
    pub fn full(count: usize) -> TileSet {
        debug_assert!(count <= MAX_TILES);
        if count == MAX_TILES {
            TileSet(u64::MAX)
        } else {
            TileSet((1u64 << count) - 1)
        }
    }

    #[inline]
    pub fn singleton(id: TileId) -> TileSet {
        debug_assert!(id < MAX_TILES);
        TileSet(1u64 << id)
    }

    #[inline]
    pub fn contains(self, id: TileId) -> bool {
        id < MAX_TILES && self.0 & (1u64 << id) != 0
    }

    #[inline]
    pub fn insert(&mut self, id: TileId) {
        debug_assert!(id < MAX_TILES);
        self.0 |= 1u64 << id;
    }

    /// Cardinality.
    #[inline]
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    #[inline]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn intersect(self, other: TileSet) -> TileSet {
        TileSet(self.0 & other.0)
    }

    #[inline]
    pub fn union(self, other: TileSet) -> TileSet {
        TileSet(self.0 | other.0)
    }

    /// The single member, if this is a singleton.
    #[inline]
    pub fn sole(self) -> Option<TileId> {
        if self.0 != 0 && self.0 & (self.0 - 1) == 0 {
            Some(self.0.trailing_zeros() as TileId)
        } else {
            None
        }
    }

    /// Member ids in ascending order.
    #[inline]
    pub fn iter(self) -> TileSetIter {
        TileSetIter(self.0)
    }
}

impl FromIterator<TileId> for TileSet {
    fn from_iter<I: IntoIterator<Item = TileId>>(iter: I) -> Self {
        let mut set = TileSet::EMPTY;
        for id in iter {
            set.insert(id);
        }
        set
    }
}

impl IntoIterator for TileSet {
    type Item = TileId;
    type IntoIter = TileSetIter;

    fn into_iter(self) -> TileSetIter {
        self.iter()
    }
}

/// Ascending-order iterator over a [`TileSet`].
#[derive(Debug, Clone)]
pub struct TileSetIter(u64);

impl Iterator for TileSetIter {
    type Item = TileId;

    #[inline]
    fn next(&mut self) -> Option<TileId> {
        if self.0 == 0 {
            return None;
        }
        let id = self.0.trailing_zeros() as TileId;
        self.0 &= self.0 - 1;
        Some(id)
    }
}

/// Raw, unvalidated tile description: per-direction permitted neighbor ids.
///
/// Produced by the rule-file parser or built by hand; turned into a
/// validated [`Ruleset`] by [`Ruleset::load`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TileSpec {
    pub up: Vec<TileId>,
    pub down: Vec<TileId>,
    pub left: Vec<TileId>,
    pub right: Vec<TileId>,
}

impl TileSpec {
    /// A spec permitting every tile of `0..count` in all four directions.
    pub fn uniform(count: usize) -> TileSpec {
        let all: Vec<TileId> = (0..count).collect();
        TileSpec {
            up: all.clone(),
            down: all.clone(),
            left: all.clone(),
            right: all,
        }
    }

    #[inline]
    pub fn ids(&self, direction: Direction) -> &[TileId] {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    #[inline]
    pub fn ids_mut(&mut self, direction: Direction) -> &mut Vec<TileId> {
        match direction {
            Direction::Up => &mut self.up,
            Direction::Down => &mut self.down,
            Direction::Left => &mut self.left,
            Direction::Right => &mut self.right,
        }
    }
}

/// One tile's validated per-direction permission sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    allowed: [TileSet; 4],
}

impl Tile {
    #[inline]
    pub fn allowed(&self, direction: Direction) -> TileSet {
        self.allowed[direction.index()]
    }
}

/// Immutable adjacency table, indexed by dense tile id.
#[derive(Debug, Clone)]
pub struct Ruleset {
    tiles: Vec<Tile>,
}

impl Ruleset {
    /// Validates `specs` and builds the ruleset.
    ///
    /// Every referenced neighbor id must be `< specs.len()`; the first
    /// violation is reported with its tile, direction, and offending id.
    pub fn load(specs: &[TileSpec]) -> Result<Ruleset, WfcError> {
        if specs.is_empty() {
            return Err(WfcError::EmptyRuleset);
        }
        if specs.len() > MAX_TILES {
            return Err(WfcError::TooManyTiles {
                count: specs.len(),
                max: MAX_TILES,
            });
        }

        let tile_count = specs.len();
        let mut tiles = Vec::with_capacity(tile_count);
        for (id, spec) in specs.iter().enumerate() {
            let mut allowed = [TileSet::EMPTY; 4];
            for direction in Direction::ALL {
                for &neighbor in spec.ids(direction) {
                    if neighbor >= tile_count {
                        return Err(WfcError::InvalidRule {
                            tile: id,
                            direction,
                            neighbor,
                            tile_count,
                        });
                    }
                    allowed[direction.index()].insert(neighbor);
                }
            }
            tiles.push(Tile { allowed });
        }

        Ok(Ruleset { tiles })
    }

    #[inline]
    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    /// The full possibility set for this ruleset.
    #[inline]
    pub fn all_tiles(&self) -> TileSet {
        TileSet::full(self.tiles.len())
    }

    /// Tiles that `tile` permits in `direction`, as declared.
    #[inline]
    pub fn permitted_neighbors(&self, tile: TileId, direction: Direction) -> TileSet {
        self.tiles[tile].allowed(direction)
    }

    /// Tiles that can consistently sit in `direction` from a cell whose
    /// remaining options are `options`.
    ///
    /// A candidate `u` survives iff some still-possible source tile `t`
    /// permits `u` in `direction` *and* `u` permits `t` back in the opposite
    /// direction. Effective adjacency is the conjunction of both tiles'
    /// declarations, so one-sided rule declarations contribute nothing.
    pub fn consistent_neighbors(&self, options: TileSet, direction: Direction) -> TileSet {
        let back = direction.opposite();
        let mut out = TileSet::EMPTY;
        for t in options {
            for u in self.permitted_neighbors(t, direction) {
                if self.permitted_neighbors(u, back).contains(t) {
                    out.insert(u);
                }
            }
        }
        out
    }
}
