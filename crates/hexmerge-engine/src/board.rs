//! The board: every grid position plus an ordered index of the filled ones.
//!
//! The two views describe the same set of positions. The complete grid is
//! fixed in size and order once built; only values change. The filled index
//! is a render-order log: an association list from a synthetic key to a
//! snapshot of each non-empty cell, kept sorted descending by key so the most
//! recently filled cell comes first.

use hexmerge_topology::{hexagon, CubeCoord};

use crate::error::{EngineError, Result};

/// A grid position and its value. `0` is empty; filled values are powers of two.
///
/// On the wire this is the flat `{"x", "y", "z", "value"}` object exchanged
/// with the value-assignment service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    #[cfg_attr(feature = "serde", serde(flatten))]
    pub coord: CubeCoord,
    pub value: u32,
}

impl Cell {
    pub const fn new(coord: CubeCoord, value: u32) -> Self {
        Self { coord, value }
    }

    /// An empty cell at `coord`.
    pub const fn empty(coord: CubeCoord) -> Self {
        Self { coord, value: 0 }
    }

    #[inline]
    pub const fn is_filled(&self) -> bool {
        self.value > 0
    }
}

/// Synthetic insertion key in the filled index. Larger keys are newer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FilledKey(pub u64);

impl FilledKey {
    /// The key after this one.
    #[inline]
    pub const fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl std::fmt::Display for FilledKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Ordered record of the filled cells.
///
/// Invariants: every entry has `value > 0`, keys are unique, and entries are
/// sorted descending by key.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilledIndex {
    entries: Vec<(FilledKey, Cell)>,
}

impl FilledIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build an index from arbitrary entries, dropping empty cells and
    /// restoring descending key order.
    pub(crate) fn from_entries(mut entries: Vec<(FilledKey, Cell)>) -> Self {
        entries.retain(|(_, cell)| cell.is_filled());
        entries.sort_by(|a, b| b.0.cmp(&a.0));
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries, most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &(FilledKey, Cell)> {
        self.entries.iter()
    }

    /// Cell snapshots, most recent first.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.entries.iter().map(|(_, cell)| cell)
    }

    /// Largest key in use.
    pub fn max_key(&self) -> Option<FilledKey> {
        self.entries.first().map(|(key, _)| *key)
    }

    /// The key a newly appended entry receives: one past the largest key, or
    /// zero for an empty index.
    pub fn next_key(&self) -> FilledKey {
        self.max_key().map_or(FilledKey(0), FilledKey::next)
    }

    /// Key of the entry at `coord`, if that position is filled.
    pub fn key_of(&self, coord: CubeCoord) -> Option<FilledKey> {
        self.entries
            .iter()
            .find(|(_, cell)| cell.coord == coord)
            .map(|(key, _)| *key)
    }

    /// Insert `cell` under `key`, keeping descending order. Empty cells are ignored.
    pub(crate) fn insert(&mut self, key: FilledKey, cell: Cell) {
        if !cell.is_filled() {
            return;
        }
        let at = self.entries.partition_point(|(k, _)| *k > key);
        self.entries.insert(at, (key, cell));
    }

    /// Drop any entry at `coord`.
    pub(crate) fn remove_coord(&mut self, coord: CubeCoord) {
        self.entries.retain(|(_, cell)| cell.coord != coord);
    }
}

/// A complete game board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    radius: u32,
    cells: Vec<Cell>,
    filled: FilledIndex,
}

impl Board {
    /// An empty board covering the hexagon of `radius`.
    ///
    /// Fails with [`EngineError::InvalidRadius`] when `radius` is zero or
    /// above [`MAX_RADIUS`](hexmerge_topology::MAX_RADIUS).
    pub fn new(radius: u32) -> Result<Self> {
        let coords = hexagon(radius).map_err(|_| EngineError::InvalidRadius(radius))?;
        Ok(Self {
            radius,
            cells: coords.into_iter().map(Cell::empty).collect(),
            filled: FilledIndex::new(),
        })
    }

    pub(crate) fn from_parts(radius: u32, cells: Vec<Cell>, filled: FilledIndex) -> Self {
        Self {
            radius,
            cells,
            filled,
        }
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Every position in grid order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn filled(&self) -> &FilledIndex {
        &self.filled
    }

    /// Filled cells, most recent first.
    pub fn filled_cells(&self) -> Vec<Cell> {
        self.filled.cells().copied().collect()
    }

    /// Grid index of `coord`.
    pub fn position_of(&self, coord: CubeCoord) -> Option<usize> {
        self.cells.iter().position(|cell| cell.coord == coord)
    }

    pub fn cell(&self, coord: CubeCoord) -> Option<&Cell> {
        self.position_of(coord).map(|i| &self.cells[i])
    }

    /// Value at `coord`, or `None` off the board.
    pub fn value_at(&self, coord: CubeCoord) -> Option<u32> {
        self.cell(coord).map(|cell| cell.value)
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_filled()).count()
    }

    /// Whether every position holds a value.
    pub fn is_full(&self) -> bool {
        self.cells.iter().all(Cell::is_filled)
    }

    /// Sum of all values.
    pub fn total(&self) -> u64 {
        self.cells.iter().map(|cell| u64::from(cell.value)).sum()
    }
}
