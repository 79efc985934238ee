//! Melds: contiguous runs of tiles in one table row.
//!
//! A meld occupies columns `[start_col, end_col]` of its row with no gaps.
//! Tiles enter and leave only at the two tail ends, so the sequence is kept
//! in an `im::Vector` (cheap front and back edits, O(1) clone).
//!
//! Whether a meld is a *legal shape* is not decided here. The turn engine
//! asks a `MeldValidator`; `MinLength` is the stock rule.

use im::Vector;
use serde::{Deserialize, Serialize};

use crate::tiles::Tile;

/// An ordered run of tiles; left to right is ascending column.
///
/// Never empty while on the table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Meld {
    row: usize,
    start_col: usize,
    tiles: Vector<Tile>,
}

impl Meld {
    /// Start a single-tile meld at `(row, col)`.
    #[must_use]
    pub fn new(row: usize, col: usize, tile: Tile) -> Self {
        Self {
            row,
            start_col: col,
            tiles: Vector::unit(tile),
        }
    }

    #[must_use]
    pub fn row(&self) -> usize {
        self.row
    }

    /// Column of the first tile.
    #[must_use]
    pub fn start_col(&self) -> usize {
        self.start_col
    }

    /// Column of the last tile.
    ///
    /// Only meaningful while the meld is non-empty, which the table
    /// guarantees for every meld it holds.
    #[must_use]
    pub fn end_col(&self) -> usize {
        self.start_col + self.tiles.len().saturating_sub(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Does the meld occupy `col` in its row?
    #[must_use]
    pub fn covers(&self, col: usize) -> bool {
        !self.is_empty() && (self.start_col..=self.end_col()).contains(&col)
    }

    /// Tile at a table column, if the meld covers it.
    #[must_use]
    pub fn tile_at(&self, col: usize) -> Option<&Tile> {
        if self.covers(col) {
            self.tiles.get(col - self.start_col)
        } else {
            None
        }
    }

    #[must_use]
    pub fn first(&self) -> Option<&Tile> {
        self.tiles.front()
    }

    #[must_use]
    pub fn last(&self) -> Option<&Tile> {
        self.tiles.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Is any tile still uncommitted?
    #[must_use]
    pub fn has_unplayed(&self) -> bool {
        self.tiles.iter().any(|t| !t.is_played())
    }

    /// Add a tile one column to the left. The meld's start moves with it.
    ///
    /// Hands the tile back if the meld already starts at column 0.
    pub(crate) fn push_front(&mut self, tile: Tile) -> Result<(), Tile> {
        match self.start_col.checked_sub(1) {
            Some(col) => {
                self.tiles.push_front(tile);
                self.start_col = col;
                Ok(())
            }
            None => Err(tile),
        }
    }

    /// Add a tile one column to the right.
    pub(crate) fn push_back(&mut self, tile: Tile) {
        self.tiles.push_back(tile);
    }

    /// Remove the first tile; the start column shifts right by one.
    pub(crate) fn pop_front(&mut self) -> Option<Tile> {
        let tile = self.tiles.pop_front()?;
        self.start_col += 1;
        Some(tile)
    }

    pub(crate) fn pop_back(&mut self) -> Option<Tile> {
        self.tiles.pop_back()
    }

    pub(crate) fn play_all(&mut self) {
        for tile in self.tiles.iter_mut() {
            tile.play();
        }
    }
}

/// Predicate deciding whether a meld is a legal shape.
///
/// Implemented for any `Fn(&Meld) -> bool`, so callers may pass a closure.
///
/// ```
/// use rummy_engine::table::{Meld, MeldValidator, MinLength};
/// use rummy_engine::tiles::{Colour, Tile};
///
/// let meld = Meld::new(0, 0, Tile::new(1, Colour::Red));
/// assert!(!MinLength(3).is_valid(&meld));
///
/// let anything = |_: &Meld| true;
/// assert!(anything.is_valid(&meld));
/// ```
pub trait MeldValidator: Send + Sync {
    fn is_valid(&self, meld: &Meld) -> bool;
}

impl<F> MeldValidator for F
where
    F: Fn(&Meld) -> bool + Send + Sync,
{
    fn is_valid(&self, meld: &Meld) -> bool {
        self(meld)
    }
}

/// Accepts melds with at least this many tiles.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MinLength(pub usize);

impl MeldValidator for MinLength {
    fn is_valid(&self, meld: &Meld) -> bool {
        meld.len() >= self.0
    }
}
