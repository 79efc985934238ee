//! The shared table: every meld on the board and the rules for editing it.
//!
//! ## Placement
//!
//! A tile dropped at `(row, col)` either
//! - extends a meld whose tail end is adjacent (`start_col - 1` prepends,
//!   `end_col + 1` appends),
//! - or starts a new single-tile meld when nothing in the row touches the cell.
//!
//! A cell directly between the end of one meld and the start of another is
//! refused outright: fusing two melds is not supported. Interior and
//! occupied cells are refused too.
//!
//! ## Removal
//!
//! Only the first or last tile of a meld can be lifted, and only when its
//! face matches the tile the caller names (guards against stale
//! coordinates). A meld that runs out of tiles leaves the table.
//!
//! ## Invariant
//!
//! Within a row, melds never overlap and never touch: at least one empty
//! cell separates any two of them. Accepted placements preserve this because
//! the only way to close a one-cell gap is the sandwich case.
//!
//! Without a grid, columns run up to (not including) `MAX_COL`.
//!
//! Melds are scanned linearly; a table holds tens of melds at most.

use im::Vector;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::meld::{Meld, MeldValidator};
use crate::core::GridSize;
use crate::error::{PlacementReason, RulesError};
use crate::tiles::Tile;

/// Exclusive column limit of an unbounded table. The last `usize` column
/// stays free so every meld has a cell to its right.
pub const MAX_COL: usize = usize::MAX;

/// All melds on the board.
///
/// Cloning is O(1) (persistent vectors), so automated players can try
/// placements on a scratch copy.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    melds: Vector<Meld>,
    grid: Option<GridSize>,
}

impl Table {
    /// Create an unbounded, empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty table restricted to `grid`.
    #[must_use]
    pub fn with_grid(grid: GridSize) -> Self {
        Self {
            melds: Vector::new(),
            grid: Some(grid),
        }
    }

    #[must_use]
    pub fn grid(&self) -> Option<GridSize> {
        self.grid
    }

    // === Commands ===

    /// Place `tile` at `(row, col)`.
    ///
    /// On rejection the tile comes back inside the error.
    ///
    /// ```
    /// use rummy_engine::table::Table;
    /// use rummy_engine::tiles::{Colour, Tile};
    ///
    /// let mut table = Table::new();
    /// table.add_tile(Tile::new(5, Colour::Red), 0, 4).unwrap();
    /// table.add_tile(Tile::new(4, Colour::Red), 0, 3).unwrap();
    ///
    /// let meld = table.meld_at(0, 3).unwrap();
    /// assert_eq!(meld.start_col(), 3);
    /// assert_eq!(meld.len(), 2);
    /// ```
    pub fn add_tile(&mut self, tile: Tile, row: usize, col: usize) -> Result<(), RulesError> {
        let in_bounds = match self.grid {
            Some(grid) => grid.contains(row, col),
            None => col < MAX_COL,
        };
        if !in_bounds {
            return Err(reject(tile, row, col, PlacementReason::OutOfBounds));
        }

        if self.meld_on_left_and_right(row, col) {
            return Err(reject(tile, row, col, PlacementReason::Sandwiched));
        }

        let touching = self
            .melds
            .iter()
            .position(|m| m.row() == row && col + 1 >= m.start_col() && col <= m.end_col().saturating_add(1));

        let Some(idx) = touching else {
            self.melds.push_back(Meld::new(row, col, tile));
            return Ok(());
        };

        let meld = &mut self.melds[idx];
        if col + 1 == meld.start_col() {
            meld.push_front(tile)
                .map_err(|tile| reject(tile, row, col, PlacementReason::NotTailEnd))
        } else if col == meld.end_col() + 1 {
            meld.push_back(tile);
            Ok(())
        } else {
            Err(reject(tile, row, col, PlacementReason::NotTailEnd))
        }
    }

    /// Lift the tail-end tile at `(row, col)`, which must match `tile`'s face.
    ///
    /// Returns the tile taken off the table.
    pub fn remove_tile(&mut self, tile: &Tile, row: usize, col: usize) -> Result<Tile, RulesError> {
        let found = self.melds.iter().enumerate().find_map(|(idx, meld)| {
            if meld.row() != row || meld.is_empty() {
                return None;
            }
            if col == meld.start_col() && meld.first().is_some_and(|t| t.same_face(tile)) {
                Some((idx, End::Front))
            } else if col == meld.end_col() && meld.last().is_some_and(|t| t.same_face(tile)) {
                Some((idx, End::Back))
            } else {
                None
            }
        });

        let Some((idx, end)) = found else {
            debug!(row, col, %tile, "removal rejected");
            return Err(RulesError::InvalidRemoval { row, col });
        };

        let meld = &mut self.melds[idx];
        let removed = match end {
            End::Front => meld.pop_front(),
            End::Back => meld.pop_back(),
        };
        if meld.is_empty() {
            self.melds.remove(idx);
        }

        removed.ok_or(RulesError::InvalidRemoval { row, col })
    }

    /// Mark every tile on the table as played.
    pub fn play_all(&mut self) {
        for meld in self.melds.iter_mut() {
            meld.play_all();
        }
    }

    /// Remove every meld, returning the tiles that were on the table.
    pub fn clear(&mut self) -> Vec<Tile> {
        let tiles = self.tiles().cloned().collect();
        self.melds.clear();
        tiles
    }

    // === Queries ===

    /// Number of melds.
    #[must_use]
    pub fn len(&self) -> usize {
        self.melds.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.melds.is_empty()
    }

    pub fn melds(&self) -> impl Iterator<Item = &Meld> {
        self.melds.iter()
    }

    /// Every tile on the table, meld by meld.
    pub fn tiles(&self) -> impl Iterator<Item = &Tile> {
        self.melds.iter().flat_map(Meld::iter)
    }

    #[must_use]
    pub fn tile_count(&self) -> usize {
        self.melds.iter().map(Meld::len).sum()
    }

    /// The meld covering a cell.
    #[must_use]
    pub fn meld_at(&self, row: usize, col: usize) -> Option<&Meld> {
        self.melds.iter().find(|m| m.row() == row && m.covers(col))
    }

    /// The tile in a cell.
    #[must_use]
    pub fn tile_at(&self, row: usize, col: usize) -> Option<&Tile> {
        self.meld_at(row, col).and_then(|m| m.tile_at(col))
    }

    /// Count melds the validator rejects.
    #[must_use]
    pub fn invalid_melds(&self, validator: &dyn MeldValidator) -> usize {
        self.melds.iter().filter(|m| !validator.is_valid(m)).count()
    }

    /// Are all melds legal shapes? True for an empty table.
    #[must_use]
    pub fn all_valid(&self, validator: &dyn MeldValidator) -> bool {
        self.melds.iter().all(|m| validator.is_valid(m))
    }

    /// Is any tile on the table still uncommitted?
    #[must_use]
    pub fn has_unplayed(&self) -> bool {
        self.melds.iter().any(Meld::has_unplayed)
    }

    /// First row with no melds in it, if any exists within the grid.
    #[must_use]
    pub fn first_empty_row(&self) -> Option<usize> {
        let limit = self.grid.map_or(usize::MAX, |g| g.rows);
        (0..limit).find(|&row| self.melds.iter().all(|m| m.row() != row))
    }

    /// A meld ends just left of `col` and another starts just right of it.
    fn meld_on_left_and_right(&self, row: usize, col: usize) -> bool {
        let mut left = false;
        let mut right = false;
        for meld in self.melds.iter().filter(|m| m.row() == row) {
            if meld.end_col().checked_add(1) == Some(col) {
                left = true;
            }
            if Some(meld.start_col()) == col.checked_add(1) {
                right = true;
            }
        }
        left && right
    }
}

#[derive(Clone, Copy)]
enum End {
    Front,
    Back,
}

fn reject(tile: Tile, row: usize, col: usize, reason: PlacementReason) -> RulesError {
    debug!(row, col, %tile, %reason, "placement rejected");
    RulesError::InvalidPlacement {
        tile,
        row,
        col,
        reason,
    }
}
