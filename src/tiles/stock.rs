//! The shared face-down draw pile.
//!
//! Drawing is best-effort: an empty stock yields `None` and callers carry
//! on without a tile.

use serde::{Deserialize, Serialize};

use super::tile::{Colour, Tile, MAX_RANK};
use crate::core::GameRng;

/// Copies of each face in the standard set.
pub const COPIES_PER_FACE: usize = 2;

/// Draw pile. The top of the pile is the end of the vec.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stock {
    tiles: Vec<Tile>,
}

impl Stock {
    /// Create a stock in exactly the given order (last element drawn first).
    #[must_use]
    pub fn from_tiles(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Create the standard 104-tile set, shuffled.
    ///
    /// ```
    /// use rummy_engine::core::GameRng;
    /// use rummy_engine::tiles::Stock;
    ///
    /// let stock = Stock::standard(&mut GameRng::new(1));
    /// assert_eq!(stock.size(), 104);
    /// ```
    #[must_use]
    pub fn standard(rng: &mut GameRng) -> Self {
        let mut tiles = Vec::with_capacity(COPIES_PER_FACE * Colour::ALL.len() * MAX_RANK as usize);
        for _ in 0..COPIES_PER_FACE {
            for colour in Colour::ALL {
                for rank in 1..=MAX_RANK {
                    tiles.push(Tile::new(rank, colour));
                }
            }
        }
        rng.shuffle(&mut tiles);
        Self { tiles }
    }

    /// Draw the top tile, or `None` if the stock is exhausted.
    pub fn draw(&mut self) -> Option<Tile> {
        self.tiles.pop()
    }

    /// Put tiles back into the pile and reshuffle it.
    pub fn return_tiles(&mut self, tiles: impl IntoIterator<Item = Tile>, rng: &mut GameRng) {
        self.tiles.extend(tiles);
        rng.shuffle(&mut self.tiles);
    }

    /// Tiles remaining.
    #[must_use]
    pub fn size(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }
}
