//! A player's private rack of tiles.
//!
//! `Hand` is plain storage. Size changes become observable through the
//! `Game`, which owns every hand and emits `HandSizeChanged` after each
//! mutation it performs.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::tile::Tile;

/// Tiles held by one seat.
///
/// Inline capacity covers a full opening deal plus a couple of draws
/// before spilling to the heap.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hand {
    tiles: SmallVec<[Tile; 16]>,
}

impl Hand {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a tile.
    pub fn add_tile(&mut self, tile: Tile) {
        self.tiles.push(tile);
    }

    /// Put a tile back at a given slot (clamped to the end).
    pub fn insert_tile(&mut self, index: usize, tile: Tile) {
        let idx = index.min(self.tiles.len());
        self.tiles.insert(idx, tile);
    }

    /// Remove one tile whose face matches `tile`.
    ///
    /// Returns `None` if no such tile is held.
    pub fn remove_tile(&mut self, tile: &Tile) -> Option<Tile> {
        let pos = self.position(tile)?;
        Some(self.tiles.remove(pos))
    }

    /// Remove the tile at `index`.
    pub fn take(&mut self, index: usize) -> Option<Tile> {
        if index < self.tiles.len() {
            Some(self.tiles.remove(index))
        } else {
            None
        }
    }

    /// Slot of the first tile matching `tile`'s face.
    #[must_use]
    pub fn position(&self, tile: &Tile) -> Option<usize> {
        self.tiles.iter().position(|t| t.same_face(tile))
    }

    #[must_use]
    pub fn contains(&self, tile: &Tile) -> bool {
        self.position(tile).is_some()
    }

    /// Drop every tile.
    pub fn clear(&mut self) {
        self.tiles.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    #[must_use]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Colour;

    #[test]
    fn test_add_and_remove() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::new(1, Colour::Red));
        hand.add_tile(Tile::new(2, Colour::Red));
        assert_eq!(hand.len(), 2);

        let removed = hand.remove_tile(&Tile::new(1, Colour::Red));
        assert_eq!(removed, Some(Tile::new(1, Colour::Red)));
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::new(1, Colour::Red));

        assert_eq!(hand.remove_tile(&Tile::new(1, Colour::Blue)), None);
        assert_eq!(hand.len(), 1);
    }

    #[test]
    fn test_remove_one_of_duplicates() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::new(4, Colour::Black));
        hand.add_tile(Tile::new(4, Colour::Black));

        assert!(hand.remove_tile(&Tile::new(4, Colour::Black)).is_some());
        assert_eq!(hand.len(), 1);
        assert!(hand.contains(&Tile::new(4, Colour::Black)));
    }

    #[test]
    fn test_take_and_insert() {
        let mut hand = Hand::new();
        for rank in 1..=3 {
            hand.add_tile(Tile::new(rank, Colour::Orange));
        }

        let middle = hand.take(1).unwrap();
        assert_eq!(middle.rank(), 2);
        assert_eq!(hand.take(5), None);

        hand.insert_tile(1, middle);
        let ranks: Vec<_> = hand.iter().map(Tile::rank).collect();
        assert_eq!(ranks, vec![1, 2, 3]);
    }

    #[test]
    fn test_clear() {
        let mut hand = Hand::new();
        hand.add_tile(Tile::new(1, Colour::Red));
        hand.clear();
        assert!(hand.is_empty());
    }

    #[test]
    fn test_spills_past_inline_capacity() {
        let mut hand = Hand::new();
        for i in 0..20 {
            hand.add_tile(Tile::new(i % 13 + 1, Colour::Blue));
        }
        assert_eq!(hand.len(), 20);
    }
}
