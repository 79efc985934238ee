//! Tiles: immutable face plus the mutable "played" marker.
//!
//! Two physical tiles may share a face (the standard set has two copies of
//! every face), so matching is always by `(rank, colour)`, never by
//! identity.

use serde::{Deserialize, Serialize};

/// Highest rank in the standard set.
pub const MAX_RANK: u8 = 13;

/// Tile colour.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Colour {
    Red,
    Blue,
    Black,
    Orange,
}

impl Colour {
    /// Every colour, in a stable order.
    pub const ALL: [Colour; 4] = [Colour::Red, Colour::Blue, Colour::Black, Colour::Orange];
}

impl std::fmt::Display for Colour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Colour::Red => "Red",
            Colour::Blue => "Blue",
            Colour::Black => "Black",
            Colour::Orange => "Orange",
        };
        f.write_str(name)
    }
}

/// A single tile.
///
/// `rank` and `colour` never change after creation. `played` starts false
/// and is set by the turn-commit step; nothing ever clears it.
///
/// ```
/// use rummy_engine::tiles::{Colour, Tile};
///
/// let mut tile = Tile::new(7, Colour::Blue);
/// assert!(!tile.is_played());
///
/// tile.play();
/// assert!(tile.is_played());
/// assert!(tile.same_face(&Tile::new(7, Colour::Blue)));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Tile {
    rank: u8,
    colour: Colour,
    played: bool,
}

impl Tile {
    /// Create a fresh, unplayed tile.
    #[must_use]
    pub const fn new(rank: u8, colour: Colour) -> Self {
        Self {
            rank,
            colour,
            played: false,
        }
    }

    #[must_use]
    pub const fn rank(&self) -> u8 {
        self.rank
    }

    #[must_use]
    pub const fn colour(&self) -> Colour {
        self.colour
    }

    /// Was this tile committed to the table in an earlier turn?
    #[must_use]
    pub const fn is_played(&self) -> bool {
        self.played
    }

    /// Mark the tile as committed.
    pub fn play(&mut self) {
        self.played = true;
    }

    /// `(rank, colour)` pair used for matching.
    #[must_use]
    pub const fn face(&self) -> (u8, Colour) {
        (self.rank, self.colour)
    }

    /// Check whether two tiles show the same rank and colour.
    #[must_use]
    pub fn same_face(&self, other: &Tile) -> bool {
        self.face() == other.face()
    }
}

impl std::fmt::Display for Tile {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.colour, self.rank)
    }
}
