//! Tiles and the places they live off the table.
//!
//! ## Key Types
//!
//! - `Tile`: rank + colour, plus the `played` commit marker
//! - `Hand`: one seat's private tiles
//! - `Stock`: the shared draw pile
//!
//! Tiles are never created or destroyed during a game; they move between
//! the stock, hands and the table.

pub mod tile;
pub mod hand;
pub mod stock;

pub use tile::{Colour, Tile, MAX_RANK};
pub use hand::Hand;
pub use stock::{Stock, COPIES_PER_FACE};
