//! # rummy-engine
//!
//! Rules engine for tile-rummy games in the Rummikub family.
//!
//! ## Design Principles
//!
//! 1. **Engine Only**: No rendering and no input handling. Presentation
//!    layers drive the engine through command methods and subscribe to
//!    change events.
//!
//! 2. **N-Player First**: Seats are `PlayerId`s and per-seat data lives in
//!    a `PlayerMap`; nothing assumes two players.
//!
//! 3. **Commands Return Results**: A refused command leaves the game
//!    exactly as it was and says why in a `RulesError`.
//!
//! ## Architecture
//!
//! - **Tail-Only Table**: Melds grow and shrink only at their ends, and
//!   a cell between two melds on the same row can never be filled.
//!
//! - **Commit Marker**: Tiles laid this turn stay retractable until
//!   `end_turn` marks every table tile played.
//!
//! - **Persistent Data Structures**: Melds and the table use `im-rs`, so
//!   automated players can try moves on an O(1) clone of the table.
//!
//! ## Modules
//!
//! - `core`: Seats, RNG, configuration
//! - `tiles`: Tiles, hands and the stock
//! - `table`: Melds, the table and meld validation
//! - `events`: Change notifications
//! - `rules`: The `Game` aggregate and turn engine
//! - `players`: Automated seats
//! - `error`: Command errors

pub mod core;
pub mod tiles;
pub mod table;
pub mod events;
pub mod rules;
pub mod players;
pub mod error;

// Re-export commonly used types
pub use crate::core::{
    ConfigError, GameConfig, GameRng, GridSize, PlayerId, PlayerMap, SeatKind,
};

pub use crate::tiles::{Colour, Hand, Stock, Tile};

pub use crate::table::{Meld, MeldValidator, MinLength, Table};

pub use crate::events::{EventBus, GameEvent, ListenerId};

pub use crate::rules::{Game, TurnOutcome};

pub use crate::players::{AutomatedPlayer, Roster, RunPlayer};

pub use crate::error::{PlacementReason, RulesError};
