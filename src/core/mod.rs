//! Core engine types: seats, RNG, configuration.
//!
//! These are the building blocks shared by tiles, table and turn engine.

pub mod player;
pub mod rng;
pub mod config;

pub use player::{PlayerId, PlayerMap};
pub use rng::GameRng;
pub use config::{
    ConfigError, GameConfig, GridSize, SeatKind,
    DEFAULT_HAND_SIZE, DEFAULT_MIN_MELD_LEN, MAX_PLAYERS, MIN_PLAYERS,
};
