//! Game configuration.
//!
//! A game is configured once at startup:
//! - `SeatKind`: who sits at each seat (human or automated)
//! - `GridSize`: optional bounds of the shared table
//! - `GameConfig`: combines the above with dealing and meld parameters
//!
//! The engine never infers seat kinds from seat indices; callers that gate
//! input by turn consult `GameConfig::seat_kind`.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::PlayerId;

/// Fewest seats a game may have.
pub const MIN_PLAYERS: usize = 2;

/// Most seats a game may have.
pub const MAX_PLAYERS: usize = 4;

/// Tiles dealt to each seat at the start of a game.
pub const DEFAULT_HAND_SIZE: usize = 14;

/// Shortest meld the default validator accepts.
pub const DEFAULT_MIN_MELD_LEN: usize = 3;

/// Who issues commands for a seat.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeatKind {
    /// Commands come from a local person via the presentation layer.
    #[default]
    Human,
    /// Commands come from an automated player.
    Automated,
}

/// Bounds of the table grid. Rows and columns are 0-based.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    pub rows: usize,
    pub cols: usize,
}

impl GridSize {
    #[must_use]
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Check whether a cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }
}

/// Errors raised when a configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("player count must be 2-4, got {0}")]
    PlayerCount(usize),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Complete game configuration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// One entry per seat, in turn order.
    pub seats: Vec<SeatKind>,

    /// Tiles dealt to each seat by `deal_initial_tiles`.
    pub initial_hand_size: usize,

    /// Minimum length for the default meld validator.
    pub min_meld_len: usize,

    /// Table bounds. `None` leaves the table unbounded.
    pub grid: Option<GridSize>,

    /// Seed for stock shuffling.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::for_players(MAX_PLAYERS)
    }
}

impl GameConfig {
    /// Seat 0 is human, every other seat automated.
    ///
    /// ```
    /// use rummy_engine::core::{GameConfig, PlayerId, SeatKind};
    ///
    /// let config = GameConfig::for_players(3);
    /// assert_eq!(config.player_count(), 3);
    /// assert_eq!(config.seat_kind(PlayerId::new(0)), Some(SeatKind::Human));
    /// assert_eq!(config.seat_kind(PlayerId::new(2)), Some(SeatKind::Automated));
    /// ```
    #[must_use]
    pub fn for_players(player_count: usize) -> Self {
        let seats = (0..player_count)
            .map(|i| if i == 0 { SeatKind::Human } else { SeatKind::Automated })
            .collect();
        Self::with_seats(seats)
    }

    /// Configure with an explicit seat list.
    #[must_use]
    pub fn with_seats(seats: Vec<SeatKind>) -> Self {
        Self {
            seats,
            initial_hand_size: DEFAULT_HAND_SIZE,
            min_meld_len: DEFAULT_MIN_MELD_LEN,
            grid: None,
            seed: 42,
        }
    }

    /// Set the seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Set the table bounds.
    #[must_use]
    pub fn with_grid(mut self, rows: usize, cols: usize) -> Self {
        self.grid = Some(GridSize::new(rows, cols));
        self
    }

    /// Set the minimum meld length.
    #[must_use]
    pub fn with_min_meld_len(mut self, len: usize) -> Self {
        self.min_meld_len = len;
        self
    }

    /// Set the opening hand size.
    #[must_use]
    pub fn with_initial_hand_size(mut self, size: usize) -> Self {
        self.initial_hand_size = size;
        self
    }

    /// Number of seats.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.seats.len()
    }

    /// Seat kind, or `None` for a seat outside the game.
    #[must_use]
    pub fn seat_kind(&self, player: PlayerId) -> Option<SeatKind> {
        self.seats.get(player.index()).copied()
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&self.seats.len()) {
            return Err(ConfigError::PlayerCount(self.seats.len()));
        }
        if self.min_meld_len == 0 {
            return Err(ConfigError::Validation("min_meld_len must be > 0".into()));
        }
        if let Some(grid) = self.grid {
            if grid.rows == 0 || grid.cols == 0 {
                return Err(ConfigError::Validation(
                    "grid must have at least one row and one column".into(),
                ));
            }
        }
        Ok(())
    }
}
