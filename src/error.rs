//! Command errors.
//!
//! Every variant is recoverable at the point of the failed command: the
//! engine state is left exactly as it was before the call.

use thiserror::Error;

use crate::core::PlayerId;
use crate::tiles::Tile;

/// Why a placement was refused.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlacementReason {
    /// The cell sits between the end of one meld and the start of another.
    Sandwiched,
    /// The cell is occupied, or would extend a meld somewhere other than
    /// one of its tail ends.
    NotTailEnd,
    /// The cell lies outside the configured grid, or at or past
    /// `MAX_COL` on an unbounded table.
    OutOfBounds,
}

impl std::fmt::Display for PlacementReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PlacementReason::Sandwiched => write!(f, "cell is sandwiched between two melds"),
            PlacementReason::NotTailEnd => write!(f, "cell is not a tail end of a meld"),
            PlacementReason::OutOfBounds => write!(f, "cell is outside the table"),
        }
    }
}

/// Errors returned by engine commands.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RulesError {
    /// Placement refused. The rejected tile is handed back to the caller.
    #[error("cannot place {tile} at ({row}, {col}): {reason}")]
    InvalidPlacement {
        tile: Tile,
        row: usize,
        col: usize,
        reason: PlacementReason,
    },

    #[error("no matching tail-end tile at ({row}, {col})")]
    InvalidRemoval { row: usize, col: usize },

    #[error("cannot end turn: {invalid_melds} meld(s) on the table are not valid")]
    TurnNotEndable { invalid_melds: usize },

    #[error("the stock is empty")]
    StockExhausted,

    #[error("{player} does not hold that tile")]
    HandTileNotFound { player: PlayerId },

    #[error("{tile} was committed in an earlier turn and cannot return to a hand")]
    TileAlreadyPlayed { tile: Tile },

    #[error("{0} is not seated in this game")]
    UnknownPlayer(PlayerId),
}
