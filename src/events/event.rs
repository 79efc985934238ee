//! Change notifications emitted by the engine.
//!
//! Events are emitted after a command has fully applied, never for a
//! rejected command, so a listener always observes a consistent game.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Something observable changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A seat's hand grew or shrank.
    HandSizeChanged { player: PlayerId, size: usize },

    /// The turn passed to `player`.
    TurnChanged { player: PlayerId },

    /// The winner was decided, or cleared by a reset.
    WinnerChanged { winner: Option<PlayerId> },

    /// Melds on the table were added, edited, removed or committed.
    TableChanged,
}

impl GameEvent {
    /// The seat this event concerns, if any.
    #[must_use]
    pub fn player(&self) -> Option<PlayerId> {
        match self {
            GameEvent::HandSizeChanged { player, .. } | GameEvent::TurnChanged { player } => {
                Some(*player)
            }
            GameEvent::WinnerChanged { winner } => *winner,
            GameEvent::TableChanged => None,
        }
    }
}
