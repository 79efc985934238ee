//! Turn engine.
//!
//! [`Game`] aggregates the stock, the hands and the table, and runs the
//! turn lifecycle: commit validation, the no-progress penalty draw, turn
//! rotation and win detection.

mod game;

pub use game::{Game, TurnOutcome};
