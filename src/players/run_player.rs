//! Reference automated player: lays down same-colour runs.

use rustc_hash::FxHashMap;
use tracing::debug;

use super::AutomatedPlayer;
use crate::core::PlayerId;
use crate::error::RulesError;
use crate::rules::{Game, TurnOutcome};
use crate::tiles::{Colour, Hand, Tile};

/// Finds every run of consecutive ranks in one colour that is at least
/// `min_meld_len` long, lays each on an empty row starting at column 0,
/// then ends the turn. With nothing to lay it simply ends the turn and
/// takes the penalty draw.
///
/// Each run is tried on a scratch copy of the table first and skipped if
/// it would not fit or the game's validator would reject it.
#[derive(Clone, Copy, Debug, Default)]
pub struct RunPlayer;

impl RunPlayer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Runs available in `hand`, longest first.
    #[must_use]
    pub fn find_runs(hand: &Hand, min_len: usize) -> Vec<Vec<Tile>> {
        let mut by_colour: FxHashMap<Colour, Vec<u8>> = FxHashMap::default();
        for tile in hand.iter() {
            by_colour.entry(tile.colour()).or_default().push(tile.rank());
        }

        let mut runs = Vec::new();
        for colour in Colour::ALL {
            let Some(ranks) = by_colour.get_mut(&colour) else {
                continue;
            };
            ranks.sort_unstable();
            ranks.dedup();

            let mut start = 0;
            for i in 1..=ranks.len() {
                let broken = i == ranks.len() || ranks[i] != ranks[i - 1] + 1;
                if broken {
                    if i - start >= min_len {
                        runs.push(ranks[start..i].iter().map(|&r| Tile::new(r, colour)).collect());
                    }
                    start = i;
                }
            }
        }

        runs.sort_by_key(|run: &Vec<Tile>| std::cmp::Reverse(run.len()));
        runs
    }

    fn lay_run(game: &mut Game, seat: PlayerId, run: &[Tile]) -> Result<bool, RulesError> {
        let Some(row) = game.table().first_empty_row() else {
            return Ok(false);
        };

        let mut scratch = game.table().clone();
        for (col, tile) in run.iter().enumerate() {
            if scratch.add_tile(tile.clone(), row, col).is_err() {
                return Ok(false);
            }
        }
        let fits = scratch
            .meld_at(row, 0)
            .is_some_and(|meld| game.validator().is_valid(meld));
        if !fits {
            return Ok(false);
        }

        for (col, tile) in run.iter().enumerate() {
            game.play_from_hand(seat, tile, row, col)?;
        }
        debug!(%seat, row, len = run.len(), "laid run");
        Ok(true)
    }
}

impl AutomatedPlayer for RunPlayer {
    fn take_turn(&mut self, game: &mut Game, seat: PlayerId) -> Result<TurnOutcome, RulesError> {
        let hand = game.player_hand(seat).ok_or(RulesError::UnknownPlayer(seat))?;
        let runs = Self::find_runs(hand, game.config().min_meld_len);

        for run in &runs {
            if game.winner().is_some() {
                break;
            }
            Self::lay_run(game, seat, run)?;
        }

        game.end_turn()
    }
}
