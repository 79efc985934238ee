//! Automated seats.
//!
//! The engine never plays for anyone. A seat configured as
//! [`SeatKind::Automated`] is driven by an [`AutomatedPlayer`] that a
//! [`Roster`] invokes when that seat is to move and no winner exists yet.
//!
//! ## Key Types
//!
//! - `AutomatedPlayer`: one turn's worth of decisions for a seat
//! - `RunPlayer`: reference player that lays same-colour runs
//! - `Roster`: seat-to-player assignment plus the step driver
//!
//! [`SeatKind::Automated`]: crate::core::SeatKind::Automated

mod run_player;

pub use run_player::RunPlayer;

use tracing::debug;

use crate::core::{GameConfig, PlayerId, SeatKind};
use crate::error::RulesError;
use crate::rules::{Game, TurnOutcome};

/// Plays a full turn for one seat.
///
/// Implementations issue ordinary table commands through `game` and must
/// finish by ending the turn.
pub trait AutomatedPlayer: Send {
    fn take_turn(&mut self, game: &mut Game, seat: PlayerId) -> Result<TurnOutcome, RulesError>;
}

/// Which automated player sits at which seat.
///
/// ```
/// use rummy_engine::core::{GameConfig, SeatKind};
/// use rummy_engine::players::{Roster, RunPlayer};
/// use rummy_engine::rules::Game;
///
/// let config = GameConfig::with_seats(vec![SeatKind::Automated, SeatKind::Human]);
/// let mut roster = Roster::for_config(&config, |_| Box::new(RunPlayer::new()));
/// let mut game = Game::new(config).unwrap();
///
/// // Seat 0 is automated: it ends its turn, then the human is up.
/// assert!(roster.step(&mut game).is_some());
/// assert!(roster.step(&mut game).is_none());
/// ```
#[derive(Default)]
pub struct Roster {
    seats: Vec<(PlayerId, Box<dyn AutomatedPlayer>)>,
}

impl Roster {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seat a player from `factory` at every automated seat in `config`.
    pub fn for_config(
        config: &GameConfig,
        factory: impl Fn(PlayerId) -> Box<dyn AutomatedPlayer>,
    ) -> Self {
        let seats = PlayerId::all(config.player_count())
            .filter(|&p| config.seat_kind(p) == Some(SeatKind::Automated))
            .map(|p| (p, factory(p)))
            .collect();
        Self { seats }
    }

    /// Assign `player` to `seat`, replacing whoever sat there.
    #[must_use]
    pub fn with_player(mut self, seat: PlayerId, player: Box<dyn AutomatedPlayer>) -> Self {
        self.seats.retain(|(s, _)| *s != seat);
        self.seats.push((seat, player));
        self
    }

    #[must_use]
    pub fn is_seated(&self, seat: PlayerId) -> bool {
        self.seats.iter().any(|(s, _)| *s == seat)
    }

    /// Let the current seat's automated player move, if it has one.
    ///
    /// Returns `None` without touching the game when a winner exists, the
    /// current seat is not automated, or nobody is seated there.
    pub fn step(&mut self, game: &mut Game) -> Option<Result<TurnOutcome, RulesError>> {
        if game.winner().is_some() || !game.is_automated_players_turn() {
            return None;
        }

        let seat = game.player_turn();
        let Some((_, player)) = self.seats.iter_mut().find(|(s, _)| *s == seat) else {
            debug!(%seat, "automated seat has no player");
            return None;
        };
        Some(player.take_turn(game, seat))
    }

    /// Step until a human is up, someone wins, a player errors, or
    /// `max_turns` automated turns have been taken. Returns the outcomes.
    pub fn run(&mut self, game: &mut Game, max_turns: usize) -> Result<Vec<TurnOutcome>, RulesError> {
        let mut outcomes = Vec::new();
        while outcomes.len() < max_turns {
            match self.step(game) {
                Some(result) => outcomes.push(result?),
                None => break,
            }
        }
        Ok(outcomes)
    }
}

impl std::fmt::Debug for Roster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let seats: Vec<_> = self.seats.iter().map(|(s, _)| *s).collect();
        f.debug_struct("Roster").field("seats", &seats).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::{Colour, Stock, Tile};

    struct Passer {
        turns: usize,
    }

    impl AutomatedPlayer for Passer {
        fn take_turn(&mut self, game: &mut Game, _seat: PlayerId) -> Result<TurnOutcome, RulesError> {
            self.turns += 1;
            game.end_turn()
        }
    }

    fn all_automated(n: usize) -> GameConfig {
        GameConfig::with_seats(vec![SeatKind::Automated; n])
    }

    #[test]
    fn test_for_config_seats_only_automated() {
        let config = GameConfig::for_players(3);
        let roster = Roster::for_config(&config, |_| Box::new(RunPlayer::new()));

        assert!(!roster.is_seated(PlayerId::new(0)));
        assert!(roster.is_seated(PlayerId::new(1)));
        assert!(roster.is_seated(PlayerId::new(2)));
    }

    #[test]
    fn test_step_skips_human_seat() {
        let config = GameConfig::for_players(2);
        let mut roster = Roster::for_config(&config, |_| Box::new(Passer { turns: 0 }));
        let mut game = Game::new(config).unwrap();

        assert!(roster.step(&mut game).is_none());
        assert_eq!(game.player_turn(), PlayerId::new(0));
    }

    #[test]
    fn test_step_without_player_is_noop() {
        let config = all_automated(2);
        let mut game = Game::new(config).unwrap();
        let mut roster = Roster::new();

        assert!(roster.step(&mut game).is_none());
        assert_eq!(game.turn_number(), 1);
    }

    #[test]
    fn test_run_stops_at_max_turns() {
        let config = all_automated(3);
        let mut roster = Roster::new()
            .with_player(PlayerId::new(0), Box::new(Passer { turns: 0 }))
            .with_player(PlayerId::new(1), Box::new(Passer { turns: 0 }))
            .with_player(PlayerId::new(2), Box::new(Passer { turns: 0 }));
        let mut game = Game::new(config).unwrap();

        let outcomes = roster.run(&mut game, 7).unwrap();
        assert_eq!(outcomes.len(), 7);
        assert_eq!(game.player_turn(), PlayerId::new(1));
    }

    #[test]
    fn test_step_stops_after_winner() {
        let config = all_automated(2).with_initial_hand_size(3);
        let mut roster = Roster::for_config(&config, |_| Box::new(RunPlayer::new()));
        let mut game = Game::new(config).unwrap();
        game.set_stock(Stock::from_tiles(
            [3, 2, 1].into_iter().map(|r| Tile::new(r, Colour::Blue)).collect(),
        ));
        game.deal_initial_tiles();

        let outcome = roster.step(&mut game).unwrap().unwrap();
        assert!(!outcome.no_progress);
        assert_eq!(game.winner(), Some(PlayerId::new(0)));
        assert!(roster.step(&mut game).is_none());
    }
}
