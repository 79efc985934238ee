//! The game aggregate and turn engine.
//!
//! `Game` owns the stock, one hand per seat, the table and the turn state.
//! Every mutation goes through a command method here so the engine can
//! emit change notifications and run win detection.
//!
//! ## Turn lifecycle
//!
//! The engine always waits on the current seat to end its turn. `end_turn`:
//! 1. refuses if any meld on the table is not a legal shape (no effect);
//! 2. penalty-draws one tile for the acting seat if nothing new was left on
//!    the table (skipped silently when the stock is empty);
//! 3. commits every table tile (`played = true`);
//! 4. passes the turn to the next seat.
//!
//! ## Win detection
//!
//! Runs whenever a seat's hand size changes. A seat whose hand reaches zero
//! while every meld on the table is valid becomes the winner. The winner is
//! never replaced; only `reset_game` clears it.
//!
//! ## Seat gating
//!
//! The engine accepts table commands from anyone. Callers that route input
//! by seat consult `player_turn` and `is_automated_players_turn`.

use tracing::{debug, info, instrument};

use crate::core::{ConfigError, GameConfig, GameRng, PlayerId, PlayerMap, SeatKind};
use crate::error::RulesError;
use crate::events::{EventBus, GameEvent, ListenerId};
use crate::table::{MeldValidator, MinLength, Table};
use crate::tiles::{Hand, Stock, Tile};

/// Result of a successful `end_turn`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TurnOutcome {
    /// Seat that ended its turn.
    pub player: PlayerId,
    /// Nothing new was left on the table this turn.
    pub no_progress: bool,
    /// Tile drawn as the no-progress penalty; `None` if none was owed or
    /// the stock was empty.
    pub penalty_draw: Option<Tile>,
    /// Seat whose turn it is now.
    pub next_player: PlayerId,
}

/// A tile-rummy game session.
///
/// ## Example
///
/// ```
/// use rummy_engine::core::PlayerId;
/// use rummy_engine::rules::Game;
/// use rummy_engine::tiles::{Colour, Stock, Tile};
///
/// let mut game = Game::with_players(2).unwrap();
/// game.set_stock(Stock::from_tiles(
///     (1..=13).map(|r| Tile::new(r, Colour::Red)).collect(),
/// ));
/// game.deal_initial_tiles();
///
/// // The short stock all went to seat 0; lay down 11, 12, 13.
/// let seat = PlayerId::new(0);
/// for (col, rank) in [11, 12, 13].into_iter().enumerate() {
///     game.play_from_hand(seat, &Tile::new(rank, Colour::Red), 0, col).unwrap();
/// }
///
/// let outcome = game.end_turn().unwrap();
/// assert_eq!(outcome.next_player, PlayerId::new(1));
/// assert!(game.table().tiles().all(Tile::is_played));
/// ```
pub struct Game {
    config: GameConfig,
    validator: Box<dyn MeldValidator>,
    rng: GameRng,
    stock: Stock,
    hands: PlayerMap<Hand>,
    table: Table,
    player_turn: PlayerId,
    turn_number: u32,
    winner: Option<PlayerId>,
    events: EventBus,
}

impl Game {
    /// Create a game from a configuration.
    ///
    /// The stock starts empty: call `set_stock` or `use_standard_stock`
    /// before dealing.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let player_count = config.player_count();
        let table = match config.grid {
            Some(grid) => Table::with_grid(grid),
            None => Table::new(),
        };

        Ok(Self {
            validator: Box::new(MinLength(config.min_meld_len)),
            rng: GameRng::new(config.seed),
            stock: Stock::default(),
            hands: PlayerMap::with_default(player_count),
            table,
            player_turn: PlayerId::new(0),
            turn_number: 1,
            winner: None,
            events: EventBus::new(),
            config,
        })
    }

    /// Create a game with `player_count` seats: seat 0 human, the rest
    /// automated.
    pub fn with_players(player_count: usize) -> Result<Self, ConfigError> {
        Self::new(GameConfig::for_players(player_count))
    }

    /// Replace the legal-shape rule (default: `MinLength(min_meld_len)`).
    #[must_use]
    pub fn with_validator(mut self, validator: impl MeldValidator + 'static) -> Self {
        self.validator = Box::new(validator);
        self
    }

    // === Setup ===

    /// Install the draw pile.
    pub fn set_stock(&mut self, stock: Stock) {
        self.stock = stock;
    }

    /// Install a freshly shuffled standard set, seeded from the config.
    pub fn use_standard_stock(&mut self) {
        self.stock = Stock::standard(&mut self.rng);
    }

    /// Deal the opening hand to every seat, in seat order.
    ///
    /// Draws that fail on an empty stock are skipped.
    pub fn deal_initial_tiles(&mut self) {
        let per_seat = self.config.initial_hand_size;
        for player in PlayerId::all(self.player_count()) {
            let before = self.hands[player].len();
            for _ in 0..per_seat {
                if let Some(tile) = self.stock.draw() {
                    self.hands[player].add_tile(tile);
                }
            }
            if self.hands[player].len() != before {
                self.hand_changed(player);
            }
        }
        debug!(per_seat, remaining = self.stock.size(), "dealt opening hands");
    }

    /// Every seat draws one tile; the highest rank starts (ties go to the
    /// lower seat). The drawn tiles go back into the stock, which is then
    /// reshuffled.
    ///
    /// Returns what each seat drew, `None` where the stock ran dry.
    pub fn draw_for_first_player(&mut self) -> PlayerMap<Option<Tile>> {
        let mut drawn: PlayerMap<Option<Tile>> = PlayerMap::with_default(self.player_count());
        for (_, slot) in drawn.iter_mut() {
            *slot = self.stock.draw();
        }

        let first = drawn
            .iter()
            .filter_map(|(p, t)| t.as_ref().map(|t| (p, t.rank())))
            .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(&a.0)))
            .map_or(PlayerId::new(0), |(p, _)| p);

        self.stock
            .return_tiles(drawn.iter().filter_map(|(_, t)| t.clone()), &mut self.rng);

        info!(%first, "first player drawn");
        self.set_turn(first);
        drawn
    }

    /// Return to the initial empty state: no melds, empty hands, seat 0 to
    /// play, no winner. The stock is left alone.
    pub fn reset_game(&mut self) {
        self.table.clear();
        self.events.emit(&GameEvent::TableChanged);

        for player in PlayerId::all(self.player_count()) {
            self.hands[player].clear();
            self.events.emit(&GameEvent::HandSizeChanged { player, size: 0 });
        }

        self.turn_number = 1;
        self.set_turn(PlayerId::new(0));

        if self.winner.take().is_some() {
            self.events.emit(&GameEvent::WinnerChanged { winner: None });
        }
        debug!("game reset");
    }

    // === Table Commands ===

    /// Place a tile on the table without touching any hand, for rearranging
    /// tiles lifted off the table. Use `play_from_hand` to lay a hand tile.
    pub fn add_tile_to_table(&mut self, tile: Tile, row: usize, col: usize) -> Result<(), RulesError> {
        self.table.add_tile(tile, row, col)?;
        self.events.emit(&GameEvent::TableChanged);
        Ok(())
    }

    /// Lift a tail-end tile off the table without touching any hand, for
    /// rearranging tiles already on the table. Use `return_to_hand` to take
    /// a tile back into a hand.
    pub fn remove_tile_from_table(&mut self, tile: &Tile, row: usize, col: usize) -> Result<Tile, RulesError> {
        let removed = self.table.remove_tile(tile, row, col)?;
        self.events.emit(&GameEvent::TableChanged);
        Ok(removed)
    }

    /// Move a tile from a seat's hand onto the table.
    ///
    /// If the placement is refused the tile goes back to its slot in the
    /// hand and nothing changes.
    pub fn play_from_hand(
        &mut self,
        player: PlayerId,
        tile: &Tile,
        row: usize,
        col: usize,
    ) -> Result<(), RulesError> {
        let hand = self.hands.get_mut(player).ok_or(RulesError::UnknownPlayer(player))?;
        let index = hand.position(tile).ok_or(RulesError::HandTileNotFound { player })?;
        let taken = hand.take(index).ok_or(RulesError::HandTileNotFound { player })?;

        if let Err(err) = self.table.add_tile(taken, row, col) {
            if let RulesError::InvalidPlacement { tile, .. } = &err {
                self.hands[player].insert_tile(index, tile.clone());
            }
            return Err(err);
        }

        self.events.emit(&GameEvent::TableChanged);
        self.hand_changed(player);
        Ok(())
    }

    /// Take a tile placed this turn back into a seat's hand.
    ///
    /// Tiles committed in an earlier turn stay on the table.
    pub fn return_to_hand(
        &mut self,
        player: PlayerId,
        tile: &Tile,
        row: usize,
        col: usize,
    ) -> Result<(), RulesError> {
        if self.hands.get(player).is_none() {
            return Err(RulesError::UnknownPlayer(player));
        }
        if let Some(on_table) = self.table.tile_at(row, col) {
            if on_table.same_face(tile) && on_table.is_played() {
                return Err(RulesError::TileAlreadyPlayed { tile: on_table.clone() });
            }
        }

        let removed = self.table.remove_tile(tile, row, col)?;
        self.hands[player].add_tile(removed);
        self.events.emit(&GameEvent::TableChanged);
        self.hand_changed(player);
        Ok(())
    }

    // === Stock Commands ===

    /// Draw one tile from the stock, or `None` once it is exhausted.
    pub fn draw_tile(&mut self) -> Option<Tile> {
        self.stock.draw()
    }

    /// Draw one tile straight into a seat's hand.
    pub fn draw_to_hand(&mut self, player: PlayerId) -> Result<Tile, RulesError> {
        if self.hands.get(player).is_none() {
            return Err(RulesError::UnknownPlayer(player));
        }
        let tile = self.stock.draw().ok_or(RulesError::StockExhausted)?;
        self.hands[player].add_tile(tile.clone());
        self.hand_changed(player);
        Ok(tile)
    }

    // === Turn Engine ===

    /// Commit the current seat's turn and pass play on.
    ///
    /// Fails with `TurnNotEndable`, changing nothing, while any meld on the
    /// table is not a legal shape.
    #[instrument(skip(self), fields(player = %self.player_turn, turn = self.turn_number))]
    pub fn end_turn(&mut self) -> Result<TurnOutcome, RulesError> {
        let invalid_melds = self.table.invalid_melds(self.validator.as_ref());
        if invalid_melds > 0 {
            debug!(invalid_melds, "end turn refused");
            return Err(RulesError::TurnNotEndable { invalid_melds });
        }

        let player = self.player_turn;
        let no_progress = !self.table.has_unplayed();

        let penalty_draw = if no_progress {
            let drawn = self.stock.draw();
            match &drawn {
                Some(tile) => {
                    debug!(%tile, "no progress, penalty draw");
                    self.hands[player].add_tile(tile.clone());
                    self.hand_changed(player);
                }
                None => debug!("no progress, stock empty"),
            }
            drawn
        } else {
            None
        };

        if !no_progress {
            self.table.play_all();
            self.events.emit(&GameEvent::TableChanged);
        }

        let next_player = player.next(self.player_count());
        self.turn_number += 1;
        self.set_turn(next_player);

        Ok(TurnOutcome {
            player,
            no_progress,
            penalty_draw,
            next_player,
        })
    }

    // === Notifications ===

    /// Register a change listener.
    pub fn subscribe(&mut self, listener: impl FnMut(&GameEvent) + Send + 'static) -> ListenerId {
        self.events.subscribe(listener)
    }

    /// Remove a change listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // === Queries ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.config.player_count()
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn player_turn(&self) -> PlayerId {
        self.player_turn
    }

    /// Turns started so far, beginning at 1.
    #[must_use]
    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    #[must_use]
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    #[must_use]
    pub fn current_player_hand(&self) -> &Hand {
        &self.hands[self.player_turn]
    }

    #[must_use]
    pub fn player_hand(&self, player: PlayerId) -> Option<&Hand> {
        self.hands.get(player)
    }

    #[must_use]
    pub fn table(&self) -> &Table {
        &self.table
    }

    #[must_use]
    pub fn stock_size(&self) -> usize {
        self.stock.size()
    }

    #[must_use]
    pub fn seat_kind(&self, player: PlayerId) -> Option<SeatKind> {
        self.config.seat_kind(player)
    }

    /// Is the current seat configured as automated?
    #[must_use]
    pub fn is_automated_players_turn(&self) -> bool {
        self.seat_kind(self.player_turn) == Some(SeatKind::Automated)
    }

    /// Are all melds on the table legal shapes?
    #[must_use]
    pub fn all_melds_valid(&self) -> bool {
        self.table.all_valid(self.validator.as_ref())
    }

    /// The legal-shape rule in force.
    #[must_use]
    pub fn validator(&self) -> &dyn MeldValidator {
        self.validator.as_ref()
    }

    // === Internals ===

    fn set_turn(&mut self, player: PlayerId) {
        self.player_turn = player;
        info!(%player, turn = self.turn_number, "turn changed");
        self.events.emit(&GameEvent::TurnChanged { player });
    }

    /// Publish a hand-size change and run win detection.
    fn hand_changed(&mut self, player: PlayerId) {
        let size = self.hands[player].len();
        self.events.emit(&GameEvent::HandSizeChanged { player, size });

        if size == 0 && self.winner.is_none() && self.all_melds_valid() {
            info!(%player, "winner");
            self.winner = Some(player);
            self.events.emit(&GameEvent::WinnerChanged { winner: Some(player) });
        }
    }
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("config", &self.config)
            .field("stock", &self.stock.size())
            .field("hands", &self.hands)
            .field("table", &self.table)
            .field("player_turn", &self.player_turn)
            .field("turn_number", &self.turn_number)
            .field("winner", &self.winner)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tiles::Colour;
    use std::sync::{Arc, Mutex};

    fn red(rank: u8) -> Tile {
        Tile::new(rank, Colour::Red)
    }

    fn two_player_game(stock: Vec<Tile>) -> Game {
        let mut game = Game::with_players(2).unwrap();
        game.set_stock(Stock::from_tiles(stock));
        game
    }

    fn record(game: &mut Game) -> Arc<Mutex<Vec<GameEvent>>> {
        let log = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&log);
        game.subscribe(move |e| sink.lock().unwrap().push(e.clone()));
        log
    }

    #[test]
    fn test_new_game_initial_state() {
        let game = Game::with_players(3).unwrap();
        assert_eq!(game.player_count(), 3);
        assert_eq!(game.player_turn(), PlayerId::new(0));
        assert_eq!(game.turn_number(), 1);
        assert_eq!(game.winner(), None);
        assert_eq!(game.stock_size(), 0);
        assert!(game.table().is_empty());
    }

    #[test]
    fn test_rejects_bad_player_count() {
        assert!(matches!(Game::with_players(1), Err(ConfigError::PlayerCount(1))));
        assert!(matches!(Game::with_players(5), Err(ConfigError::PlayerCount(5))));
    }

    #[test]
    fn test_deal_tolerates_short_stock() {
        let mut game = two_player_game((1..=13).map(red).collect());
        game.deal_initial_tiles();

        assert_eq!(game.player_hand(PlayerId::new(0)).unwrap().len(), 13);
        assert_eq!(game.player_hand(PlayerId::new(1)).unwrap().len(), 0);
        assert_eq!(game.stock_size(), 0);
    }

    #[test]
    fn test_play_from_hand_rejected_restores_hand() {
        let mut game = two_player_game(vec![red(1), red(2), red(3)]);
        let seat = PlayerId::new(0);
        for _ in 0..3 {
            game.draw_to_hand(seat).unwrap();
        }
        let before: Vec<_> = game.player_hand(seat).unwrap().tiles().to_vec();

        game.play_from_hand(seat, &red(2), 0, 0).unwrap();
        let err = game.play_from_hand(seat, &red(1), 0, 0).unwrap_err();
        assert!(matches!(err, RulesError::InvalidPlacement { .. }));

        let hand = game.player_hand(seat).unwrap();
        assert_eq!(hand.len(), 2);
        assert_eq!(hand.tiles()[0], before[0]);
        assert_eq!(hand.tiles()[1], before[2]);
    }

    #[test]
    fn test_play_from_hand_missing_tile() {
        let mut game = two_player_game(vec![]);
        assert_eq!(
            game.play_from_hand(PlayerId::new(1), &red(5), 0, 0),
            Err(RulesError::HandTileNotFound { player: PlayerId::new(1) })
        );
        assert_eq!(
            game.play_from_hand(PlayerId::new(7), &red(5), 0, 0),
            Err(RulesError::UnknownPlayer(PlayerId::new(7)))
        );
        assert!(game.table().is_empty());
    }

    #[test]
    fn test_draw_to_hand_exhausted() {
        let mut game = two_player_game(vec![red(1)]);
        assert_eq!(game.draw_to_hand(PlayerId::new(0)), Ok(red(1)));
        assert_eq!(game.draw_to_hand(PlayerId::new(0)), Err(RulesError::StockExhausted));
        assert_eq!(game.draw_tile(), None);
    }

    #[test]
    fn test_return_to_hand_only_unplayed() {
        let mut game = two_player_game(vec![red(9), red(3), red(2), red(1)]);
        let seat = PlayerId::new(0);
        game.deal_initial_tiles();
        for (col, rank) in [1, 2, 3].into_iter().enumerate() {
            game.play_from_hand(seat, &red(rank), 0, col).unwrap();
        }

        game.return_to_hand(seat, &red(3), 0, 2).unwrap();
        assert_eq!(game.player_hand(seat).unwrap().len(), 2);

        game.play_from_hand(seat, &red(3), 0, 2).unwrap();
        game.end_turn().unwrap();

        let mut committed = red(3);
        committed.play();
        assert_eq!(
            game.return_to_hand(seat, &red(3), 0, 2),
            Err(RulesError::TileAlreadyPlayed { tile: committed })
        );
        assert_eq!(game.table().tile_count(), 3);
    }

    #[test]
    fn test_end_turn_refused_changes_nothing() {
        let mut game = two_player_game(vec![red(9), red(2), red(1)]);
        game.deal_initial_tiles();
        let seat = PlayerId::new(0);
        game.play_from_hand(seat, &red(1), 0, 0).unwrap();
        game.play_from_hand(seat, &red(2), 0, 1).unwrap();

        let log = record(&mut game);
        assert_eq!(
            game.end_turn(),
            Err(RulesError::TurnNotEndable { invalid_melds: 1 })
        );
        assert_eq!(game.player_turn(), seat);
        assert_eq!(game.turn_number(), 1);
        assert!(game.table().has_unplayed());
        assert_eq!(game.stock_size(), 0);
        assert!(log.lock().unwrap().is_empty());
    }

    #[test]
    fn test_no_progress_penalty_draw() {
        let mut game = two_player_game(vec![red(5)]);
        let outcome = game.end_turn().unwrap();

        assert!(outcome.no_progress);
        assert_eq!(outcome.penalty_draw, Some(red(5)));
        assert_eq!(game.player_hand(PlayerId::new(0)).unwrap().len(), 1);
        assert_eq!(game.player_turn(), PlayerId::new(1));

        let outcome = game.end_turn().unwrap();
        assert!(outcome.no_progress);
        assert_eq!(outcome.penalty_draw, None);
        assert_eq!(game.player_hand(PlayerId::new(1)).unwrap().len(), 0);
        assert_eq!(game.player_turn(), PlayerId::new(0));
    }

    #[test]
    fn test_table_event_only_when_commit_changes_tiles() {
        let mut game = two_player_game(vec![red(3), red(2), red(1)]);
        game.deal_initial_tiles();
        for (col, rank) in [1, 2, 3].into_iter().enumerate() {
            game.play_from_hand(PlayerId::new(0), &red(rank), 0, col).unwrap();
        }

        let log = record(&mut game);
        game.end_turn().unwrap();
        assert!(log.lock().unwrap().contains(&GameEvent::TableChanged));

        log.lock().unwrap().clear();
        game.end_turn().unwrap();
        assert!(!log.lock().unwrap().contains(&GameEvent::TableChanged));
        assert_eq!(
            *log.lock().unwrap(),
            vec![GameEvent::TurnChanged { player: PlayerId::new(0) }]
        );
    }

    #[test]
    fn test_turn_cycles_through_all_seats() {
        let mut game = Game::with_players(4).unwrap();
        let order: Vec<_> = (0..5)
            .map(|_| game.end_turn().unwrap().next_player.index())
            .collect();
        assert_eq!(order, vec![1, 2, 3, 0, 1]);
        assert_eq!(game.turn_number(), 6);
    }

    #[test]
    fn test_win_on_empty_hand_with_valid_table() {
        let mut game = two_player_game(vec![red(3), red(2), red(1)]);
        game.deal_initial_tiles();
        let seat = PlayerId::new(0);
        let log = record(&mut game);

        game.play_from_hand(seat, &red(1), 0, 0).unwrap();
        game.play_from_hand(seat, &red(2), 0, 1).unwrap();
        assert_eq!(game.winner(), None);
        game.play_from_hand(seat, &red(3), 0, 2).unwrap();

        assert_eq!(game.winner(), Some(seat));
        assert!(log
            .lock()
            .unwrap()
            .contains(&GameEvent::WinnerChanged { winner: Some(seat) }));
    }

    #[test]
    fn test_custom_validator() {
        let mut game = two_player_game(vec![red(1)])
            .with_validator(|m: &crate::table::Meld| m.len() == 1);
        game.deal_initial_tiles();
        game.play_from_hand(PlayerId::new(0), &red(1), 0, 0).unwrap();

        assert_eq!(game.winner(), Some(PlayerId::new(0)));
        assert!(game.end_turn().is_ok());
    }

    #[test]
    fn test_is_automated_players_turn_follows_seats() {
        let config = GameConfig::with_seats(vec![SeatKind::Automated, SeatKind::Human]);
        let mut game = Game::new(config).unwrap();

        assert!(game.is_automated_players_turn());
        game.end_turn().unwrap();
        assert!(!game.is_automated_players_turn());
    }

    #[test]
    fn test_first_player_draw() {
        let mut game = Game::with_players(3).unwrap();
        // Seat 0 draws 4, seat 1 draws 11, seat 2 draws 11.
        game.set_stock(Stock::from_tiles(vec![
            Tile::new(11, Colour::Blue),
            red(11),
            red(4),
        ]));

        let drawn = game.draw_for_first_player();
        assert_eq!(drawn[PlayerId::new(0)], Some(red(4)));
        assert_eq!(game.player_turn(), PlayerId::new(1));
        assert_eq!(game.stock_size(), 3);
    }

    #[test]
    fn test_first_player_draw_empty_stock() {
        let mut game = Game::with_players(2).unwrap();
        let drawn = game.draw_for_first_player();

        assert!(drawn.iter().all(|(_, t)| t.is_none()));
        assert_eq!(game.player_turn(), PlayerId::new(0));
    }

    #[test]
    fn test_reset_game() {
        let mut game = two_player_game(vec![red(3), red(2), red(1)]);
        game.deal_initial_tiles();
        for (col, rank) in [1, 2, 3].into_iter().enumerate() {
            game.play_from_hand(PlayerId::new(0), &red(rank), 0, col).unwrap();
        }
        game.end_turn().unwrap();
        assert!(game.winner().is_some());

        game.reset_game();
        assert!(game.table().is_empty());
        assert_eq!(game.winner(), None);
        assert_eq!(game.player_turn(), PlayerId::new(0));
        assert_eq!(game.turn_number(), 1);
        assert!(game.player_hand(PlayerId::new(0)).unwrap().is_empty());
    }
}
