//! Phase-specific typestate structs for cubic tic-tac-toe.
//!
//! Each phase is its own type with phase-specific fields. A finished game
//! always has an outcome, and only a game in progress accepts moves.

use super::action::{Move, MoveError};
use super::board::Board;
use super::contracts::{Contract, MoveContract};
use super::lines::{CatalogError, Line, LineCatalog};
use super::phases::Outcome;
use super::rules::{self, RulesError};
use super::selector::{self, Difficulty};
use super::types::{Coord, PlayerId, Square};
use rand::Rng;
use std::sync::Arc;
use tracing::{info, instrument};

/// Most players a game can seat.
pub const MAX_PLAYERS: u8 = 8;

/// Error setting up or starting a game.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum SetupError {
    /// The line catalog could not be built.
    #[display("{}", _0)]
    Catalog(CatalogError),

    /// Player count outside `2..=MAX_PLAYERS`.
    #[display("A game needs 2 to {} players, got {}", MAX_PLAYERS, _0)]
    PlayerCount(u8),

    /// First player is not seated in this game.
    #[display("{} cannot start a {}-player game", _0, _1)]
    FirstPlayer(PlayerId, u8),
}

impl std::error::Error for SetupError {}

impl From<CatalogError> for SetupError {
    fn from(err: CatalogError) -> Self {
        SetupError::Catalog(err)
    }
}

// ─────────────────────────────────────────────────────────────
//  Setup Phase
// ─────────────────────────────────────────────────────────────

/// Game in setup phase - ready to start.
///
/// The board is always empty.
#[derive(Debug, Clone)]
pub struct GameSetup {
    board: Board,
    catalog: Arc<LineCatalog>,
    num_players: u8,
}

impl GameSetup {
    /// Creates a game for `num_players` on a board of side `board_size`.
    ///
    /// Builds the line catalog for the board size.
    #[instrument]
    pub fn new(board_size: usize, num_players: u8) -> Result<Self, SetupError> {
        let catalog = Arc::new(LineCatalog::build(board_size)?);
        Self::with_catalog(catalog, num_players)
    }

    /// Creates a game that reuses an existing catalog.
    #[instrument(skip(catalog), fields(size = catalog.size()))]
    pub fn with_catalog(catalog: Arc<LineCatalog>, num_players: u8) -> Result<Self, SetupError> {
        if !(2..=MAX_PLAYERS).contains(&num_players) {
            return Err(SetupError::PlayerCount(num_players));
        }

        Ok(Self {
            board: Board::new(catalog.size()),
            catalog,
            num_players,
        })
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the shared line catalog.
    pub fn catalog(&self) -> &Arc<LineCatalog> {
        &self.catalog
    }

    /// Number of players seated.
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    /// Picks a first player uniformly at random.
    pub fn coin_toss<R: Rng + ?Sized>(&self, rng: &mut R) -> PlayerId {
        PlayerId::new(rng.random_range(1..=self.num_players)).unwrap_or(PlayerId::ONE)
    }

    /// Starts the game with the first player (consumes setup, returns in-progress).
    #[instrument(skip(self), fields(first = %first))]
    pub fn start(self, first: PlayerId) -> Result<GameInProgress, SetupError> {
        if !first.is_within(self.num_players) {
            return Err(SetupError::FirstPlayer(first, self.num_players));
        }

        info!(size = self.board.size(), players = self.num_players, "Game started");
        Ok(GameInProgress {
            board: self.board,
            catalog: self.catalog,
            num_players: self.num_players,
            first,
            to_move: first,
            history: Vec::new(),
        })
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase
// ─────────────────────────────────────────────────────────────

/// Game in progress - can accept moves.
#[derive(Debug, Clone)]
pub struct GameInProgress {
    pub(crate) board: Board,
    pub(crate) catalog: Arc<LineCatalog>,
    pub(crate) num_players: u8,
    pub(crate) first: PlayerId,
    pub(crate) to_move: PlayerId,
    pub(crate) history: Vec<Move>,
}

impl GameInProgress {
    /// Checks a move against the preconditions without applying it.
    pub fn check(&self, action: &Move) -> Result<(), MoveError> {
        MoveContract::pre(self, action)
    }

    /// Makes a move, consuming self and transitioning to the next state.
    ///
    /// Preconditions are always checked; postconditions only in debug
    /// builds. Use [`check`](Self::check) first to keep the game on an
    /// illegal move.
    #[instrument(skip(self), fields(action = %action))]
    pub fn make_move(self, action: Move) -> Result<GameResult, MoveError> {
        MoveContract::pre(&self, &action)?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        game.board
            .set(action.coord, Square::Occupied(action.player))?;
        game.history.push(action);

        if let Some(outcome) = rules::outcome(&game.board, &game.catalog)? {
            info!(%outcome, moves = game.history.len(), "Game finished");
            return Ok(GameResult::Finished(GameFinished {
                board: game.board,
                catalog: game.catalog,
                num_players: game.num_players,
                history: game.history,
                outcome,
            }));
        }

        game.to_move = game.to_move.next(game.num_players);

        #[cfg(debug_assertions)]
        MoveContract::post(&before, &game)?;

        Ok(GameResult::InProgress(game))
    }

    /// Claims `coord` for the player to move.
    pub fn place(self, coord: Coord) -> Result<GameResult, MoveError> {
        let action = Move::new(self.to_move, coord);
        self.make_move(action)
    }

    /// Picks the cell the player to move should claim.
    ///
    /// The game is left untouched; pass the result to [`place`](Self::place).
    pub fn choose_cell<R: Rng + ?Sized>(
        &self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<Coord, RulesError> {
        selector::choose_cell(&self.board, &self.catalog, self.to_move, difficulty, rng)
    }

    /// Returns the player to move.
    pub fn to_move(&self) -> PlayerId {
        self.to_move
    }

    /// Returns the player who moved first.
    pub fn first(&self) -> PlayerId {
        self.first
    }

    /// Number of players seated.
    pub fn num_players(&self) -> u8 {
        self.num_players
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the shared line catalog.
    pub fn catalog(&self) -> &Arc<LineCatalog> {
        &self.catalog
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Returns every unclaimed cell.
    pub fn valid_moves(&self) -> Vec<Coord> {
        self.board.empty_coords().collect()
    }

    /// Replays moves from a fresh setup.
    #[instrument(skip(setup, moves), fields(moves = moves.len()))]
    pub fn replay(
        setup: GameSetup,
        first: PlayerId,
        moves: &[Move],
    ) -> Result<GameResult, ReplayError> {
        let mut game = setup.start(first)?;

        for action in moves {
            match game.make_move(*action)? {
                GameResult::InProgress(g) => game = g,
                GameResult::Finished(g) => return Ok(GameResult::Finished(g)),
            }
        }

        Ok(GameResult::InProgress(game))
    }
}

/// Error replaying a move history.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::From)]
pub enum ReplayError {
    /// The game could not start.
    #[display("{}", _0)]
    Setup(SetupError),
    /// A recorded move was illegal.
    #[display("{}", _0)]
    Move(MoveError),
}

impl std::error::Error for ReplayError {}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// Game finished - outcome determined.
#[derive(Debug, Clone)]
pub struct GameFinished {
    board: Board,
    catalog: Arc<LineCatalog>,
    num_players: u8,
    history: Vec<Move>,
    outcome: Outcome,
}

impl GameFinished {
    /// Returns the outcome.
    pub fn outcome(&self) -> &Outcome {
        &self.outcome
    }

    /// Returns the completed line, if the game was won.
    pub fn winning_line(&self) -> Option<&Line> {
        self.outcome
            .winning_line()
            .and_then(|index| self.catalog.line(index))
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// Restarts the game: clears every square and keeps the catalog.
    #[instrument(skip(self))]
    pub fn restart(self) -> GameSetup {
        let mut board = self.board;
        board.reset();
        GameSetup {
            board,
            catalog: self.catalog,
            num_players: self.num_players,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// Result of making a move.
#[derive(Debug)]
pub enum GameResult {
    /// Game continues.
    InProgress(GameInProgress),
    /// Game finished.
    Finished(GameFinished),
}
