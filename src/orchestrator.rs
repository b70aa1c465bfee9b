//! Game orchestration between players.

use crate::players::Player;
use anyhow::{Context, Result};
use cubic_core::{Coord, GameFinished, GameInProgress, GameResult, Move, PlayerId};
use tokio::sync::mpsc;
use tracing::{debug, info, instrument, warn};

/// Messages sent from orchestrator to UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    /// A game began.
    Started {
        /// Name of the opening player.
        first: String,
    },
    /// A player is up.
    Turn {
        /// Name of the player to move.
        player: String,
        /// Whether the seat is computer-controlled.
        is_computer: bool,
    },
    /// Board rendering after a change.
    Board(String),
    /// Typed text was not a cell.
    InvalidInput {
        /// Name of the player who typed it.
        player: String,
        /// Why the text was refused.
        reason: String,
    },
    /// A named cell could not be claimed.
    Rejected {
        /// Name of the player who asked for it.
        player: String,
        /// The refused cell.
        coord: Coord,
        /// Why the cell was refused.
        reason: String,
    },
    /// Move was made.
    MoveMade {
        /// Name of the player who moved.
        player: String,
        /// The claimed cell.
        coord: Coord,
    },
    /// Game ended.
    GameOver {
        /// Name of the winner, `None` for a draw.
        winner: Option<String>,
        /// Cells of the completed line.
        line: Vec<Coord>,
        /// Closing message for the table.
        message: String,
    },
    /// The table may start another game with the same roster.
    RematchOffered,
}

/// Orchestrates gameplay between any number of seated players.
pub struct Orchestrator {
    players: Vec<Box<dyn Player>>,
    event_tx: mpsc::UnboundedSender<GameEvent>,
}

impl Orchestrator {
    /// Creates a new orchestrator. Seat `i` plays as player `i + 1`.
    pub fn new(players: Vec<Box<dyn Player>>, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        Self { players, event_tx }
    }

    /// Number of seated players.
    pub fn num_players(&self) -> usize {
        self.players.len()
    }

    fn seat(&mut self, player: PlayerId) -> Result<&mut Box<dyn Player>> {
        self.players
            .get_mut(usize::from(player.index()) - 1)
            .with_context(|| format!("{} has no seat", player))
    }

    fn name_of(&self, player: PlayerId) -> String {
        self.players
            .get(usize::from(player.index()) - 1)
            .map(|p| p.name().to_string())
            .unwrap_or_else(|| player.to_string())
    }

    /// Runs the game loop until the game is finished.
    ///
    /// Illegal cells from humans are reported and asked for again; an
    /// illegal cell from a computer is an error.
    #[instrument(skip(self, game), fields(players = self.players.len()))]
    pub async fn run(&mut self, game: GameInProgress) -> Result<GameFinished> {
        anyhow::ensure!(
            self.players.len() == usize::from(game.num_players()),
            "{} seats for a {}-player game",
            self.players.len(),
            game.num_players()
        );

        info!(first = %game.first(), size = game.board().size(), "Starting game orchestration");
        self.event_tx.send(GameEvent::Started {
            first: self.name_of(game.first()),
        })?;
        self.event_tx.send(GameEvent::Board(game.board().to_string()))?;

        let mut game = game;
        loop {
            let current = game.to_move();
            let player_name = self.name_of(current);
            let is_computer = self.seat(current)?.is_computer();
            self.event_tx.send(GameEvent::Turn {
                player: player_name.clone(),
                is_computer,
            })?;

            debug!(player = %player_name, "Waiting for move");
            let coord = self.seat(current)?.get_move(&game).await?;

            let action = Move::new(current, coord);
            if let Err(e) = game.check(&action) {
                if is_computer {
                    return Err(anyhow::anyhow!("{} chose an illegal cell: {}", player_name, e));
                }
                warn!(player = %player_name, %coord, error = %e, "Move rejected");
                self.event_tx.send(GameEvent::Rejected {
                    player: player_name,
                    coord,
                    reason: e.to_string(),
                })?;
                continue;
            }

            let result = game.make_move(action)?;
            self.event_tx.send(GameEvent::MoveMade {
                player: player_name,
                coord,
            })?;

            match result {
                GameResult::InProgress(next) => {
                    self.event_tx
                        .send(GameEvent::Board(next.board().to_string()))?;
                    game = next;
                }
                GameResult::Finished(finished) => {
                    self.event_tx
                        .send(GameEvent::Board(finished.board().to_string()))?;
                    let winner = finished.outcome().winner().map(|p| self.name_of(p));
                    let line = finished
                        .winning_line()
                        .map(|l| l.cells().to_vec())
                        .unwrap_or_default();
                    let message = self.verdict(&finished);
                    info!(%message, moves = finished.history().len(), "Game over");
                    self.event_tx.send(GameEvent::GameOver {
                        winner,
                        line,
                        message,
                    })?;
                    return Ok(finished);
                }
            }
        }
    }

    /// Closing message for a finished game.
    ///
    /// A lone human beaten by a computer is told they lost rather than
    /// the computer being congratulated.
    pub fn verdict(&self, finished: &GameFinished) -> String {
        let Some(winner) = finished.outcome().winner() else {
            return "No winning moves are left. It's a draw!".to_string();
        };

        let humans = self.players.iter().filter(|p| !p.is_computer()).count();
        let winner_is_computer = self
            .players
            .get(usize::from(winner.index()) - 1)
            .is_some_and(|p| p.is_computer());

        if humans == 1 && winner_is_computer {
            "You lost, sorry! Maybe next time!".to_string()
        } else {
            format!("{} won! Congratulations!", self.name_of(winner))
        }
    }
}
