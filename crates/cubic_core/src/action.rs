//! First-class move actions.
//!
//! Moves are domain events, not side effects. They carry the player's
//! intent and can be validated before the game commits them.

use super::rules::RulesError;
use super::types::{Coord, PlayerId};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// A player claiming a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Move {
    /// The player making the move.
    pub player: PlayerId,
    /// The cell being claimed.
    pub coord: Coord,
}

impl Move {
    /// Creates a new move.
    #[instrument]
    pub fn new(player: PlayerId, coord: Coord) -> Self {
        Self { player, coord }
    }

    /// Returns the player making this move.
    pub fn player(&self) -> PlayerId {
        self.player
    }

    /// Returns the claimed cell.
    pub fn coord(&self) -> Coord {
        self.coord
    }
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.coord)
    }
}

/// Error that can occur when validating or applying a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// The cell is not on the board.
    #[display("Cell {} is off the board", _0)]
    OutOfBounds(Coord),

    /// The cell is already claimed.
    #[display("Cell {} is already claimed", _0)]
    SquareOccupied(Coord),

    /// It is not this player's turn.
    #[display("It's not {}'s turn", _0)]
    WrongPlayer(PlayerId),

    /// The player is not part of this game.
    #[display("{} is not playing", _0)]
    UnknownPlayer(PlayerId),

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(String),

    /// Line evaluation failed after the move.
    #[display("{}", _0)]
    Rules(RulesError),
}

impl std::error::Error for MoveError {}

impl From<RulesError> for MoveError {
    fn from(err: RulesError) -> Self {
        MoveError::Rules(err)
    }
}
