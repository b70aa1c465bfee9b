//! Core domain types for cubic tic-tac-toe.

use serde::{Deserialize, Serialize};
use std::num::NonZeroU8;
use std::str::FromStr;
use tracing::instrument;

/// A player taking part in the game.
///
/// Players are numbered from 1. Owner 0 is represented by [`Square::Empty`]
/// instead, so a `PlayerId` always names a real player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct PlayerId(NonZeroU8);

impl PlayerId {
    /// The first player.
    pub const ONE: PlayerId = PlayerId(NonZeroU8::MIN);

    /// Creates a player from its 1-based index. Returns `None` for 0.
    pub fn new(index: u8) -> Option<Self> {
        NonZeroU8::new(index).map(Self)
    }

    /// Returns the 1-based index of this player.
    pub fn index(self) -> u8 {
        self.0.get()
    }

    /// Returns the player whose turn follows this one.
    ///
    /// Turns rotate `1 -> 2 -> ... -> num_players -> 1`.
    #[instrument]
    pub fn next(self, num_players: u8) -> Self {
        let index = self.index() % num_players.max(1) + 1;
        // index is at least 1 by construction
        Self::new(index).unwrap_or(Self::ONE)
    }

    /// Returns true if this player is one of `num_players` players.
    pub fn is_within(self, num_players: u8) -> bool {
        self.index() <= num_players
    }

    /// Iterates over every player in a game of `num_players`.
    pub fn all(num_players: u8) -> impl Iterator<Item = PlayerId> {
        (1..=num_players).filter_map(PlayerId::new)
    }
}

impl TryFrom<u8> for PlayerId {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        PlayerId::new(value).ok_or_else(|| "player numbers start at 1".to_string())
    }
}

impl From<PlayerId> for u8 {
    fn from(player: PlayerId) -> Self {
        player.index()
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.index())
    }
}

/// A square on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Square {
    /// Unclaimed square.
    #[default]
    Empty,
    /// Square claimed by a player.
    Occupied(PlayerId),
}

impl Square {
    /// Returns the owner of the square, if any.
    pub fn owner(self) -> Option<PlayerId> {
        match self {
            Square::Empty => None,
            Square::Occupied(player) => Some(player),
        }
    }
}

/// A cell position on a cubic board.
///
/// `z` selects the horizontal layer, `y` the row within it and `x` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    /// Column within a layer.
    pub x: usize,
    /// Row within a layer.
    pub y: usize,
    /// Layer.
    pub z: usize,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: usize, y: usize, z: usize) -> Self {
        Self { x, y, z }
    }

    /// Returns true if the coordinate lies on a board of side `size`.
    pub fn is_within(self, size: usize) -> bool {
        self.x < size && self.y < size && self.z < size
    }
}

impl std::fmt::Display for Coord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Error parsing a coordinate from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
#[display("Expected three numbers like \"1,2,3\", got {:?}", _0)]
pub struct ParseCoordError(pub String);

impl std::error::Error for ParseCoordError {}

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parses `"x,y,z"`, `"x y z"` or `"(x, y, z)"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim().trim_start_matches('(').trim_end_matches(')');
        let parts = trimmed
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(str::parse::<usize>)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ParseCoordError(s.to_string()))?;

        match parts.as_slice() {
            [x, y, z] => Ok(Coord::new(*x, *y, *z)),
            _ => Err(ParseCoordError(s.to_string())),
        }
    }
}
