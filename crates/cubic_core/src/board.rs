//! Cubic board storage.

use super::action::MoveError;
use super::types::{Coord, Square};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// An N×N×N board of squares.
///
/// Squares are stored layer by layer, row by row, in a single preallocated
/// buffer. The board only stores ownership; rules live in [`crate::rules`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BoardData")]
pub struct Board {
    size: usize,
    squares: Vec<Square>,
}

/// Unchecked wire form of a [`Board`].
#[derive(Deserialize)]
struct BoardData {
    size: usize,
    squares: Vec<Square>,
}

impl TryFrom<BoardData> for Board {
    type Error = String;

    fn try_from(data: BoardData) -> Result<Self, Self::Error> {
        let expected = data
            .size
            .checked_mul(data.size)
            .and_then(|n| n.checked_mul(data.size))
            .ok_or_else(|| format!("board size {} is too large", data.size))?;
        if data.squares.len() != expected {
            return Err(format!(
                "a board of side {} has {} squares, got {}",
                data.size,
                expected,
                data.squares.len()
            ));
        }
        Ok(Self {
            size: data.size,
            squares: data.squares,
        })
    }
}

impl Board {
    /// Creates an empty board with side length `size`.
    #[instrument]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            squares: vec![Square::Empty; size * size * size],
        }
    }

    /// Side length of the board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of squares.
    pub fn len(&self) -> usize {
        self.squares.len()
    }

    /// Flat index of a coordinate, or `None` when off the board.
    pub fn index_of(&self, coord: Coord) -> Option<usize> {
        coord
            .is_within(self.size)
            .then(|| (coord.z * self.size + coord.y) * self.size + coord.x)
    }

    /// Coordinate of a flat index, or `None` when off the board.
    pub fn coord_of(&self, index: usize) -> Option<Coord> {
        (index < self.squares.len()).then(|| {
            Coord::new(
                index % self.size,
                (index / self.size) % self.size,
                index / (self.size * self.size),
            )
        })
    }

    /// Gets the square at the given coordinate.
    pub fn get(&self, coord: Coord) -> Option<Square> {
        self.index_of(coord)
            .and_then(|index| self.squares.get(index).copied())
    }

    /// Sets the square at the given coordinate.
    pub fn set(&mut self, coord: Coord, square: Square) -> Result<(), MoveError> {
        let slot = self
            .index_of(coord)
            .and_then(|index| self.squares.get_mut(index))
            .ok_or(MoveError::OutOfBounds(coord))?;
        *slot = square;
        Ok(())
    }

    /// Checks if a square exists and is unclaimed.
    pub fn is_empty(&self, coord: Coord) -> bool {
        matches!(self.get(coord), Some(Square::Empty))
    }

    /// Checks if every square is claimed.
    pub fn is_full(&self) -> bool {
        self.squares.iter().all(|s| *s != Square::Empty)
    }

    /// Returns every square to unclaimed.
    #[instrument(skip(self), fields(size = self.size))]
    pub fn reset(&mut self) {
        self.squares.fill(Square::Empty);
    }

    /// All squares in storage order.
    pub fn squares(&self) -> &[Square] {
        &self.squares
    }

    /// Iterates over every coordinate in storage order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.squares.len()).filter_map(|index| self.coord_of(index))
    }

    /// Iterates over every unclaimed coordinate.
    pub fn empty_coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.coords().filter(|coord| self.is_empty(*coord))
    }
}

/// Renders each layer as a grid, bottom layer first.
///
/// Empty squares show as `.`, claimed squares as their player number.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for z in 0..self.size {
            writeln!(f, "z={}", z)?;
            for y in 0..self.size {
                let row = (0..self.size)
                    .map(|x| match self.get(Coord::new(x, y, z)) {
                        Some(Square::Occupied(player)) => player.index().to_string(),
                        _ => ".".to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(" ");
                writeln!(f, "  {}", row)?;
            }
        }
        Ok(())
    }
}
