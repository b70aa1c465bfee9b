//! Game rules for cubic tic-tac-toe.
//!
//! This module contains pure functions for evaluating game state
//! according to the rules. Rules are separated from board storage
//! and never mutate the board; callers commit moves themselves.

pub mod draw;
pub mod status;
pub mod win;

pub use draw::{is_draw, is_game_over};
pub use status::{LineStatus, classify};
pub use win::{find_winning_line, winner};

use super::board::Board;
use super::lines::LineCatalog;
use super::phases::Outcome;
use super::types::Coord;
use tracing::instrument;

/// Contract violation detected while evaluating lines.
///
/// These indicate a caller bug, such as asking for a move after the game
/// has ended or pairing a catalog with a board of another size.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum RulesError {
    /// A line does not have one cell per board row.
    #[display("Line has {actual} cells but the board side is {expected}")]
    MalformedLine {
        /// Board side length.
        expected: usize,
        /// Cells in the offending line.
        actual: usize,
    },
    /// A line refers to a cell that is not on the board.
    #[display("Line cell {coord} is off a board of side {size}")]
    CellOutOfRange {
        /// The dangling cell.
        coord: Coord,
        /// Board side length.
        size: usize,
    },
    /// Catalog was built for a different board size.
    #[display("Catalog for side {catalog} used with a board of side {board}")]
    CatalogMismatch {
        /// Catalog side length.
        catalog: usize,
        /// Board side length.
        board: usize,
    },
    /// Move selection was requested with no winnable line left.
    #[display("No winnable line remains")]
    NoWinnableLine,
    /// The selected line had no unclaimed cell.
    #[display("Line {line} has no unclaimed cell")]
    NoOpenCell {
        /// Catalog index of the line.
        line: usize,
    },
}

impl std::error::Error for RulesError {}

/// Fails fast when the catalog and board disagree on size.
pub fn ensure_fits(board: &Board, catalog: &LineCatalog) -> Result<(), RulesError> {
    if catalog.fits(board) {
        Ok(())
    } else {
        Err(RulesError::CatalogMismatch {
            catalog: catalog.size(),
            board: board.size(),
        })
    }
}

/// Determines whether the game has ended and how.
///
/// Returns `None` while some line is still winnable and none is complete.
#[instrument(skip_all)]
pub fn outcome(board: &Board, catalog: &LineCatalog) -> Result<Option<Outcome>, RulesError> {
    if let Some((player, index)) = winner(board, catalog)? {
        return Ok(Some(Outcome::Winner {
            player,
            line: index,
        }));
    }

    if !draw::any_winnable(board, catalog)? {
        return Ok(Some(Outcome::Draw));
    }

    Ok(None)
}
