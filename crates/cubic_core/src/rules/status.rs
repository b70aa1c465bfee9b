//! Line classification.

use super::super::board::Board;
use super::super::lines::Line;
use super::super::types::{PlayerId, Square};
use super::RulesError;
use tracing::instrument;

/// Snapshot of who can still win a line.
///
/// Recomputed on every query; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStatus {
    winnable: bool,
    owner: Option<PlayerId>,
    cells_taken: usize,
}

impl LineStatus {
    /// False once two different players have claimed cells in the line.
    pub fn is_winnable(&self) -> bool {
        self.winnable
    }

    /// First player found in the line, if any cell is claimed.
    pub fn owner(&self) -> Option<PlayerId> {
        self.owner
    }

    /// Cells claimed by [`owner`](Self::owner).
    ///
    /// For an unwinnable line this only counts cells seen before the
    /// conflicting claim.
    pub fn cells_taken(&self) -> usize {
        self.cells_taken
    }

    /// True when the owner holds every one of `size` cells.
    pub fn is_complete(&self, size: usize) -> bool {
        self.winnable && self.owner.is_some() && self.cells_taken == size
    }

    /// True when the line is winnable and `player` leads it.
    pub fn is_led_by(&self, player: PlayerId) -> bool {
        self.winnable && self.owner == Some(player)
    }
}

impl Default for LineStatus {
    fn default() -> Self {
        Self {
            winnable: true,
            owner: None,
            cells_taken: 0,
        }
    }
}

/// Classifies a line against the current board.
///
/// Cells are scanned in line order. The first claimed cell sets the owner;
/// a later cell claimed by someone else makes the line unwinnable and ends
/// the scan immediately.
///
/// # Errors
///
/// Returns [`RulesError::MalformedLine`] if the line length differs from
/// the board side, or [`RulesError::CellOutOfRange`] for a cell off the board.
#[instrument(skip_all)]
pub fn classify(board: &Board, line: &Line) -> Result<LineStatus, RulesError> {
    if line.len() != board.size() {
        return Err(RulesError::MalformedLine {
            expected: board.size(),
            actual: line.len(),
        });
    }

    let mut status = LineStatus::default();

    for &coord in line.cells() {
        let square = board.get(coord).ok_or(RulesError::CellOutOfRange {
            coord,
            size: board.size(),
        })?;

        let Square::Occupied(player) = square else {
            continue;
        };

        match status.owner {
            None => {
                status.owner = Some(player);
                status.cells_taken = 1;
            }
            Some(owner) if owner == player => status.cells_taken += 1,
            Some(_) => {
                status.winnable = false;
                return Ok(status);
            }
        }
    }

    Ok(status)
}
