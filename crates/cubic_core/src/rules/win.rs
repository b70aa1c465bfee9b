//! Win detection for cubic tic-tac-toe.

use super::super::board::Board;
use super::super::lines::{Line, LineCatalog};
use super::super::types::PlayerId;
use super::{RulesError, classify, ensure_fits};
use tracing::instrument;

/// Finds the first line, in catalog order, owned entirely by one player.
///
/// Returns `None` if no line is complete.
#[instrument(skip_all)]
pub fn find_winning_line<'c>(
    board: &Board,
    catalog: &'c LineCatalog,
) -> Result<Option<&'c Line>, RulesError> {
    Ok(winner(board, catalog)?.and_then(|(_, index)| catalog.line(index)))
}

/// Finds the winning player and the catalog index of the completed line.
#[instrument(skip_all)]
pub fn winner(
    board: &Board,
    catalog: &LineCatalog,
) -> Result<Option<(PlayerId, usize)>, RulesError> {
    ensure_fits(board, catalog)?;

    for (index, line) in catalog.lines().iter().enumerate() {
        let status = classify(board, line)?;
        if let (true, Some(player)) = (status.is_complete(board.size()), status.owner()) {
            return Ok(Some((player, index)));
        }
    }

    Ok(None)
}
