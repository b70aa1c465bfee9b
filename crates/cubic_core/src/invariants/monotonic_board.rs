//! Monotonic board invariant: claimed cells never change hands.

use super::super::board::Board;
use super::super::typestate::GameInProgress;
use super::super::types::Square;
use super::Invariant;

/// Invariant: the board is exactly the replay of the move history.
///
/// Replaying must never claim an already claimed cell, and the replayed
/// board must match the live one.
pub struct MonotonicBoardInvariant;

impl Invariant<GameInProgress> for MonotonicBoardInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut reconstructed = Board::new(game.board().size());

        for mov in game.history() {
            if !reconstructed.is_empty(mov.coord) {
                return false;
            }
            if reconstructed
                .set(mov.coord, Square::Occupied(mov.player))
                .is_err()
            {
                return false;
            }
        }

        reconstructed == *game.board()
    }

    fn description() -> &'static str {
        "Board matches move history and claims are never overwritten"
    }
}
