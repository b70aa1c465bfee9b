//! Rotating turn invariant: players move in seat order.

use super::super::typestate::GameInProgress;
use super::Invariant;

/// Invariant: the history follows the rotation from the first player, and
/// the player to move is next in rotation.
pub struct RotatingTurnInvariant;

impl Invariant<GameInProgress> for RotatingTurnInvariant {
    fn holds(game: &GameInProgress) -> bool {
        let mut expected = game.first();

        for mov in game.history() {
            if mov.player != expected {
                return false;
            }
            expected = expected.next(game.num_players());
        }

        game.to_move() == expected
    }

    fn description() -> &'static str {
        "Players move in rotation starting from the first player"
    }
}
