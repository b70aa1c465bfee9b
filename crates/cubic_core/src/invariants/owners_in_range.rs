//! Owner range invariant.

use super::super::typestate::GameInProgress;
use super::Invariant;

/// Invariant: every claimed cell belongs to a seated player.
pub struct OwnersInRangeInvariant;

impl Invariant<GameInProgress> for OwnersInRangeInvariant {
    fn holds(game: &GameInProgress) -> bool {
        game.board()
            .squares()
            .iter()
            .filter_map(|square| square.owner())
            .all(|owner| owner.is_within(game.num_players()))
    }

    fn description() -> &'static str {
        "Every owner is a seated player"
    }
}
