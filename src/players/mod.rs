//! Player trait and implementations.

mod computer;
mod human;

pub use computer::ComputerPlayer;
pub use human::{HumanPlayer, SharedInput, shared_input};

use crate::config::{GameConfig, PlayerKind};
use crate::orchestrator::GameEvent;
use anyhow::Result;
use cubic_core::{Coord, GameInProgress, PlayerId};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, instrument};

/// Trait for players that can make moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Gets a move from this player.
    ///
    /// Returns the cell to claim. The game is not modified.
    async fn get_move(&mut self, game: &GameInProgress) -> Result<Coord>;

    /// Returns the player's display name.
    fn name(&self) -> &str;

    /// Returns true for computer-controlled seats.
    fn is_computer(&self) -> bool;
}

/// Builds one player per seat of `config`, in turn order.
///
/// Humans share `input`. When `seed` is given, the computer in seat `n`
/// is seeded with `seed + n`; otherwise computers use OS entropy.
#[instrument(skip(config, input, events))]
pub fn roster(
    config: &GameConfig,
    seed: Option<u64>,
    input: SharedInput,
    events: mpsc::UnboundedSender<GameEvent>,
) -> Vec<Box<dyn Player>> {
    let delay = Duration::from_millis(*config.computer_delay_ms());

    config
        .players()
        .iter()
        .zip(PlayerId::all(config.num_players()))
        .map(|(profile, player)| -> Box<dyn Player> {
            debug!(%player, name = %profile.name(), kind = %profile.kind(), "Seating player");
            match profile.kind() {
                PlayerKind::Human => Box::new(HumanPlayer::new(
                    profile.name().clone(),
                    input.clone(),
                    events.clone(),
                )),
                PlayerKind::Computer => Box::new(ComputerPlayer::new(
                    profile.name().clone(),
                    *config.difficulty(),
                    delay,
                    seed.map(|s| s.wrapping_add(u64::from(player.index()))),
                )),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PlayerProfile;

    #[test]
    fn test_roster_seats_every_profile_in_order() {
        let config = GameConfig::default().with_players(vec![
            PlayerProfile::new("Ann".to_string(), PlayerKind::Human),
            PlayerProfile::new("Bot".to_string(), PlayerKind::Computer),
            PlayerProfile::new("Cy".to_string(), PlayerKind::Human),
        ]);
        let (_line_tx, line_rx) = mpsc::unbounded_channel();
        let (event_tx, _event_rx) = mpsc::unbounded_channel();

        let players = roster(&config, Some(7), shared_input(line_rx), event_tx);

        let seats: Vec<(&str, bool)> = players
            .iter()
            .map(|p| (p.name(), p.is_computer()))
            .collect();
        assert_eq!(seats, [("Ann", false), ("Bot", true), ("Cy", false)]);
    }
}
