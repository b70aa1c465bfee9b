//! Computer player backed by the weighted-line selector.

use super::Player;
use anyhow::Result;
use cubic_core::{Coord, Difficulty, GameInProgress};
use rand::SeedableRng;
use rand::rngs::StdRng;
use std::time::Duration;
use tracing::{debug, instrument};

/// Computer player.
///
/// Waits `delay` before answering so a watching human can follow along.
pub struct ComputerPlayer {
    name: String,
    difficulty: Difficulty,
    delay: Duration,
    rng: StdRng,
}

impl ComputerPlayer {
    /// Creates a computer player. A seed makes its choices repeatable.
    #[instrument(skip(name), fields(name = %name.as_ref()))]
    pub fn new(
        name: impl AsRef<str>,
        difficulty: Difficulty,
        delay: Duration,
        seed: Option<u64>,
    ) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            name: name.as_ref().to_string(),
            difficulty,
            delay,
            rng,
        }
    }

    /// Returns the difficulty this player selects with.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }
}

#[async_trait::async_trait]
impl Player for ComputerPlayer {
    async fn get_move(&mut self, game: &GameInProgress) -> Result<Coord> {
        debug!(ai = %self.name, difficulty = %self.difficulty, "Computer choosing cell");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let coord = game.choose_cell(self.difficulty, &mut self.rng)?;
        debug!(ai = %self.name, %coord, "Computer chose cell");
        Ok(coord)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        true
    }
}
