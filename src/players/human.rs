//! Human player that reads coordinates from a line source.

use super::Player;
use crate::orchestrator::GameEvent;
use anyhow::Result;
use cubic_core::{Coord, GameInProgress};
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tracing::{debug, warn};

/// Lines of text typed by the humans at the table.
///
/// Every human seat reads from the same source; only the player to move
/// is ever waiting on it.
pub type SharedInput = Arc<Mutex<mpsc::UnboundedReceiver<String>>>;

/// Wraps a line receiver for sharing between human seats.
pub fn shared_input(rx: mpsc::UnboundedReceiver<String>) -> SharedInput {
    Arc::new(Mutex::new(rx))
}

/// Human player using typed coordinates.
pub struct HumanPlayer {
    name: String,
    input: SharedInput,
    events: mpsc::UnboundedSender<GameEvent>,
}

impl HumanPlayer {
    /// Creates a new human player.
    pub fn new(
        name: impl Into<String>,
        input: SharedInput,
        events: mpsc::UnboundedSender<GameEvent>,
    ) -> Self {
        Self {
            name: name.into(),
            input,
            events,
        }
    }
}

#[async_trait::async_trait]
impl Player for HumanPlayer {
    async fn get_move(&mut self, _game: &GameInProgress) -> Result<Coord> {
        let mut input = self.input.lock().await;

        while let Some(line) = input.recv().await {
            match line.trim().parse::<Coord>() {
                Ok(coord) => {
                    debug!(player = %self.name, %coord, "Human entered cell");
                    return Ok(coord);
                }
                Err(e) => {
                    warn!(player = %self.name, input = %line.trim(), "Unreadable cell");
                    self.events.send(GameEvent::InvalidInput {
                        player: self.name.clone(),
                        reason: e.to_string(),
                    })?;
                }
            }
        }

        anyhow::bail!("Input closed while waiting for {}", self.name)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn is_computer(&self) -> bool {
        false
    }
}
