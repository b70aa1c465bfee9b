//! A sitting at the table: one or more games with the same roster.

use crate::config::GameConfig;
use crate::orchestrator::{GameEvent, Orchestrator};
use crate::players::{SharedInput, roster};
use anyhow::{Context, Result};
use cubic_core::{GameSetup, Outcome};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc;
use tracing::{info, instrument};

/// Plays games with the roster of `config` until the table stops.
///
/// After each game a table with a human is offered a rematch; a
/// computer-only table plays once. Returns every outcome in order.
#[instrument(skip(config, input, events), fields(size = config.board_size()))]
pub async fn play_session(
    config: &GameConfig,
    seed: Option<u64>,
    input: SharedInput,
    events: mpsc::UnboundedSender<GameEvent>,
) -> Result<Vec<Outcome>> {
    config.validate()?;

    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    let players = roster(config, seed, input.clone(), events.clone());
    let has_human = players.iter().any(|p| !p.is_computer());
    let mut orchestrator = Orchestrator::new(players, events.clone());

    let mut setup = GameSetup::new(*config.board_size(), config.num_players())
        .context("Failed to set up game")?;
    let mut outcomes = Vec::new();

    loop {
        let first = config.first_player().resolve(&setup, &mut rng);
        let game = setup.start(first)?;
        let finished = orchestrator.run(game).await?;
        outcomes.push(*finished.outcome());

        if !has_human || !offer_rematch(&input, &events).await? {
            break;
        }
        info!(games = outcomes.len(), "Starting rematch");
        setup = finished.restart();
    }

    Ok(outcomes)
}

/// Asks the table for another game. Closed input counts as no.
async fn offer_rematch(
    input: &SharedInput,
    events: &mpsc::UnboundedSender<GameEvent>,
) -> Result<bool> {
    events.send(GameEvent::RematchOffered)?;
    let answer = input.lock().await.recv().await;
    Ok(answer.is_some_and(|a| {
        let a = a.trim();
        a.eq_ignore_ascii_case("y") || a.eq_ignore_ascii_case("yes")
    }))
}
