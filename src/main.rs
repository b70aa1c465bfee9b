//! Cubic Tac-Toe - terminal front end
//!
//! Plays N×N×N tic-tac-toe on stdin/stdout.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use cubic_core::Difficulty;
use cubic_tactoe::{CatalogReport, FirstPlayer, GameConfig, GameEvent, play_session, shared_input};
use std::io::BufRead;
use std::path::PathBuf;
use tokio::sync::mpsc;
use tracing::{debug, info, instrument};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so they never mix with the board on stdout
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            config,
            size,
            difficulty,
            first,
            seed,
            computers_only,
            delay_ms,
        } => {
            let overrides = Overrides {
                size,
                difficulty,
                first,
                computers_only,
                delay_ms,
            };
            run_play(config, overrides, seed).await
        }
        Command::Lines { size } => {
            println!("{}", CatalogReport::build(size)?);
            Ok(())
        }
    }
}

/// Command-line values that replace config file values.
#[derive(Debug)]
struct Overrides {
    size: Option<usize>,
    difficulty: Option<Difficulty>,
    first: Option<FirstPlayer>,
    computers_only: bool,
    delay_ms: Option<u64>,
}

#[instrument]
fn load_config(path: Option<PathBuf>, overrides: Overrides) -> Result<GameConfig> {
    let mut config = match path {
        Some(path) => GameConfig::from_file(path)?,
        None => GameConfig::default(),
    };

    if let Some(size) = overrides.size {
        config = config.with_board_size(size);
    }
    if let Some(difficulty) = overrides.difficulty {
        config = config.with_difficulty(difficulty);
    }
    if let Some(first) = overrides.first {
        config = config.with_first_player(first);
    }
    if let Some(delay_ms) = overrides.delay_ms {
        config = config.with_computer_delay_ms(delay_ms);
    }
    if overrides.computers_only {
        config = config.computers_only();
    }

    config.validate()?;
    debug!(?config, "Effective config");
    Ok(config)
}

/// Play games on stdin/stdout.
async fn run_play(path: Option<PathBuf>, overrides: Overrides, seed: Option<u64>) -> Result<()> {
    let config = load_config(path, overrides)?;
    info!(size = config.board_size(), "Starting cubic tac-toe");

    // stdin lines feed every human seat; a plain thread so a pending read
    // never holds up runtime shutdown
    let (line_tx, line_rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if line_tx.send(line).is_err() {
                break;
            }
        }
    });

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    let result = play_session(&config, seed, shared_input(line_rx), event_tx).await;
    printer.await?;

    let outcomes = result?;
    info!(games = outcomes.len(), "Session over");
    Ok(())
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::Started { first } => println!("{} goes first!", first),
        GameEvent::Turn {
            player,
            is_computer: true,
        } => println!("{} is thinking...", player),
        GameEvent::Turn { player, .. } => println!("{}'s turn. Enter a cell as x y z:", player),
        GameEvent::Board(board) => print!("{}", board),
        GameEvent::InvalidInput { player, reason } => println!("{}: {}", player, reason),
        GameEvent::Rejected {
            player,
            coord,
            reason,
        } => println!("{} cannot take {}: {}", player, coord, reason),
        GameEvent::MoveMade { player, coord } => println!("{} takes {}", player, coord),
        GameEvent::GameOver { line, message, .. } => {
            if !line.is_empty() {
                let cells = line
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(" ");
                println!("Winning line: {}", cells);
            }
            println!("{}", message);
        }
        GameEvent::RematchOffered => println!("Play again? [y/N]"),
    }
}
