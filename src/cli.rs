//! Command-line interface for cubic_tactoe.

use clap::{Parser, Subcommand};
use cubic_core::Difficulty;
use cubic_tactoe::FirstPlayer;
use std::path::PathBuf;

/// Cubic Tac-Toe - claim a straight line through the cube
#[derive(Parser, Debug)]
#[command(name = "cubic_tactoe")]
#[command(about = "N×N×N tic-tac-toe against humans or computers", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a game in the terminal
    Play {
        /// Path to a game config file
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Side length of the cube
        #[arg(short, long)]
        size: Option<usize>,

        /// Computer difficulty (easy or hard)
        #[arg(short, long)]
        difficulty: Option<Difficulty>,

        /// Opening player: "coin-toss" or a player number
        #[arg(long)]
        first: Option<FirstPlayer>,

        /// Seed for computer players and the coin toss
        #[arg(long)]
        seed: Option<u64>,

        /// Let the computer take every seat
        #[arg(long)]
        computers_only: bool,

        /// Computer thinking pause in milliseconds
        #[arg(long)]
        delay_ms: Option<u64>,
    },

    /// Print the line catalog summary for a board size
    Lines {
        /// Side length of the cube
        #[arg(short, long, default_value = "4")]
        size: usize,
    },
}
