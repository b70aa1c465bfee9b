//! Cubic Tac-Toe - terminal play for N×N×N tic-tac-toe
//!
//! This library seats human and computer players around a
//! [`cubic_core`] game and drives it turn by turn.
//!
//! # Architecture
//!
//! - **Config**: board size, difficulty and roster from TOML
//! - **Players**: humans typing cells, computers using the line selector
//! - **Orchestrator**: turn loop that reports progress as [`GameEvent`]s
//! - **Session**: rematches with the same roster
//!
//! # Example
//!
//! ```no_run
//! use cubic_tactoe::{GameConfig, play_session, shared_input};
//! use tokio::sync::mpsc;
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = GameConfig::default().computers_only();
//! let (_line_tx, line_rx) = mpsc::unbounded_channel();
//! let (event_tx, _event_rx) = mpsc::unbounded_channel();
//!
//! let outcomes = play_session(&config, Some(7), shared_input(line_rx), event_tx).await?;
//! assert_eq!(outcomes.len(), 1);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod orchestrator;
mod players;
mod report;
mod session;

// Crate-level exports - Configuration
pub use config::{ConfigError, FirstPlayer, GameConfig, MAX_BOARD_SIZE, PlayerKind, PlayerProfile};

// Crate-level exports - Players
pub use players::{ComputerPlayer, HumanPlayer, Player, SharedInput, roster, shared_input};

// Crate-level exports - Orchestration
pub use orchestrator::{GameEvent, Orchestrator};
pub use session::play_session;

// Crate-level exports - Diagnostics
pub use report::CatalogReport;
