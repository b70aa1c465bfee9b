//! Cubic Core - pure game logic for N×N×N tic-tac-toe
//!
//! Players take turns claiming cells of a cube; the first to own every
//! cell of a straight line wins. This crate holds the board, the catalog
//! of winnable lines, the rules that classify lines and decide the game,
//! and the computer move selector.
//!
//! # Architecture
//!
//! - **Catalog**: every straight line of the cube, built once per size
//! - **Rules**: line classification, win detection, game over detection
//! - **Selector**: weighted line scoring for computer players
//! - **Typestate**: setup, in-progress and finished phases with contracts
//!
//! # Example
//!
//! ```
//! use cubic_core::{Coord, GameResult, GameSetup, PlayerId};
//!
//! let game = GameSetup::new(4, 2)?.start(PlayerId::ONE)?;
//! match game.place(Coord::new(0, 0, 0))? {
//!     GameResult::InProgress(game) => assert_eq!(game.history().len(), 1),
//!     GameResult::Finished(_) => unreachable!(),
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod action;
mod board;
mod lines;
mod phases;
mod selector;
mod types;
mod typestate;

// Public modules
pub mod contracts;
pub mod invariants;
pub mod rules;

// Crate-level exports - Primitive types
pub use types::{Coord, ParseCoordError, PlayerId, Square};

// Crate-level exports - Board and lines
pub use board::Board;
pub use lines::{CatalogError, Line, LineCatalog, LineKind, MIN_BOARD_SIZE, line_count};

// Crate-level exports - Rules
pub use rules::{
    LineStatus, RulesError, classify, find_winning_line, is_draw, is_game_over, winner,
};

// Crate-level exports - Move selection
pub use selector::{Difficulty, MAJOR_SCALE, choose_cell, line_score, major_weight};

// Crate-level exports - Game phases
pub use action::{Move, MoveError};
pub use phases::Outcome;
pub use typestate::{
    GameFinished, GameInProgress, GameResult, GameSetup, MAX_PLAYERS, ReplayError, SetupError,
};
