//! Game configuration loaded from TOML.

use cubic_core::{Difficulty, GameSetup, MAX_PLAYERS, MIN_BOARD_SIZE, PlayerId};
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use derive_setters::Setters;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info, instrument, warn};

/// Largest supported board side.
///
/// From side 8 up, the summed cell weights of a line can exceed the ×100
/// major tier.
pub const MAX_BOARD_SIZE: usize = 7;

/// Who controls a seat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum PlayerKind {
    /// Moves are read from input.
    Human,
    /// Moves come from the weighted-line selector.
    Computer,
}

/// A seat in the roster.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct PlayerProfile {
    /// Display name.
    name: String,
    /// Human or computer.
    kind: PlayerKind,
}

/// Who moves first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "FirstPlayerRepr", into = "FirstPlayerRepr")]
pub enum FirstPlayer {
    /// Pick uniformly among the seated players.
    CoinToss,
    /// A fixed seat.
    Player(PlayerId),
}

impl FirstPlayer {
    /// Resolves the opening player for `setup`.
    pub fn resolve<R: Rng + ?Sized>(self, setup: &GameSetup, rng: &mut R) -> PlayerId {
        match self {
            FirstPlayer::Player(player) => player,
            FirstPlayer::CoinToss => setup.coin_toss(rng),
        }
    }
}

impl Default for FirstPlayer {
    fn default() -> Self {
        FirstPlayer::Player(PlayerId::ONE)
    }
}

impl std::fmt::Display for FirstPlayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FirstPlayer::CoinToss => write!(f, "coin-toss"),
            FirstPlayer::Player(player) => write!(f, "{}", player.index()),
        }
    }
}

impl FromStr for FirstPlayer {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("coin-toss") {
            return Ok(FirstPlayer::CoinToss);
        }
        s.parse::<u8>()
            .ok()
            .and_then(PlayerId::new)
            .map(FirstPlayer::Player)
            .ok_or_else(|| format!("expected \"coin-toss\" or a player number, got \"{}\"", s))
    }
}

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum FirstPlayerRepr {
    Number(u8),
    Text(String),
}

impl TryFrom<FirstPlayerRepr> for FirstPlayer {
    type Error = String;

    fn try_from(repr: FirstPlayerRepr) -> Result<Self, Self::Error> {
        match repr {
            FirstPlayerRepr::Number(n) => PlayerId::new(n)
                .map(FirstPlayer::Player)
                .ok_or_else(|| "player numbers start at 1".to_string()),
            FirstPlayerRepr::Text(s) => s.parse(),
        }
    }
}

impl From<FirstPlayer> for FirstPlayerRepr {
    fn from(first: FirstPlayer) -> Self {
        match first {
            FirstPlayer::CoinToss => FirstPlayerRepr::Text(first.to_string()),
            FirstPlayer::Player(player) => FirstPlayerRepr::Number(player.index()),
        }
    }
}

/// Configuration for one game.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Setters, Serialize, Deserialize)]
#[setters(prefix = "with_")]
pub struct GameConfig {
    /// Side length of the cube.
    #[serde(default = "default_board_size")]
    board_size: usize,

    /// Computer difficulty.
    #[serde(default)]
    difficulty: Difficulty,

    /// Who opens the game.
    #[serde(default)]
    first_player: FirstPlayer,

    /// Pause before a computer commits its move, in milliseconds.
    #[serde(default = "default_computer_delay_ms")]
    computer_delay_ms: u64,

    /// Seats, in turn order.
    #[serde(default = "default_players")]
    players: Vec<PlayerProfile>,
}

#[instrument]
fn default_board_size() -> usize {
    4
}

#[instrument]
fn default_computer_delay_ms() -> u64 {
    500
}

#[instrument]
fn default_players() -> Vec<PlayerProfile> {
    vec![
        PlayerProfile::new("Player 1".to_string(), PlayerKind::Human),
        PlayerProfile::new("Player 2".to_string(), PlayerKind::Computer),
    ]
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_size: default_board_size(),
            difficulty: Difficulty::default(),
            first_player: FirstPlayer::default(),
            computer_delay_ms: default_computer_delay_ms(),
            players: default_players(),
        }
    }
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;

        let config = Self::from_toml(&content)?;
        info!(
            board_size = config.board_size,
            players = config.players.len(),
            "Config loaded successfully"
        );
        Ok(config)
    }

    /// Parses and validates configuration from TOML text.
    #[instrument(skip(content))]
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)
            .map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every field against its supported range.
    #[instrument(skip(self))]
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(MIN_BOARD_SIZE..=MAX_BOARD_SIZE).contains(&self.board_size) {
            warn!(board_size = self.board_size, "Board size out of range");
            return Err(ConfigError::new(format!(
                "board_size must be between {} and {}, got {}",
                MIN_BOARD_SIZE, MAX_BOARD_SIZE, self.board_size
            )));
        }

        let seats = self.players.len();
        if !(2..=usize::from(MAX_PLAYERS)).contains(&seats) {
            warn!(seats, "Roster size out of range");
            return Err(ConfigError::new(format!(
                "a game needs 2 to {} players, got {}",
                MAX_PLAYERS, seats
            )));
        }

        if let FirstPlayer::Player(player) = self.first_player {
            if usize::from(player.index()) > seats {
                return Err(ConfigError::new(format!(
                    "first_player {} is not seated among {} players",
                    player.index(),
                    seats
                )));
            }
        }

        if self.players.iter().any(|p| p.name.trim().is_empty()) {
            return Err(ConfigError::new("player names must not be blank".to_string()));
        }

        Ok(())
    }

    /// Number of seats, as a player count.
    pub fn num_players(&self) -> u8 {
        u8::try_from(self.players.len()).unwrap_or(u8::MAX)
    }

    /// Profile of the given player.
    pub fn profile(&self, player: PlayerId) -> Option<&PlayerProfile> {
        self.players.get(usize::from(player.index()) - 1)
    }

    /// Turns every seat over to the computer.
    pub fn computers_only(mut self) -> Self {
        for profile in &mut self.players {
            profile.kind = PlayerKind::Computer;
        }
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
