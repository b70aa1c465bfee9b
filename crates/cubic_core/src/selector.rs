//! Computer move selection.
//!
//! Every winnable line gets a score: a major weight from the priority table
//! below, scaled by [`MAJOR_SCALE`], plus a minor weight equal to the sum of
//! its cells' weights. The best line wins, then the heaviest unclaimed cell
//! in it. Lines and cells are visited in a fresh random order on every call
//! so equal scores do not always resolve to the lowest index.
//!
//! Priorities, best first, where "near win" means one cell short of a full
//! line (three cells on a 4×4×4 board):
//!
//! | line                       | hard | easy |
//! |----------------------------|------|------|
//! | near win, mover leads      | 6    | 6    |
//! | near win, opponent leads   | 5    | 4    |
//! | two or more, anyone leads  | 4    | 4    |
//! | one cell, mover leads      | 3    | 2    |
//! | empty                      | 2    | 1    |
//! | one cell, opponent leads   | 1    | 2    |
//!
//! Blocked lines score 0 and are never picked.

use super::board::Board;
use super::lines::{Line, LineCatalog};
use super::rules::{LineStatus, RulesError, classify, ensure_fits};
use super::types::{Coord, PlayerId, Square};
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, trace};

/// Multiplier applied to the major weight so the minor weight only breaks ties.
pub const MAJOR_SCALE: u32 = 100;

/// How carefully the computer plays.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Only tells its own near wins apart; otherwise counts cells.
    Easy,
    /// Blocks opposing near wins and prefers lines it already leads.
    #[default]
    Hard,
}

/// Priority of a line for `player`, before scaling.
///
/// Returns 0 for a blocked line.
pub fn major_weight(
    status: &LineStatus,
    player: PlayerId,
    difficulty: Difficulty,
    size: usize,
) -> u32 {
    if !status.is_winnable() {
        return 0;
    }

    let taken = status.cells_taken();
    let mine = status.owner() == Some(player);
    let near_win = size.saturating_sub(1).max(1);

    match difficulty {
        Difficulty::Easy => {
            if taken == near_win && mine {
                6
            } else if taken > 1 {
                4
            } else if taken == 1 {
                2
            } else {
                1
            }
        }
        Difficulty::Hard => {
            if taken == near_win && mine {
                6
            } else if taken == near_win {
                5
            } else if (2..near_win).contains(&taken) {
                4
            } else if taken == 1 && mine {
                3
            } else if taken == 0 {
                2
            } else {
                1
            }
        }
    }
}

/// Full score of a line for `player`: scaled major weight plus cell weights.
///
/// Blocked lines score 0, minor weight included.
pub fn line_score(
    board: &Board,
    catalog: &LineCatalog,
    line: &Line,
    player: PlayerId,
    difficulty: Difficulty,
) -> Result<u32, RulesError> {
    let status = classify(board, line)?;
    if !status.is_winnable() {
        return Ok(0);
    }

    let major = major_weight(&status, player, difficulty, board.size());
    Ok(major * MAJOR_SCALE + catalog.line_weight(line))
}

/// Picks the cell `player` should claim next.
///
/// The board is not modified; the caller commits the returned cell.
///
/// # Errors
///
/// Returns [`RulesError::NoWinnableLine`] when every line is blocked, which
/// means the game is already over and the caller skipped the game-over check.
#[instrument(skip(board, catalog, rng), fields(player = %player))]
pub fn choose_cell<R>(
    board: &Board,
    catalog: &LineCatalog,
    player: PlayerId,
    difficulty: Difficulty,
    rng: &mut R,
) -> Result<Coord, RulesError>
where
    R: Rng + ?Sized,
{
    ensure_fits(board, catalog)?;

    let mut order: Vec<usize> = (0..catalog.len()).collect();
    order.shuffle(rng);

    let mut best_score = 0;
    let mut best: Option<(usize, Vec<Coord>)> = None;

    for index in order {
        let line = &catalog.lines()[index];
        let score = line_score(board, catalog, line, player, difficulty)?;
        trace!(line = index, score, "Scored line");

        if score > best_score {
            best_score = score;
            let mut cells = line.cells().to_vec();
            cells.shuffle(rng);
            best = Some((index, cells));
        }
    }

    let (line, cells) = best.ok_or(RulesError::NoWinnableLine)?;

    let mut best_weight = 0;
    let mut chosen = None;
    for coord in cells {
        if board.get(coord) != Some(Square::Empty) {
            continue;
        }
        let weight = catalog.weight(coord).unwrap_or(0);
        if weight > best_weight {
            best_weight = weight;
            chosen = Some(coord);
        }
    }

    let coord = chosen.ok_or(RulesError::NoOpenCell { line })?;
    debug!(line, score = best_score, cell = %coord, "Chose cell");
    Ok(coord)
}
