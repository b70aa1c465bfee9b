//! Game-over and draw detection.

use super::super::board::Board;
use super::super::lines::LineCatalog;
use super::{RulesError, classify, ensure_fits, winner};
use tracing::instrument;

/// Checks whether the game has ended by a win or a draw.
///
/// The game is over once a line is complete, or once no line can be won
/// by anyone. The scan stops at the first still-winnable line.
#[instrument(skip_all)]
pub fn is_game_over(board: &Board, catalog: &LineCatalog) -> Result<bool, RulesError> {
    if winner(board, catalog)?.is_some() {
        return Ok(true);
    }
    Ok(!any_winnable(board, catalog)?)
}

/// Returns true if some line can still be won. Stops at the first one.
pub(super) fn any_winnable(board: &Board, catalog: &LineCatalog) -> Result<bool, RulesError> {
    for line in catalog.lines() {
        if classify(board, line)?.is_winnable() {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Checks for a draw: every line is blocked and none is complete.
///
/// The board does not need to be full; play stops as soon as nobody can win.
#[instrument(skip_all)]
pub fn is_draw(board: &Board, catalog: &LineCatalog) -> Result<bool, RulesError> {
    ensure_fits(board, catalog)?;
    Ok(is_game_over(board, catalog)? && winner(board, catalog)?.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Coord, PlayerId, Square};

    /// A full two-player 4×4×4 board with no line owned by a single player.
    ///
    /// One string per layer, rows of four cells from y=0.
    const DRAWN: [&str; 4] = [
        "1121211222212111",
        "2111122112221221",
        "1221111222121212",
        "2212212121221112",
    ];

    fn p(index: u8) -> PlayerId {
        PlayerId::new(index).unwrap()
    }

    fn drawn_board() -> Board {
        let mut board = Board::new(4);
        for (z, layer) in DRAWN.iter().enumerate() {
            for (i, owner) in layer.bytes().enumerate() {
                let coord = Coord::new(i % 4, i / 4, z);
                board
                    .set(coord, Square::Occupied(p(owner - b'0')))
                    .unwrap();
            }
        }
        board
    }

    #[test]
    fn test_empty_board_not_over() {
        let catalog = LineCatalog::build(4).unwrap();
        let board = Board::new(4);
        assert_eq!(is_game_over(&board, &catalog), Ok(false));
        assert_eq!(is_draw(&board, &catalog), Ok(false));
    }

    #[test]
    fn test_win_is_game_over_not_draw() {
        let catalog = LineCatalog::build(4).unwrap();
        let mut board = Board::new(4);
        for x in 0..4 {
            board.set(Coord::new(x, 1, 2), Square::Occupied(p(1))).unwrap();
        }
        assert_eq!(is_game_over(&board, &catalog), Ok(true));
        assert_eq!(is_draw(&board, &catalog), Ok(false));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        let catalog = LineCatalog::build(4).unwrap();
        let board = drawn_board();
        assert!(board.is_full());
        assert!(
            catalog
                .lines()
                .iter()
                .all(|line| !classify(&board, line).unwrap().is_winnable())
        );
        assert_eq!(is_game_over(&board, &catalog), Ok(true));
        assert_eq!(is_draw(&board, &catalog), Ok(true));
    }

    #[test]
    fn test_blocked_before_full_is_draw() {
        let catalog = LineCatalog::build(4).unwrap();
        let mut board = drawn_board();
        // every line through this cell still holds both players
        board.set(Coord::new(1, 0, 0), Square::Empty).unwrap();
        assert!(!board.is_full());
        assert_eq!(is_draw(&board, &catalog), Ok(true));
    }

    #[test]
    fn test_every_pair_shared_is_draw() {
        // eight players, one cell each: every line of a 2×2×2 board joins two owners
        let catalog = LineCatalog::build(2).unwrap();
        let mut board = Board::new(2);
        let coords: Vec<Coord> = board.coords().collect();
        for (i, coord) in coords.into_iter().enumerate() {
            board
                .set(coord, Square::Occupied(p(i as u8 + 1)))
                .unwrap();
        }
        assert_eq!(is_draw(&board, &catalog), Ok(true));
    }

    #[test]
    fn test_one_open_line_keeps_game_going() {
        let catalog = LineCatalog::build(4).unwrap();
        let mut board = drawn_board();
        // reopening a whole row makes that row winnable again
        for x in 0..4 {
            board.set(Coord::new(x, 0, 0), Square::Empty).unwrap();
        }
        assert_eq!(is_game_over(&board, &catalog), Ok(false));
    }

    #[test]
    fn test_outcome_reports_open_win_and_draw() {
        use crate::phases::Outcome;
        use crate::rules::outcome;

        let catalog = LineCatalog::build(4).unwrap();
        assert_eq!(outcome(&Board::new(4), &catalog), Ok(None));
        assert_eq!(outcome(&drawn_board(), &catalog), Ok(Some(Outcome::Draw)));

        let mut board = Board::new(4);
        for x in 0..4 {
            board.set(Coord::new(x, 1, 2), Square::Occupied(p(2))).unwrap();
        }
        let (_, index) = winner(&board, &catalog).unwrap().unwrap();
        assert_eq!(
            outcome(&board, &catalog),
            Ok(Some(Outcome::Winner {
                player: p(2),
                line: index
            }))
        );
    }
}
