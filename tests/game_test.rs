//! End-to-end tests for the game lifecycle and computer play.

use cubic_core::{
    Board, Coord, Difficulty, GameFinished, GameInProgress, GameResult, GameSetup, LineCatalog,
    Move, MoveError, Outcome, PlayerId, Square, choose_cell, find_winning_line, is_game_over,
};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn p(index: u8) -> PlayerId {
    PlayerId::new(index).expect("Non-zero player")
}

/// Lets the selector play every seat until the game ends.
fn autoplay(mut game: GameInProgress, difficulty: Difficulty, seed: u64) -> GameFinished {
    let mut rng = StdRng::seed_from_u64(seed);
    loop {
        let coord = game.choose_cell(difficulty, &mut rng).expect("Open cell");
        match game.place(coord).expect("Legal move") {
            GameResult::InProgress(next) => game = next,
            GameResult::Finished(finished) => return finished,
        }
    }
}

#[test]
fn test_selector_completes_own_line() {
    let catalog = LineCatalog::build(4).expect("Valid size");
    let mut board = Board::new(4);
    for coord in [Coord::new(0, 0, 0), Coord::new(1, 1, 0), Coord::new(2, 2, 0)] {
        board.set(coord, Square::Occupied(p(1))).expect("On board");
    }

    for seed in 0..10 {
        let mut rng = StdRng::seed_from_u64(seed);
        let coord = choose_cell(&board, &catalog, p(1), Difficulty::Hard, &mut rng)
            .expect("Open cell");
        assert_eq!(coord, Coord::new(3, 3, 0));
    }
}

#[test]
fn test_winning_move_finishes_game() {
    let moves = [
        Move::new(p(1), Coord::new(0, 0, 0)),
        Move::new(p(2), Coord::new(0, 3, 3)),
        Move::new(p(1), Coord::new(1, 1, 0)),
        Move::new(p(2), Coord::new(3, 0, 3)),
        Move::new(p(1), Coord::new(2, 2, 0)),
        Move::new(p(2), Coord::new(1, 2, 3)),
    ];
    let setup = GameSetup::new(4, 2).expect("Valid setup");
    let game = match GameInProgress::replay(setup, p(1), &moves).expect("Legal history") {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("No line is complete yet"),
    };

    let mut rng = StdRng::seed_from_u64(3);
    let coord = game.choose_cell(Difficulty::Hard, &mut rng).expect("Open cell");
    assert_eq!(coord, Coord::new(3, 3, 0));

    let finished = match game.place(coord).expect("Legal move") {
        GameResult::Finished(f) => f,
        GameResult::InProgress(_) => panic!("Diagonal should be complete"),
    };
    assert_eq!(finished.outcome().winner(), Some(p(1)));
    let line = finished.winning_line().expect("Winning line");
    assert!(line.contains(Coord::new(3, 3, 0)));
    assert!(line.contains(Coord::new(0, 0, 0)));
}

#[test]
fn test_computer_blocks_opponent() {
    let catalog = LineCatalog::build(4).expect("Valid size");
    let mut board = Board::new(4);
    for coord in [Coord::new(0, 1, 0), Coord::new(1, 1, 0), Coord::new(2, 1, 0)] {
        board.set(coord, Square::Occupied(p(2))).expect("On board");
    }
    board
        .set(Coord::new(3, 3, 3), Square::Occupied(p(1)))
        .expect("On board");

    let mut rng = StdRng::seed_from_u64(11);
    let coord = choose_cell(&board, &catalog, p(1), Difficulty::Hard, &mut rng).expect("Open cell");
    assert_eq!(coord, Coord::new(3, 1, 0));
}

#[test]
fn test_two_by_two_first_player_wins_on_second_move() {
    // every pair of cells on a 2×2×2 board is a line
    let game = GameSetup::new(2, 2).expect("Valid setup").start(p(1)).expect("Seated");
    let finished = autoplay(game, Difficulty::Hard, 5);

    assert_eq!(finished.history().len(), 3);
    assert_eq!(finished.outcome().winner(), Some(p(1)));
}

#[test]
fn test_eight_players_on_tiny_board_draw() {
    let game = GameSetup::new(2, 8).expect("Valid setup").start(p(1)).expect("Seated");
    let finished = autoplay(game, Difficulty::Easy, 9);

    assert_eq!(*finished.outcome(), Outcome::Draw);
    assert_eq!(finished.history().len(), 8);
    assert!(finished.board().is_full());
}

#[test]
fn test_self_play_ends_consistently() {
    for (size, players, seed) in [(3, 2, 1), (4, 2, 2), (4, 3, 3), (5, 4, 4)] {
        for difficulty in [Difficulty::Easy, Difficulty::Hard] {
            let game = GameSetup::new(size, players)
                .expect("Valid setup")
                .start(p(1))
                .expect("Seated");
            let finished = autoplay(game, difficulty, seed);
            let catalog = LineCatalog::build(size).expect("Valid size");

            assert!(is_game_over(finished.board(), &catalog).expect("Matching board"));
            match finished.outcome() {
                Outcome::Winner { player, .. } => {
                    let line = find_winning_line(finished.board(), &catalog)
                        .expect("Matching board")
                        .expect("Completed line");
                    assert!(line.cells().iter().all(|c| {
                        finished.board().get(*c) == Some(Square::Occupied(*player))
                    }));
                    let last = finished.history().last().expect("At least one move");
                    assert_eq!(last.player, *player);
                }
                Outcome::Draw => {
                    assert!(
                        find_winning_line(finished.board(), &catalog)
                            .expect("Matching board")
                            .is_none()
                    );
                }
            }
        }
    }
}

#[test]
fn test_restart_clears_board_and_keeps_seats() {
    let game = GameSetup::new(3, 3).expect("Valid setup").start(p(2)).expect("Seated");
    let finished = autoplay(game, Difficulty::Hard, 21);

    let setup = finished.restart();
    assert_eq!(setup.num_players(), 3);
    assert!(setup.board().squares().iter().all(|s| *s == Square::Empty));

    let game = setup.start(p(3)).expect("Seated");
    assert_eq!(game.to_move(), p(3));
    assert!(game.history().is_empty());
}

#[test]
fn test_illegal_moves_are_rejected() {
    let game = GameSetup::new(4, 2).expect("Valid setup").start(p(1)).expect("Seated");
    let game = match game.place(Coord::new(1, 1, 1)).expect("Legal move") {
        GameResult::InProgress(g) => g,
        GameResult::Finished(_) => panic!("One move cannot win"),
    };

    let open = game.valid_moves();
    assert_eq!(open.len(), 63);
    assert!(!open.contains(&Coord::new(1, 1, 1)));

    assert_eq!(
        game.check(&Move::new(p(2), Coord::new(1, 1, 1))),
        Err(MoveError::SquareOccupied(Coord::new(1, 1, 1)))
    );
    assert_eq!(
        game.check(&Move::new(p(1), Coord::new(0, 0, 0))),
        Err(MoveError::WrongPlayer(p(1)))
    );
    assert_eq!(
        game.check(&Move::new(p(2), Coord::new(0, 0, 4))),
        Err(MoveError::OutOfBounds(Coord::new(0, 0, 4)))
    );
}
