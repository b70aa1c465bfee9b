//! Tests for line catalog construction.

use cubic_core::{Board, CatalogError, Coord, LineCatalog, LineKind, line_count};
use std::collections::HashSet;

#[test]
fn test_line_count_checkpoints() {
    for (size, expected) in [(3, 49), (4, 76), (5, 109)] {
        let catalog = LineCatalog::build(size).expect("Valid size");
        assert_eq!(catalog.len(), expected, "size {}", size);
        assert_eq!(line_count(size), expected);
        assert_eq!(line_count(size), 3 * size * size + 6 * size + 4);
    }
}

#[test]
fn test_every_line_spans_the_board() {
    let catalog = LineCatalog::build(4).expect("Valid size");
    for line in catalog.lines() {
        assert_eq!(line.len(), 4);
        assert!(line.cells().iter().all(|c| c.is_within(4)));
    }
}

#[test]
fn test_no_duplicate_lines() {
    let catalog = LineCatalog::build(5).expect("Valid size");
    let distinct: HashSet<Vec<Coord>> = catalog
        .lines()
        .iter()
        .map(|line| {
            let mut cells = line.cells().to_vec();
            cells.sort();
            cells
        })
        .collect();
    assert_eq!(distinct.len(), catalog.len());
}

#[test]
fn test_weight_census_standard_board() {
    let catalog = LineCatalog::build(4).expect("Valid size");
    let sevens: Vec<Coord> = Board::new(4)
        .coords()
        .filter(|c| catalog.weight(*c) == Some(7))
        .collect();

    assert_eq!(sevens.len(), 16);
    assert!(sevens.contains(&Coord::new(0, 0, 0)));
    assert!(sevens.contains(&Coord::new(3, 3, 3)));
    assert!(sevens.contains(&Coord::new(1, 2, 1)));
    assert_eq!(catalog.weight(Coord::new(1, 0, 0)), Some(4));
    assert_eq!(catalog.weights().iter().sum::<u32>(), 304);
}

#[test]
fn test_centre_of_odd_board_is_heaviest() {
    let catalog = LineCatalog::build(3).expect("Valid size");
    let max = catalog.weights().iter().copied().max();
    assert_eq!(catalog.weight(Coord::new(1, 1, 1)), Some(13));
    assert_eq!(max, Some(13));
}

#[test]
fn test_space_diagonals_are_last() {
    let catalog = LineCatalog::build(4).expect("Valid size");
    let tail: Vec<LineKind> = catalog.lines()[72..].iter().map(|l| l.kind()).collect();
    assert_eq!(tail, vec![LineKind::SpaceDiagonal; 4]);
    assert_eq!(
        catalog.lines()[72].cells(),
        &[
            Coord::new(0, 0, 0),
            Coord::new(1, 1, 1),
            Coord::new(2, 2, 2),
            Coord::new(3, 3, 3)
        ]
    );
}

#[test]
fn test_too_small_board_is_rejected() {
    assert_eq!(LineCatalog::build(0).unwrap_err(), CatalogError::BoardTooSmall(0));
    assert_eq!(LineCatalog::build(1).unwrap_err(), CatalogError::BoardTooSmall(1));
}

#[test]
fn test_catalog_fits_only_its_board_size() {
    let catalog = LineCatalog::build(4).expect("Valid size");
    assert!(catalog.fits(&Board::new(4)));
    assert!(!catalog.fits(&Board::new(3)));
}
