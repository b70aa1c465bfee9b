//! Catalog of every winning line on a cubic board.
//!
//! A cube of side N has `3N² + 6N + 4` straight lines of N cells:
//!
//! - each horizontal layer has N columns, N rows and 2 diagonals,
//! - N² vertical lines rise through the layers,
//! - the 2N vertical planes parallel to the sides each add 2 diagonals,
//! - 4 space diagonals join opposite corners of the cube.
//!
//! That is 76 lines for the standard 4×4×4 game, 49 for 3×3×3 and 109 for
//! 5×5×5. While lines are built every cell's weight counts the lines it
//! belongs to.

use super::board::Board;
use super::types::Coord;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::{debug, instrument};

/// Smallest board for which every line is distinct.
pub const MIN_BOARD_SIZE: usize = 2;

/// Geometric family a line was enumerated from.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, strum::Display,
)]
#[strum(serialize_all = "snake_case")]
pub enum LineKind {
    /// Runs along y within one layer.
    LayerColumn,
    /// Runs along x within one layer.
    LayerRow,
    /// Main or anti diagonal of one layer.
    LayerDiagonal,
    /// Runs along z through every layer.
    Vertical,
    /// Diagonal in a vertical plane of constant x.
    PlaneDiagonalX,
    /// Diagonal in a vertical plane of constant y.
    PlaneDiagonalY,
    /// Corner to opposite corner through the middle of the cube.
    SpaceDiagonal,
}

impl LineKind {
    /// Number of lines of this kind on a board of side `size`.
    pub const fn count(self, size: usize) -> usize {
        match self {
            LineKind::LayerColumn | LineKind::LayerRow | LineKind::Vertical => size * size,
            LineKind::LayerDiagonal | LineKind::PlaneDiagonalX | LineKind::PlaneDiagonalY => {
                2 * size
            }
            LineKind::SpaceDiagonal => 4,
        }
    }
}

/// Total number of lines on a board of side `size`.
pub fn line_count(size: usize) -> usize {
    LineKind::iter().map(|kind| kind.count(size)).sum()
}

/// An ordered run of cells that wins the game when one player owns them all.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line {
    kind: LineKind,
    cells: Box<[Coord]>,
}

impl Line {
    pub(crate) fn new(kind: LineKind, cells: impl Into<Box<[Coord]>>) -> Self {
        Self {
            kind,
            cells: cells.into(),
        }
    }

    /// Geometric family of the line.
    pub fn kind(&self) -> LineKind {
        self.kind
    }

    /// Cells of the line in enumeration order.
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    /// Number of cells in the line.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the line has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Returns true if the line passes through `coord`.
    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

impl std::fmt::Display for Line {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let cells = self
            .cells
            .iter()
            .map(Coord::to_string)
            .collect::<Vec<_>>()
            .join(" ");
        write!(f, "{} {}", self.kind, cells)
    }
}

/// Error building a catalog.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum CatalogError {
    /// Below size 2 the line families collapse into duplicates.
    #[display("Board size {} is too small (minimum {})", _0, MIN_BOARD_SIZE)]
    BoardTooSmall(usize),
}

impl std::error::Error for CatalogError {}

/// The fixed set of winning lines for one board size, plus cell weights.
///
/// Built once per board size and shared by every game of that size. The
/// weight of a cell is the number of lines passing through it; it depends
/// only on the board size, so it lives here rather than on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "CatalogData")]
pub struct LineCatalog {
    size: usize,
    lines: Box<[Line]>,
    weights: Box<[u32]>,
}

/// Unchecked wire form of a [`LineCatalog`].
#[derive(Deserialize)]
struct CatalogData {
    size: usize,
    lines: Vec<Line>,
    weights: Vec<u32>,
}

impl TryFrom<CatalogData> for LineCatalog {
    type Error = String;

    /// Accepts only the exact catalog `build` produces for the stored size.
    fn try_from(data: CatalogData) -> Result<Self, Self::Error> {
        let catalog = LineCatalog::build(data.size).map_err(|e| e.to_string())?;
        if *catalog.lines != *data.lines || *catalog.weights != *data.weights {
            return Err(format!(
                "stored lines do not match the catalog of a size {} board",
                data.size
            ));
        }
        Ok(catalog)
    }
}

impl LineCatalog {
    /// Enumerates every line of a board of side `size`.
    ///
    /// Lines are produced family by family in a fixed order: layer columns,
    /// layer rows, layer diagonals, verticals, x-plane diagonals, y-plane
    /// diagonals, space diagonals.
    #[instrument]
    pub fn build(size: usize) -> Result<Self, CatalogError> {
        if size < MIN_BOARD_SIZE {
            return Err(CatalogError::BoardTooSmall(size));
        }

        let mut builder = CatalogBuilder::new(size);
        let last = size - 1;

        for z in 0..size {
            for x in 0..size {
                builder.push(LineKind::LayerColumn, |y| Coord::new(x, y, z));
            }
        }

        for z in 0..size {
            for y in 0..size {
                builder.push(LineKind::LayerRow, |x| Coord::new(x, y, z));
            }
        }

        for z in 0..size {
            builder.push(LineKind::LayerDiagonal, |i| Coord::new(i, i, z));
            builder.push(LineKind::LayerDiagonal, |i| Coord::new(i, last - i, z));
        }

        for x in 0..size {
            for y in 0..size {
                builder.push(LineKind::Vertical, |z| Coord::new(x, y, z));
            }
        }

        for x in 0..size {
            builder.push(LineKind::PlaneDiagonalX, |i| Coord::new(x, i, i));
            builder.push(LineKind::PlaneDiagonalX, |i| Coord::new(x, i, last - i));
        }

        for y in 0..size {
            builder.push(LineKind::PlaneDiagonalY, |i| Coord::new(i, y, i));
            builder.push(LineKind::PlaneDiagonalY, |i| Coord::new(i, y, last - i));
        }

        builder.push(LineKind::SpaceDiagonal, |i| Coord::new(i, i, i));
        builder.push(LineKind::SpaceDiagonal, |i| Coord::new(i, i, last - i));
        builder.push(LineKind::SpaceDiagonal, |i| Coord::new(i, last - i, i));
        builder.push(LineKind::SpaceDiagonal, |i| Coord::new(last - i, i, i));

        let catalog = builder.finish();
        debug!(size, lines = catalog.len(), "Line catalog built");
        Ok(catalog)
    }

    /// Side length of the board the catalog was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// All lines in enumeration order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// Gets a line by its catalog index.
    pub fn line(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns true if the catalog has no lines.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of lines passing through `coord`, or `None` when off the board.
    ///
    /// On a 4×4×4 board the 8 corners of the cube and the 8 cells of the
    /// inner 2×2×2 cube lie on 7 lines each; every other cell lies on 4.
    pub fn weight(&self, coord: Coord) -> Option<u32> {
        coord
            .is_within(self.size)
            .then(|| (coord.z * self.size + coord.y) * self.size + coord.x)
            .and_then(|index| self.weights.get(index).copied())
    }

    /// Per-cell weights in board storage order.
    pub fn weights(&self) -> &[u32] {
        &self.weights
    }

    /// Sum of the weights of every cell in `line`.
    pub fn line_weight(&self, line: &Line) -> u32 {
        line.cells()
            .iter()
            .filter_map(|coord| self.weight(*coord))
            .sum()
    }

    /// Returns true if the catalog addresses the same cells as `board`.
    pub fn fits(&self, board: &Board) -> bool {
        self.size == board.size()
    }
}

/// Accumulates lines and bumps cell weights as cells are added.
struct CatalogBuilder {
    size: usize,
    lines: Vec<Line>,
    weights: Vec<u32>,
}

impl CatalogBuilder {
    fn new(size: usize) -> Self {
        Self {
            size,
            lines: Vec::with_capacity(line_count(size)),
            weights: vec![0; size * size * size],
        }
    }

    /// Adds one line whose i-th cell is `cell(i)`.
    fn push(&mut self, kind: LineKind, cell: impl Fn(usize) -> Coord) {
        let cells: Box<[Coord]> = (0..self.size).map(|i| self.add_cell(cell(i))).collect();
        self.lines.push(Line::new(kind, cells));
    }

    /// Every membership adds one to the cell's strategic weight.
    fn add_cell(&mut self, coord: Coord) -> Coord {
        self.weights[(coord.z * self.size + coord.y) * self.size + coord.x] += 1;
        coord
    }

    fn finish(self) -> LineCatalog {
        LineCatalog {
            size: self.size,
            lines: self.lines.into_boxed_slice(),
            weights: self.weights.into_boxed_slice(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeSet, HashSet};

    #[test]
    fn test_deserialize_rejects_inconsistent_catalog() {
        let err =
            toml::from_str::<LineCatalog>("size = 4\nlines = []\nweights = []").unwrap_err();
        assert!(err.to_string().contains("size 4"));
        assert!(toml::from_str::<LineCatalog>("size = 1\nlines = []\nweights = []").is_err());
    }

    #[test]
    fn test_catalog_survives_serialization() {
        let catalog = LineCatalog::build(3).unwrap();
        let text = toml::to_string(&catalog).unwrap();
        let restored: LineCatalog = toml::from_str(&text).unwrap();
        assert_eq!(restored, catalog);
        assert_eq!(restored.weight(Coord::new(1, 1, 1)), Some(13));
    }

    #[test]
    fn test_line_counts_match_known_checkpoints() {
        for (size, expected) in [(3, 49), (4, 76), (5, 109)] {
            let catalog = LineCatalog::build(size).unwrap();
            assert_eq!(catalog.len(), expected, "size {}", size);
            assert_eq!(line_count(size), expected);
        }
    }

    #[test]
    fn test_line_kind_counts_size_four() {
        let catalog = LineCatalog::build(4).unwrap();
        for kind in LineKind::iter() {
            let built = catalog.lines().iter().filter(|l| l.kind() == kind).count();
            assert_eq!(built, kind.count(4), "{}", kind);
        }
    }

    #[test]
    fn test_every_line_has_size_cells_on_board() {
        let catalog = LineCatalog::build(4).unwrap();
        for line in catalog.lines() {
            assert_eq!(line.len(), 4);
            assert!(line.cells().iter().all(|c| c.is_within(4)));
        }
    }

    #[test]
    fn test_lines_are_distinct_cell_sets() {
        for size in 2..=6 {
            let catalog = LineCatalog::build(size).unwrap();
            let sets: HashSet<BTreeSet<Coord>> = catalog
                .lines()
                .iter()
                .map(|line| line.cells().iter().copied().collect())
                .collect();
            assert_eq!(sets.len(), catalog.len(), "size {}", size);
        }
    }

    #[test]
    fn test_lines_have_no_repeated_cells() {
        let catalog = LineCatalog::build(4).unwrap();
        for line in catalog.lines() {
            let unique: HashSet<_> = line.cells().iter().collect();
            assert_eq!(unique.len(), line.len(), "{}", line);
        }
    }

    #[test]
    fn test_weight_invariant_size_four() {
        let catalog = LineCatalog::build(4).unwrap();
        let board = Board::new(4);
        let outer = |v: usize| v == 0 || v == 3;
        let inner = |v: usize| v == 1 || v == 2;

        for coord in board.coords() {
            let corner = outer(coord.x) && outer(coord.y) && outer(coord.z);
            let centre = inner(coord.x) && inner(coord.y) && inner(coord.z);
            let expected = if corner || centre { 7 } else { 4 };
            assert_eq!(catalog.weight(coord), Some(expected), "{}", coord);
        }

        assert_eq!(catalog.weights().iter().filter(|w| **w == 7).count(), 16);
        assert_eq!(catalog.weights().iter().filter(|w| **w == 4).count(), 48);
        assert_eq!(catalog.weights().iter().sum::<u32>(), 76 * 4);
    }

    #[test]
    fn test_weight_sum_matches_memberships() {
        for size in 2..=6 {
            let catalog = LineCatalog::build(size).unwrap();
            let total: u32 = catalog.weights().iter().sum();
            assert_eq!(total as usize, catalog.len() * size);
        }
    }

    #[test]
    fn test_weight_off_board() {
        let catalog = LineCatalog::build(4).unwrap();
        assert_eq!(catalog.weight(Coord::new(0, 0, 4)), None);
    }

    #[test]
    fn test_too_small_rejected() {
        assert_eq!(LineCatalog::build(1), Err(CatalogError::BoardTooSmall(1)));
        assert_eq!(LineCatalog::build(0), Err(CatalogError::BoardTooSmall(0)));
    }

    #[test]
    fn test_first_and_last_lines() {
        let catalog = LineCatalog::build(4).unwrap();
        let first = catalog.line(0).unwrap();
        assert_eq!(first.kind(), LineKind::LayerColumn);
        assert_eq!(
            first.cells(),
            &[
                Coord::new(0, 0, 0),
                Coord::new(0, 1, 0),
                Coord::new(0, 2, 0),
                Coord::new(0, 3, 0)
            ]
        );
        let last = catalog.line(75).unwrap();
        assert_eq!(last.kind(), LineKind::SpaceDiagonal);
        assert_eq!(last.cells()[0], Coord::new(3, 0, 0));
        assert_eq!(last.cells()[3], Coord::new(0, 3, 3));
    }
}
