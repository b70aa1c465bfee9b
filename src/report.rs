//! Line catalog summary for the `lines` command.

use cubic_core::{CatalogError, LineCatalog, LineKind};
use derive_getters::Getters;
use std::collections::BTreeMap;
use strum::IntoEnumIterator;
use tracing::instrument;

/// Counts describing the catalog of one board size.
#[derive(Debug, Clone, PartialEq, Eq, Getters)]
pub struct CatalogReport {
    /// Side length of the board.
    size: usize,
    /// Lines per geometric family, in enumeration order.
    per_kind: Vec<(LineKind, usize)>,
    /// Total number of lines.
    total: usize,
    /// Number of cells per weight.
    histogram: BTreeMap<u32, usize>,
    /// Sum of every cell weight.
    weight_sum: u32,
}

impl CatalogReport {
    /// Builds the catalog for `size` and summarizes it.
    #[instrument]
    pub fn build(size: usize) -> Result<Self, CatalogError> {
        let catalog = LineCatalog::build(size)?;

        let per_kind = LineKind::iter()
            .map(|kind| {
                let count = catalog.lines().iter().filter(|l| l.kind() == kind).count();
                (kind, count)
            })
            .collect();

        let mut histogram = BTreeMap::new();
        for weight in catalog.weights() {
            *histogram.entry(*weight).or_insert(0) += 1;
        }

        Ok(Self {
            size,
            per_kind,
            total: catalog.len(),
            histogram,
            weight_sum: catalog.weights().iter().sum(),
        })
    }
}

impl std::fmt::Display for CatalogReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Board {0}×{0}×{0}", self.size)?;
        for (kind, count) in &self.per_kind {
            writeln!(f, "  {:<18} {:>4}", kind.to_string(), count)?;
        }
        writeln!(f, "  {:<18} {:>4}", "total", self.total)?;
        writeln!(f, "Cell weights")?;
        for (weight, cells) in &self.histogram {
            writeln!(f, "  weight {:>3}: {:>4} cells", weight, cells)?;
        }
        write!(f, "  sum {}", self.weight_sum)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_for_standard_board() {
        let report = CatalogReport::build(4).unwrap();
        assert_eq!(*report.total(), 76);
        assert_eq!(report.histogram().get(&7), Some(&16));
        assert_eq!(report.histogram().get(&4), Some(&48));
        assert_eq!(*report.weight_sum(), 304);
        assert_eq!(
            report.per_kind().last(),
            Some(&(LineKind::SpaceDiagonal, 4))
        );
    }

    #[test]
    fn test_report_text() {
        let text = CatalogReport::build(3).unwrap().to_string();
        assert!(text.starts_with("Board 3×3×3"));
        assert!(text.contains("total"));
        assert!(text.contains("  49"));
        assert!(text.contains("weight  13:    1 cells"));
    }

    #[test]
    fn test_report_rejects_tiny_board() {
        assert_eq!(
            CatalogReport::build(1),
            Err(CatalogError::BoardTooSmall(1))
        );
    }
}
