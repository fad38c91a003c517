use crate::font::{Glyph, Hardblank};

use super::layout::{FitMode, Layout};
use super::smush::Cell;

/// How far the next glyph moves into the composed line
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Overlap {
    /// Number of trailing columns of the line merged with leading columns of the glyph
    pub columns: usize,
    /// How the amount was found
    pub kind: OverlapKind,
}

/// The strategy that produced an [`Overlap`]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OverlapKind {
    /// Full width layout, or the first glyph of a line
    Edge,
    /// Only blank columns were removed
    Kerned,
    /// Visible columns were combined by smushing
    Smushed,
}

impl Overlap {
    pub(crate) const EDGE: Self = Self {
        columns: 0,
        kind: OverlapKind::Edge,
    };
}

/// Finds the overlap between the composed line and the next glyph
#[derive(Clone, Copy, Debug)]
pub(crate) struct OverlapPlanner {
    layout: Layout,
    hardblank: Hardblank,
}

impl OverlapPlanner {
    pub(crate) const fn new(layout: Layout, hardblank: Hardblank) -> Self {
        Self { layout, hardblank }
    }

    pub(crate) const fn layout(&self) -> Layout {
        self.layout
    }

    /// `line` holds the composed rows, all of the same length.
    pub(crate) fn plan(&self, line: &[Vec<Cell>], glyph: &Glyph) -> Overlap {
        let length = line.first().map_or(0, Vec::len);
        let cap = glyph.min_width().min(length);
        if cap == 0 {
            return Overlap::EDGE;
        }
        match self.layout.fit() {
            FitMode::FullWidth => Overlap::EDGE,
            FitMode::Kerning => self.kerning(line, glyph, cap),
            FitMode::Smushing => (1..=cap)
                .rev()
                .find(|&columns| self.smushes(line, glyph, columns))
                .map_or_else(
                    || self.kerning(line, glyph, cap),
                    |columns| Overlap {
                        columns,
                        kind: OverlapKind::Smushed,
                    },
                ),
        }
    }

    fn kerning(&self, line: &[Vec<Cell>], glyph: &Glyph, cap: usize) -> Overlap {
        let columns = line
            .iter()
            .zip(glyph.rows())
            .map(|(composed, row)| {
                let trailing = composed
                    .iter()
                    .rev()
                    .take_while(|&&cell| cell == Cell::Blank)
                    .count();
                let leading = row.iter().take_while(|&&c| c == ' ').count();
                trailing + leading
            })
            .min()
            .unwrap_or(0)
            .min(cap);
        Overlap {
            columns,
            kind: OverlapKind::Kerned,
        }
    }

    fn smushes(&self, line: &[Vec<Cell>], glyph: &Glyph, columns: usize) -> bool {
        line.iter().zip(glyph.rows()).all(|(composed, row)| {
            let (_, tail) = composed.split_at(composed.len() - columns);
            tail.iter().enumerate().all(|(column, &left)| {
                let right = Cell::at(row, column, self.hardblank);
                self.layout.smush_cells(left, right).is_some()
            })
        })
    }
}
