//! Rectangular cell selection

use std::ops::RangeInclusive;

use super::model::CellPosition;

/// An axis-aligned range spanned by an anchor and a focus cell
///
/// The anchor is the active cell; the focus is where range extension
/// currently ends. Equal anchor and focus is a single-cell selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub anchor: CellPosition,
    pub focus: CellPosition,
}

impl Selection {
    pub fn new(anchor: CellPosition, focus: CellPosition) -> Self {
        Self { anchor, focus }
    }

    /// Selection covering just one cell
    pub fn single(cell: CellPosition) -> Self {
        Self {
            anchor: cell,
            focus: cell,
        }
    }

    pub fn is_single_cell(&self) -> bool {
        self.anchor == self.focus
    }

    /// Covered rows (`-1` is the header row)
    pub fn rows(&self) -> RangeInclusive<isize> {
        self.anchor.row.min(self.focus.row)..=self.anchor.row.max(self.focus.row)
    }

    pub fn cols(&self) -> RangeInclusive<usize> {
        self.anchor.col.min(self.focus.col)..=self.anchor.col.max(self.focus.col)
    }

    pub fn top_left(&self) -> CellPosition {
        CellPosition::new(*self.rows().start(), *self.cols().start())
    }

    pub fn bottom_right(&self) -> CellPosition {
        CellPosition::new(*self.rows().end(), *self.cols().end())
    }

    pub fn contains(&self, pos: CellPosition) -> bool {
        self.rows().contains(&pos.row) && self.cols().contains(&pos.col)
    }

    /// Covered data rows, ignoring the header row
    pub fn data_rows(&self) -> Option<RangeInclusive<usize>> {
        let rows = self.rows();
        let last = usize::try_from(*rows.end()).ok()?;
        let first = usize::try_from(*rows.start()).unwrap_or(0);
        Some(first..=last)
    }

    /// Every covered position, row-major
    pub fn cells(&self) -> impl Iterator<Item = CellPosition> {
        let cols = self.cols();
        self.rows()
            .flat_map(move |row| cols.clone().map(move |col| CellPosition::new(row, col)))
    }
}
