//! Mutation engine
//!
//! Every edit parses the blob fresh, changes the matrix or metadata, and
//! writes the blob straight back with the separator it was read with.

use std::collections::HashSet;

use super::columns::{Alignment, CellFormat, ColumnMetadata};
use super::document::GridDocument;
use super::layout;
use super::model::{CellPosition, Matrix, Row};
use super::numeric::{number_to_text, to_number};
use super::parser::{storage_separator, ParseOptions};
use crate::config::GridConfig;

/// One change to a grid document
#[derive(Debug, Clone, PartialEq)]
pub enum GridEdit {
    /// Write a data cell (`col == 0` is the row label)
    SetCellValue {
        row: usize,
        col: usize,
        value: String,
    },
    RenameHeader {
        col: usize,
        title: String,
    },
    ClearCell(CellPosition),
    /// Clipboard text anchored at a cell; blocks may grow the matrix
    Paste {
        anchor: CellPosition,
        text: String,
    },
    /// Insert a blank row after `after` (`-1` inserts at the top)
    InsertRow {
        after: isize,
    },
    AppendRow,
    /// Insert a column at `at` (clamped so the label column stays first)
    InsertColumn {
        at: usize,
    },
    DeleteRows {
        first: usize,
        last: usize,
    },
    DeleteColumns {
        first: usize,
        last: usize,
    },
    SetColumnWidths(Vec<f64>),
    /// Resize by a percentage delta against the current widths
    ResizeColumn {
        col: usize,
        delta: f64,
    },
    SetColumnFormat {
        col: usize,
        format: CellFormat,
    },
    SetColumnPrecision {
        col: usize,
        precision: u32,
    },
    SetColumnAlignment {
        col: usize,
        alignment: Alignment,
    },
    SetColumnGoal {
        col: usize,
        goal: Option<f64>,
    },
    SetSubtotal {
        row: usize,
        enabled: bool,
    },
    SetTotalRow(bool),
}

impl GridEdit {
    /// Edit writing `value` into any cell, header row included
    pub fn set_cell(pos: CellPosition, value: impl Into<String>) -> Self {
        match pos.data_row() {
            Some(row) => GridEdit::SetCellValue {
                row,
                col: pos.col,
                value: value.into(),
            },
            None => GridEdit::RenameHeader {
                col: pos.col,
                title: value.into(),
            },
        }
    }

    /// Whether the edit can change the matrix shape
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            GridEdit::Paste { .. }
                | GridEdit::InsertRow { .. }
                | GridEdit::AppendRow
                | GridEdit::InsertColumn { .. }
                | GridEdit::DeleteRows { .. }
                | GridEdit::DeleteColumns { .. }
        )
    }
}

/// What an edit touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Unchanged,
    Data,
    Metadata,
}

impl From<bool> for Outcome {
    fn from(changed: bool) -> Self {
        if changed {
            Outcome::Data
        } else {
            Outcome::Unchanged
        }
    }
}

fn metadata(changed: bool) -> Outcome {
    if changed {
        Outcome::Metadata
    } else {
        Outcome::Unchanged
    }
}

/// Apply an edit to a document, returning whether anything changed
pub fn apply_edit(doc: &mut GridDocument, edit: &GridEdit, config: &GridConfig) -> bool {
    let options = ParseOptions::from(config);
    let (mut matrix, separator) = doc.parse(&options);
    doc.columns.normalize(matrix.column_count());

    let outcome: Outcome = match edit {
        GridEdit::SetCellValue { row, col, value } => {
            set_value(&mut matrix, CellPosition::new(*row as isize, *col), value).into()
        }
        GridEdit::RenameHeader { col, title } => {
            let title = match title.trim() {
                "" => config.empty_header_title.as_str(),
                trimmed => trimmed,
            };
            set_value(&mut matrix, CellPosition::header(*col), title).into()
        }
        GridEdit::ClearCell(pos) => set_value(&mut matrix, *pos, "").into(),
        GridEdit::Paste { anchor, text } => match classify_paste(text) {
            PasteKind::Literal(value) => set_value(&mut matrix, *anchor, &value).into(),
            PasteKind::Block(block) => {
                paste_block(&mut matrix, &mut doc.columns, *anchor, &block, config).into()
            }
        },
        GridEdit::InsertRow { after } => {
            let at = usize::try_from(after + 1)
                .unwrap_or(0)
                .min(matrix.row_count());
            let row = matrix.blank_row();
            matrix.rows.insert(at, row);
            doc.row_flags.row_inserted(at);
            Outcome::Data
        }
        GridEdit::AppendRow => {
            let row = matrix.blank_row();
            matrix.rows.push(row);
            Outcome::Data
        }
        GridEdit::InsertColumn { at } => {
            insert_column(&mut matrix, &mut doc.columns, *at, config);
            Outcome::Data
        }
        GridEdit::DeleteRows { first, last } => {
            delete_rows(&mut matrix, doc, *first, *last).into()
        }
        GridEdit::DeleteColumns { first, last } => {
            delete_columns(&mut matrix, &mut doc.columns, *first, *last).into()
        }
        GridEdit::SetColumnWidths(widths) => {
            let widths = layout::normalize_widths(widths, matrix.column_count());
            metadata(replace(&mut doc.columns.widths, widths))
        }
        GridEdit::ResizeColumn { col, delta } => {
            let widths =
                layout::resize_column(&doc.columns.widths, *col, *delta, config.min_column_width);
            metadata(replace(&mut doc.columns.widths, widths))
        }
        GridEdit::SetColumnFormat { col, format } => {
            metadata(set_at(&mut doc.columns.formats, *col, *format))
        }
        GridEdit::SetColumnPrecision { col, precision } => {
            metadata(set_at(&mut doc.columns.precisions, *col, *precision))
        }
        GridEdit::SetColumnAlignment { col, alignment } => {
            metadata(set_at(&mut doc.columns.alignments, *col, *alignment))
        }
        GridEdit::SetColumnGoal { col, goal } => {
            let goal = goal.filter(|g| g.is_finite());
            metadata(set_at(&mut doc.columns.goals, *col, goal))
        }
        GridEdit::SetSubtotal { row, enabled } => {
            metadata(*row < matrix.row_count() && doc.row_flags.set_subtotal(*row, *enabled))
        }
        GridEdit::SetTotalRow(enabled) => metadata(replace(&mut doc.row_flags.total_last_row, *enabled)),
    };

    match outcome {
        Outcome::Unchanged => {
            tracing::trace!("Edit {:?} changed nothing", edit);
            false
        }
        Outcome::Data => {
            let separator = storage_separator(&matrix, separator);
            doc.store(&matrix, separator);
            doc.normalize(&options);
            tracing::debug!(
                "Applied {:?}: {} rows x {} columns",
                edit,
                matrix.row_count(),
                matrix.column_count()
            );
            true
        }
        Outcome::Metadata => {
            doc.normalize(&options);
            tracing::debug!("Applied {:?}", edit);
            true
        }
    }
}

fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        false
    } else {
        *slot = value;
        true
    }
}

fn set_at<T: PartialEq>(values: &mut [T], index: usize, value: T) -> bool {
    values
        .get_mut(index)
        .is_some_and(|slot| replace(slot, value))
}

fn set_value(matrix: &mut Matrix, pos: CellPosition, value: &str) -> bool {
    matrix.set_cell(pos, value.trim())
}

/// Clipboard payload as seen by smart paste
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteKind {
    /// One cell with no tab or line break; handled like typed text
    Literal(String),
    /// Tab/line separated block of cells
    Block(Vec<Vec<String>>),
}

/// Split clipboard text into a cell block
pub fn classify_paste(text: &str) -> PasteKind {
    let mut lines: Vec<&str> = text
        .split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .collect();
    if lines.len() > 1 && lines.last().is_some_and(|line| line.is_empty()) {
        lines.pop();
    }

    if lines.len() == 1 && !lines[0].contains('\t') {
        return PasteKind::Literal(lines[0].to_string());
    }

    PasteKind::Block(
        lines
            .into_iter()
            .map(|line| line.split('\t').map(str::to_string).collect())
            .collect(),
    )
}

/// Write a pasted block at `anchor`, growing columns and rows as needed
///
/// Anchored on the header row, the first pasted line renames headers and
/// the rest lands from data row 0.
fn paste_block(
    matrix: &mut Matrix,
    columns: &mut ColumnMetadata,
    anchor: CellPosition,
    block: &[Vec<String>],
    config: &GridConfig,
) -> bool {
    let (header_line, data_lines, start_row) = match anchor.data_row() {
        Some(row) => (None, block, row),
        None => match block.split_first() {
            Some((first, rest)) => (Some(first), rest, 0),
            None => return false,
        },
    };

    let before = matrix.dimensions();
    let width = block.iter().map(Vec::len).max().unwrap_or(0);
    let needed_cols = anchor.col + width;
    while matrix.column_count() < needed_cols {
        let at = matrix.column_count();
        let title = unique_title(&matrix.headers, &config.new_column_title);
        matrix.headers.push(title);
        columns.insert_column(at);
    }
    matrix.fit_rows();

    let needed_rows = start_row + data_lines.len();
    while matrix.row_count() < needed_rows {
        let row = matrix.blank_row();
        matrix.rows.push(row);
    }

    let mut changed = false;

    if let Some(titles) = header_line {
        for (offset, title) in titles.iter().enumerate() {
            changed |= matrix.set_cell(CellPosition::header(anchor.col + offset), title.trim());
        }
    }

    for (line_offset, line) in data_lines.iter().enumerate() {
        let row = (start_row + line_offset) as isize;
        for (offset, cell) in line.iter().enumerate() {
            let col = anchor.col + offset;
            let value = if col == 0 {
                cell.trim().to_string()
            } else {
                number_to_text(to_number(cell.as_str()))
            };
            changed |= matrix.set_cell(CellPosition::new(row, col), &value);
        }
    }

    tracing::debug!(
        "Pasted {} lines x {} cells at {}",
        block.len(),
        width,
        anchor
    );
    changed || matrix.dimensions() != before
}

/// `"{base} {n}"` with the smallest `n > headers.len()` not already taken
pub fn unique_title(headers: &[String], base: &str) -> String {
    let taken: HashSet<&str> = headers.iter().map(String::as_str).collect();
    (headers.len() + 1..)
        .map(|n| format!("{} {}", base, n))
        .find(|candidate| !taken.contains(candidate.as_str()))
        .unwrap_or_else(|| base.to_string())
}

fn insert_column(
    matrix: &mut Matrix,
    columns: &mut ColumnMetadata,
    at: usize,
    config: &GridConfig,
) {
    let at = at.clamp(1, matrix.column_count());
    let title = unique_title(&matrix.headers, &config.new_column_title);
    matrix.headers.insert(at, title);
    for row in &mut matrix.rows {
        row.values.insert(at - 1, config.new_column_fill.clone());
    }
    columns.insert_column(at);
}

fn delete_rows(matrix: &mut Matrix, doc: &mut GridDocument, first: usize, last: usize) -> bool {
    let count = matrix.row_count();
    let last = last.min(count.saturating_sub(1));
    if count == 0 || first > last {
        return false;
    }
    if first == 0 && last + 1 == count {
        tracing::debug!("Refusing to delete all {} rows", count);
        return false;
    }

    matrix.rows.drain(first..=last);
    doc.row_flags.rows_removed(first, last);
    true
}

fn delete_columns(
    matrix: &mut Matrix,
    columns: &mut ColumnMetadata,
    first: usize,
    last: usize,
) -> bool {
    let count = matrix.column_count();
    let last = last.min(count.saturating_sub(1));
    if first > last {
        return false;
    }
    if first == 0 && last + 1 == count {
        tracing::debug!("Refusing to delete all {} columns", count);
        return false;
    }

    matrix.headers.drain(first..=last);
    for row in &mut matrix.rows {
        let mut cells: Vec<String> = std::iter::once(std::mem::take(&mut row.label))
            .chain(row.values.drain(..))
            .collect();
        cells.drain(first..=last.min(cells.len().saturating_sub(1)));
        let mut cells = cells.into_iter();
        *row = Row {
            label: cells.next().unwrap_or_default(),
            values: cells.collect(),
        };
    }
    matrix.fit_rows();
    columns.remove_columns(first, last);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(data: &str) -> GridDocument {
        GridDocument::new(data)
    }

    fn apply(doc: &mut GridDocument, edit: GridEdit) -> bool {
        apply_edit(doc, &edit, &GridConfig::default())
    }

    #[test]
    fn test_set_cell_value_and_noop() {
        let mut d = doc("Mês\tReal\nJan\t120");
        assert!(apply(&mut d, GridEdit::set_cell(CellPosition::new(0, 1), "5")));
        assert_eq!(d.data, "Mês\tReal\nJan\t5");
        assert!(!apply(&mut d, GridEdit::set_cell(CellPosition::new(0, 1), "5")));
    }

    #[test]
    fn test_rename_header() {
        let mut d = doc("Mês;Real\nJan;120");
        assert!(apply(&mut d, GridEdit::set_cell(CellPosition::header(1), "Total")));
        assert_eq!(d.data, "Mês;Total\nJan;120");
    }

    #[test]
    fn test_classify_paste() {
        assert_eq!(classify_paste("42"), PasteKind::Literal("42".into()));
        assert_eq!(classify_paste("42\n"), PasteKind::Literal("42".into()));
        assert_eq!(
            classify_paste("a\tb\r\nc\td\r\n"),
            PasteKind::Block(vec![
                vec!["a".into(), "b".into()],
                vec!["c".into(), "d".into()]
            ])
        );
        assert_eq!(
            classify_paste("1\n2"),
            PasteKind::Block(vec![vec!["1".into()], vec!["2".into()]])
        );
    }

    #[test]
    fn test_paste_coerces_values_and_trims_labels() {
        let mut d = doc("Mês\tReal\nJan\t120");
        assert!(apply(
            &mut d,
            GridEdit::Paste {
                anchor: CellPosition::new(0, 0),
                text: " Fev \t1.234,5".into(),
            }
        ));
        assert_eq!(d.data, "Mês\tReal\nFev\t1234.5");
    }

    #[test]
    fn test_paste_grows_columns_and_rows() {
        let mut d = doc("Mês\tReal\nJan\t120");
        let text = "1\t2\t3\n4\t5\t6";
        assert!(apply(
            &mut d,
            GridEdit::Paste {
                anchor: CellPosition::new(0, 1),
                text: text.into(),
            }
        ));

        let m = d.matrix();
        assert_eq!(m.headers, vec!["Mês", "Real", "Coluna 3", "Coluna 4"]);
        assert_eq!(m.row_count(), 2);
        assert_eq!(m.rows[0].values, vec!["1", "2", "3"]);
        assert_eq!(m.rows[1].label, "");
        assert_eq!(m.rows[1].values, vec!["4", "5", "6"]);
        assert_eq!(d.columns.len(), 4);
    }

    #[test]
    fn test_paste_on_header_row_renames() {
        let mut d = doc("A\tB\nx\t1");
        apply(
            &mut d,
            GridEdit::Paste {
                anchor: CellPosition::header(0),
                text: "Mês\tReal\nJan\t7".into(),
            },
        );
        assert_eq!(d.data, "Mês\tReal\nJan\t7");
    }

    #[test]
    fn test_insert_row_shifts_flags() {
        let mut d = doc("L\tA\nx\t1\ny\t2");
        apply(&mut d, GridEdit::SetSubtotal { row: 1, enabled: true });
        assert!(apply(&mut d, GridEdit::InsertRow { after: 0 }));

        let m = d.matrix();
        assert_eq!(m.row_count(), 3);
        assert_eq!(m.rows[1].label, "");
        assert_eq!(d.row_flags.subtotal_rows, vec![2]);
    }

    #[test]
    fn test_insert_row_at_top() {
        let mut d = doc("L\tA\nx\t1");
        apply(&mut d, GridEdit::InsertRow { after: -1 });
        assert_eq!(d.matrix().rows[1].label, "x");
    }

    #[test]
    fn test_insert_column_fills_and_names() {
        let mut d = doc("L\tA\nx\t1");
        assert!(apply(&mut d, GridEdit::InsertColumn { at: 2 }));
        assert_eq!(d.data, "L\tA\tColuna 3\nx\t1\t0");
        assert_eq!(d.columns.len(), 3);
        assert!((d.columns.widths.iter().sum::<f64>() - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_insert_column_never_before_label() {
        let mut d = doc("L\tA\nx\t1");
        apply(&mut d, GridEdit::InsertColumn { at: 0 });
        assert_eq!(d.matrix().headers[0], "L");
    }

    #[test]
    fn test_unique_title_skips_taken() {
        let headers = vec!["L".to_string(), "Coluna 3".to_string()];
        assert_eq!(unique_title(&headers, "Coluna"), "Coluna 4");
    }

    #[test]
    fn test_delete_floor() {
        let mut d = doc("L\tA\tB\nx\t1\t2\ny\t3\t4");
        let before = d.clone();

        assert!(!apply(&mut d, GridEdit::DeleteRows { first: 0, last: 1 }));
        assert!(!apply(&mut d, GridEdit::DeleteColumns { first: 0, last: 2 }));
        assert_eq!(d, before);
    }

    #[test]
    fn test_delete_columns_removes_metadata() {
        let mut d = doc("L\tA\tB\nx\t1\t2");
        apply(&mut d, GridEdit::SetColumnPrecision { col: 2, precision: 3 });
        assert!(apply(&mut d, GridEdit::DeleteColumns { first: 1, last: 1 }));

        assert_eq!(d.data, "L\tB\nx\t2");
        assert_eq!(d.columns.precisions, vec![0, 3]);
    }

    #[test]
    fn test_delete_label_column_promotes_next() {
        let mut d = doc("L\tA\tB\nx\t1\t2");
        assert!(apply(&mut d, GridEdit::DeleteColumns { first: 0, last: 0 }));
        assert_eq!(d.data, "A\tB\n1\t2");
    }

    #[test]
    fn test_delete_rows_shifts_flags() {
        let mut d = doc("L\tA\nx\t1\ny\t2\nz\t3");
        apply(&mut d, GridEdit::SetSubtotal { row: 2, enabled: true });
        assert!(apply(&mut d, GridEdit::DeleteRows { first: 0, last: 0 }));
        assert_eq!(d.row_flags.subtotal_rows, vec![1]);
    }

    #[test]
    fn test_metadata_edits_leave_blob() {
        let mut d = doc("L;A\nx;1");
        let data = d.data.clone();
        assert!(apply(&mut d, GridEdit::SetColumnFormat { col: 1, format: CellFormat::Currency }));
        assert!(apply(&mut d, GridEdit::SetColumnGoal { col: 1, goal: Some(100.0) }));
        assert!(!apply(&mut d, GridEdit::SetColumnFormat { col: 7, format: CellFormat::Date }));
        assert_eq!(d.data, data);
        assert_eq!(d.columns.goal(1), Some(100.0));
    }

    #[test]
    fn test_append_row_in_space_separated_grid_switches_to_tabs() {
        let mut d = doc("Mês  Real\nJan  120");
        assert!(apply(&mut d, GridEdit::AppendRow));
        assert_eq!(d.matrix().row_count(), 2);
    }
}
