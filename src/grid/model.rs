//! Grid data model types
//!
//! The matrix is a view derived from the delimited-text blob. It is rebuilt
//! on every interaction and serialized straight back after each mutation,
//! so nothing here owns durable state.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::numeric::{number_to_text, to_number};

/// Row index used by [`CellPosition`] for the header row
pub const HEADER_ROW: isize = -1;

/// Supported field separators, detected once per blob
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Separator {
    #[default]
    Tab,
    Semicolon,
    Comma,
    /// Runs of two or more spaces
    MultiSpace,
}

impl Separator {
    /// Text written between fields when serializing
    pub fn as_str(self) -> &'static str {
        match self {
            Separator::Tab => "\t",
            Separator::Semicolon => ";",
            Separator::Comma => ",",
            Separator::MultiSpace => "  ",
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Separator::Tab => "tab",
            Separator::Semicolon => "semicolon",
            Separator::Comma => "comma",
            Separator::MultiSpace => "multi-space",
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Position of a cell in the grid
///
/// `row == HEADER_ROW` addresses the header row; column 0 is always the
/// label column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CellPosition {
    pub row: isize,
    pub col: usize,
}

impl CellPosition {
    pub const fn new(row: isize, col: usize) -> Self {
        Self { row, col }
    }

    /// Position in the header row
    pub const fn header(col: usize) -> Self {
        Self {
            row: HEADER_ROW,
            col,
        }
    }

    pub fn is_header(&self) -> bool {
        self.row == HEADER_ROW
    }

    /// Index into `rows` when this is a data cell
    pub fn data_row(&self) -> Option<usize> {
        usize::try_from(self.row).ok()
    }
}

impl fmt::Display for CellPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Row and column counts of a matrix (`cols` includes the label column)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub const fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols }
    }

    /// Whether a position addresses an existing cell (header row included)
    pub fn contains(&self, pos: CellPosition) -> bool {
        pos.col < self.cols && pos.row >= HEADER_ROW && pos.row < self.rows as isize
    }

    /// Last addressable row (`HEADER_ROW` when there are no data rows)
    pub fn last_row(&self) -> isize {
        self.rows as isize - 1
    }

    pub fn last_col(&self) -> usize {
        self.cols.saturating_sub(1)
    }
}

/// A value stored in the non-label columns of a matrix
pub trait CellValue: Clone + PartialEq + fmt::Debug {
    /// Value used to pad short rows and fill new cells
    fn blank() -> Self;

    /// Text written back into the blob
    fn to_cell_text(&self) -> String;
}

impl CellValue for String {
    fn blank() -> Self {
        String::new()
    }

    fn to_cell_text(&self) -> String {
        self.clone()
    }
}

impl CellValue for f64 {
    fn blank() -> Self {
        0.0
    }

    fn to_cell_text(&self) -> String {
        number_to_text(*self)
    }
}

/// How raw field text becomes a cell value when parsing
///
/// [`Literal`] keeps the user's keystrokes for the editable grid;
/// [`Numeric`] coerces eagerly for consumers that compute on the matrix.
pub trait ValuePolicy {
    type Value: CellValue;

    fn coerce(raw: &str) -> Self::Value;
}

/// Keep trimmed field text as-is
#[derive(Debug, Clone, Copy, Default)]
pub struct Literal;

/// Coerce field text through [`to_number`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Numeric;

impl ValuePolicy for Literal {
    type Value = String;

    fn coerce(raw: &str) -> String {
        raw.trim().to_string()
    }
}

impl ValuePolicy for Numeric {
    type Value = f64;

    fn coerce(raw: &str) -> f64 {
        to_number(raw)
    }
}

/// One data row: a label plus one value per non-label header
#[derive(Debug, Clone, PartialEq)]
pub struct Row<V = String> {
    pub label: String,
    pub values: Vec<V>,
}

impl<V: CellValue> Row<V> {
    /// Row with an empty label and `value_count` blank values
    pub fn blank(value_count: usize) -> Self {
        Self {
            label: String::new(),
            values: vec![V::blank(); value_count],
        }
    }

    /// Pad or truncate values to exactly `value_count` entries
    pub fn fit(&mut self, value_count: usize) {
        self.values.resize(value_count, V::blank());
    }
}

/// Header list plus ordered rows
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix<V = String> {
    pub headers: Vec<String>,
    pub rows: Vec<Row<V>>,
}

impl<V: CellValue> Matrix<V> {
    pub fn new(headers: Vec<String>, rows: Vec<Row<V>>) -> Self {
        let mut matrix = Self { headers, rows };
        matrix.fit_rows();
        matrix
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Number of columns, label column included
    pub fn column_count(&self) -> usize {
        self.headers.len()
    }

    /// Number of value columns (every row carries exactly this many values)
    pub fn value_count(&self) -> usize {
        self.headers.len().saturating_sub(1)
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.row_count(), self.column_count())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// A row with an empty label and blank values
    pub fn blank_row(&self) -> Row<V> {
        Row::blank(self.value_count())
    }

    /// Re-establish `values.len() == headers.len() - 1` for every row
    pub fn fit_rows(&mut self) {
        let value_count = self.value_count();
        for row in &mut self.rows {
            row.fit(value_count);
        }
    }

    /// Text of any cell; out-of-range positions read as empty
    pub fn cell_text(&self, pos: CellPosition) -> String {
        match pos.data_row() {
            None if pos.is_header() => self.headers.get(pos.col).cloned().unwrap_or_default(),
            None => String::new(),
            Some(row) => match self.rows.get(row) {
                Some(row) if pos.col == 0 => row.label.clone(),
                Some(row) => row
                    .values
                    .get(pos.col - 1)
                    .map(CellValue::to_cell_text)
                    .unwrap_or_default(),
                None => String::new(),
            },
        }
    }
}

impl Matrix<String> {
    /// Borrowing variant of [`Matrix::cell_text`] for the string-preserving matrix
    pub fn cell(&self, pos: CellPosition) -> &str {
        match pos.data_row() {
            None if pos.is_header() => self.headers.get(pos.col).map_or("", String::as_str),
            None => "",
            Some(row) => match self.rows.get(row) {
                Some(row) if pos.col == 0 => &row.label,
                Some(row) => row.values.get(pos.col - 1).map_or("", String::as_str),
                None => "",
            },
        }
    }

    /// Write a cell, returning whether anything changed
    pub fn set_cell(&mut self, pos: CellPosition, value: &str) -> bool {
        let slot = match pos.data_row() {
            None if pos.is_header() => self.headers.get_mut(pos.col),
            None => None,
            Some(row) => match self.rows.get_mut(row) {
                Some(row) if pos.col == 0 => Some(&mut row.label),
                Some(row) => row.values.get_mut(pos.col - 1),
                None => None,
            },
        };

        match slot {
            Some(slot) if slot.as_str() != value => {
                *slot = value.to_string();
                true
            }
            _ => false,
        }
    }
}

impl Matrix<f64> {
    /// Values of one value column (`col >= 1`) in row order
    pub fn column_values(&self, col: usize) -> Vec<f64> {
        if col == 0 {
            return Vec::new();
        }
        self.rows
            .iter()
            .map(|row| row.values.get(col - 1).copied().unwrap_or(0.0))
            .collect()
    }

    /// `(header, values)` for every value column, for chart-style consumers
    pub fn series(&self) -> Vec<(String, Vec<f64>)> {
        self.headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(col, header)| (header.clone(), self.column_values(col)))
            .collect()
    }

    /// Row labels in order
    pub fn labels(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.label.clone()).collect()
    }
}
