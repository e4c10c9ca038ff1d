//! The durable state exchanged with the surrounding document
//!
//! A grid persists as one delimited-text blob plus the column metadata
//! arrays and row flags. Everything else is rebuilt from these.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::columns::ColumnMetadata;
use super::model::{Literal, Matrix, Separator};
use super::parser::{self, ParseOptions};

/// Non-structural row markers used only for rendering
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowFlags {
    /// Data rows rendered as subtotals (sorted, unique)
    pub subtotal_rows: Vec<usize>,
    /// Whether the last data row is a grand total
    pub total_last_row: bool,
}

impl RowFlags {
    pub fn is_subtotal(&self, row: usize) -> bool {
        self.subtotal_rows.binary_search(&row).is_ok()
    }

    pub fn is_total(&self, row: usize, row_count: usize) -> bool {
        self.total_last_row && row_count > 0 && row + 1 == row_count
    }

    /// Whether the row is excluded from column statistics
    pub fn is_summary(&self, row: usize, row_count: usize) -> bool {
        self.is_subtotal(row) || self.is_total(row, row_count)
    }

    pub fn set_subtotal(&mut self, row: usize, enabled: bool) -> bool {
        match (self.subtotal_rows.binary_search(&row), enabled) {
            (Err(at), true) => {
                self.subtotal_rows.insert(at, row);
                true
            }
            (Ok(at), false) => {
                self.subtotal_rows.remove(at);
                true
            }
            _ => false,
        }
    }

    /// Shift markers after a row was inserted at index `at`
    pub fn row_inserted(&mut self, at: usize) {
        for row in &mut self.subtotal_rows {
            if *row >= at {
                *row += 1;
            }
        }
    }

    /// Drop markers in `first..=last` and shift the ones below up
    pub fn rows_removed(&mut self, first: usize, last: usize) {
        let removed = last - first + 1;
        self.subtotal_rows.retain(|row| *row < first || *row > last);
        for row in &mut self.subtotal_rows {
            if *row > last {
                *row -= removed;
            }
        }
    }

    /// Sort, dedupe and drop markers past the last row
    pub fn normalize(&mut self, row_count: usize) {
        self.subtotal_rows.sort_unstable();
        self.subtotal_rows.dedup();
        self.subtotal_rows.retain(|row| *row < row_count);
    }
}

/// Blob plus parallel metadata, the grid's only durable state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridDocument {
    pub data: String,
    pub columns: ColumnMetadata,
    pub row_flags: RowFlags,
}

impl GridDocument {
    /// Document for a blob, with metadata defaulted to its column count
    pub fn new(data: impl Into<String>) -> Self {
        let mut doc = Self {
            data: data.into(),
            ..Default::default()
        };
        doc.normalize(&ParseOptions::default());
        doc
    }

    pub fn with_columns(mut self, columns: ColumnMetadata) -> Self {
        self.columns = columns;
        self.normalize(&ParseOptions::default());
        self
    }

    /// The string-preserving matrix view of the blob
    pub fn matrix(&self) -> Matrix {
        parser::parse(&self.data)
    }

    /// Matrix and separator under the given parse options
    pub fn parse(&self, options: &ParseOptions) -> (Matrix, Separator) {
        parser::parse_with::<Literal>(&self.data, options)
    }

    pub fn separator(&self) -> Separator {
        parser::blob_separator(&self.data)
    }

    /// Replace the blob with a serialized matrix
    pub fn store(&mut self, matrix: &Matrix, separator: Separator) {
        self.data = parser::serialize(matrix, separator);
    }

    /// Re-establish metadata arrays and row flags against the blob's shape
    pub fn normalize(&mut self, options: &ParseOptions) {
        let (matrix, _) = self.parse(options);
        self.columns.normalize(matrix.column_count());
        self.row_flags.normalize(matrix.row_count());
    }

    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string(self).context("Failed to serialize grid document")
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let mut doc: Self =
            serde_json::from_str(json).context("Failed to parse grid document JSON")?;
        doc.normalize(&ParseOptions::default());
        Ok(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::columns::CellFormat;

    #[test]
    fn test_new_defaults_metadata_to_columns() {
        let doc = GridDocument::new("Mês\tReal\tMeta\nJan\t120\t100");
        assert_eq!(doc.columns.len(), 3);
        assert_eq!(doc.columns.formats[0], CellFormat::Text);
        assert_eq!(doc.columns.formats[1], CellFormat::Number);
    }

    #[test]
    fn test_json_round_trip_normalizes() {
        let json = r#"{"data":"A;B;C\nx;1;2","columns":{"widths":[50,50]}}"#;
        let doc = GridDocument::from_json(json).unwrap();
        assert_eq!(doc.columns.widths.len(), 3);

        let again = GridDocument::from_json(&doc.to_json().unwrap()).unwrap();
        assert_eq!(again, doc);
    }

    #[test]
    fn test_from_json_rejects_garbage() {
        assert!(GridDocument::from_json("not json").is_err());
    }

    #[test]
    fn test_row_flags_follow_structure() {
        let mut flags = RowFlags::default();
        flags.set_subtotal(1, true);
        flags.set_subtotal(3, true);

        flags.row_inserted(2);
        assert_eq!(flags.subtotal_rows, vec![1, 4]);

        flags.rows_removed(0, 1);
        assert_eq!(flags.subtotal_rows, vec![2]);
    }

    #[test]
    fn test_total_row() {
        let flags = RowFlags {
            total_last_row: true,
            ..Default::default()
        };
        assert!(flags.is_total(2, 3));
        assert!(!flags.is_total(1, 3));
        assert!(!RowFlags::default().is_total(2, 3));
    }
}
