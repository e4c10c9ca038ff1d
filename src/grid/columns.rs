//! Per-column metadata kept parallel to the header list

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::layout;

/// How a column's values are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CellFormat {
    #[default]
    Text,
    Number,
    Percent,
    Currency,
    Date,
    Time,
}

impl CellFormat {
    pub fn name(self) -> &'static str {
        match self {
            CellFormat::Text => "text",
            CellFormat::Number => "number",
            CellFormat::Percent => "percent",
            CellFormat::Currency => "currency",
            CellFormat::Date => "date",
            CellFormat::Time => "time",
        }
    }
}

impl fmt::Display for CellFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CellFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(CellFormat::Text),
            "number" => Ok(CellFormat::Number),
            "percent" => Ok(CellFormat::Percent),
            "currency" => Ok(CellFormat::Currency),
            "date" => Ok(CellFormat::Date),
            "time" => Ok(CellFormat::Time),
            other => Err(format!("unknown cell format: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Column metadata arrays, one entry per header
///
/// Arrays arriving shorter than the header list are padded with the
/// per-column defaults; see [`ColumnMetadata::normalize`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnMetadata {
    pub widths: Vec<f64>,
    pub formats: Vec<CellFormat>,
    pub precisions: Vec<u32>,
    pub alignments: Vec<Alignment>,
    pub goals: Vec<Option<f64>>,
}

/// Default format: label column is text, value columns are numbers
pub fn default_format(col: usize) -> CellFormat {
    if col == 0 {
        CellFormat::Text
    } else {
        CellFormat::Number
    }
}

pub fn default_alignment(col: usize) -> Alignment {
    if col == 0 {
        Alignment::Left
    } else {
        Alignment::Right
    }
}

impl ColumnMetadata {
    /// Defaults for `count` columns
    pub fn for_columns(count: usize) -> Self {
        let mut meta = Self::default();
        meta.normalize(count);
        meta
    }

    /// Pad or truncate every array to `count` entries and fix up widths
    pub fn normalize(&mut self, count: usize) {
        self.widths = layout::normalize_widths(&self.widths, count);
        fit_with(&mut self.formats, count, default_format);
        fit_with(&mut self.precisions, count, |_| 0);
        fit_with(&mut self.alignments, count, default_alignment);
        fit_with(&mut self.goals, count, |_| None);
    }

    pub fn len(&self) -> usize {
        self.widths.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }

    pub fn format(&self, col: usize) -> CellFormat {
        self.formats.get(col).copied().unwrap_or_else(|| default_format(col))
    }

    pub fn precision(&self, col: usize) -> u32 {
        self.precisions.get(col).copied().unwrap_or(0)
    }

    pub fn alignment(&self, col: usize) -> Alignment {
        self.alignments
            .get(col)
            .copied()
            .unwrap_or_else(|| default_alignment(col))
    }

    pub fn goal(&self, col: usize) -> Option<f64> {
        self.goals.get(col).copied().flatten()
    }

    /// Insert a default column at `at` (widths shrink to make room)
    pub fn insert_column(&mut self, at: usize) {
        let at = at.min(self.len());
        self.widths = layout::insert_width(&self.widths, at);
        self.formats.insert(at.min(self.formats.len()), default_format(at));
        self.precisions.insert(at.min(self.precisions.len()), 0);
        self.alignments
            .insert(at.min(self.alignments.len()), default_alignment(at));
        self.goals.insert(at.min(self.goals.len()), None);
    }

    /// Drop the entries for columns `first..=last`
    pub fn remove_columns(&mut self, first: usize, last: usize) {
        self.widths = layout::remove_widths(&self.widths, first, last);
        remove_range(&mut self.formats, first, last);
        remove_range(&mut self.precisions, first, last);
        remove_range(&mut self.alignments, first, last);
        remove_range(&mut self.goals, first, last);
    }
}

fn fit_with<T>(values: &mut Vec<T>, count: usize, default: impl Fn(usize) -> T) {
    values.truncate(count);
    let start = values.len();
    values.extend((start..count).map(default));
}

fn remove_range<T>(values: &mut Vec<T>, first: usize, last: usize) {
    if first >= values.len() {
        return;
    }
    let end = (last + 1).min(values.len());
    values.drain(first..end);
}
