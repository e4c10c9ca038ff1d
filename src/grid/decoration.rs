//! Per-cell decoration values for renderers
//!
//! Sparkbars, heatmap tinting and goal badges all derive from per-column
//! statistics. Subtotal and total rows are left out of the statistics so
//! they don't dominate the scale.

use super::columns::ColumnMetadata;
use super::document::RowFlags;
use super::model::Matrix;
use super::numeric::{looks_numeric, to_number};

/// Range of the numeric values in one column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub min: f64,
    pub max: f64,
}

impl ColumnStats {
    /// Stats over value column `col`, skipping blank, non-numeric and summary rows
    pub fn for_column(matrix: &Matrix, col: usize, flags: &RowFlags) -> Option<Self> {
        if col == 0 {
            return None;
        }
        let row_count = matrix.row_count();

        matrix
            .rows
            .iter()
            .enumerate()
            .filter(|(i, _)| !flags.is_summary(*i, row_count))
            .filter_map(|(_, row)| row.values.get(col - 1))
            .filter(|raw| looks_numeric(raw))
            .map(|raw| to_number(raw.as_str()))
            .fold(None, |stats: Option<Self>, value| {
                Some(match stats {
                    None => Self {
                        min: value,
                        max: value,
                    },
                    Some(s) => Self {
                        min: s.min.min(value),
                        max: s.max.max(value),
                    },
                })
            })
    }

    /// Bar length as a fraction of the column maximum, in `[0, 1]`
    pub fn sparkbar_fraction(&self, value: f64) -> f64 {
        if self.max <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        (value / self.max).clamp(0.0, 1.0)
    }

    /// Heatmap position between column min and max, in `[0, 1]`
    pub fn heat_intensity(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span <= 0.0 || !value.is_finite() {
            return 0.0;
        }
        ((value - self.min) / span).clamp(0.0, 1.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalStatus {
    Met,
    Missed,
}

pub fn goal_status(value: f64, goal: Option<f64>) -> Option<GoalStatus> {
    let goal = goal?;
    Some(if value >= goal {
        GoalStatus::Met
    } else {
        GoalStatus::Missed
    })
}

/// Everything a renderer needs to decorate one cell
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CellDecoration {
    pub sparkbar: f64,
    pub heat: f64,
    pub goal: Option<GoalStatus>,
    pub summary: bool,
}

/// Decorations for every value cell, indexed `[row][col - 1]`
pub fn decorate(matrix: &Matrix, columns: &ColumnMetadata, flags: &RowFlags) -> Vec<Vec<CellDecoration>> {
    let stats: Vec<Option<ColumnStats>> = (1..matrix.column_count())
        .map(|col| ColumnStats::for_column(matrix, col, flags))
        .collect();
    let row_count = matrix.row_count();

    matrix
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let summary = flags.is_summary(r, row_count);
            row.values
                .iter()
                .zip(&stats)
                .enumerate()
                .map(|(i, (raw, stats))| {
                    if !looks_numeric(raw) {
                        return CellDecoration {
                            summary,
                            ..Default::default()
                        };
                    }
                    let value = to_number(raw.as_str());
                    CellDecoration {
                        sparkbar: stats.map_or(0.0, |s| s.sparkbar_fraction(value)),
                        heat: stats.map_or(0.0, |s| s.heat_intensity(value)),
                        goal: goal_status(value, columns.goal(i + 1)),
                        summary,
                    }
                })
                .collect()
        })
        .collect()
}
