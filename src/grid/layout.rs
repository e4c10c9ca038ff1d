//! Column width layout and proportional resize
//!
//! Widths are percentages of the grid's width and always sum to 100.

/// Default floor for a single column's width, in percent
pub const MIN_COLUMN_WIDTH: f64 = 2.0;

const TOTAL: f64 = 100.0;

/// Sums this close to 100 are left untouched
const WIDTH_EPSILON: f64 = 1e-6;

/// `count` equal shares of 100
pub fn equal_split(count: usize) -> Vec<f64> {
    if count == 0 {
        return Vec::new();
    }
    vec![TOTAL / count as f64; count]
}

/// Widths for `count` columns: equal split when absent, mismatched or
/// degenerate, otherwise rescaled to sum to 100
pub fn normalize_widths(widths: &[f64], count: usize) -> Vec<f64> {
    let usable = widths.len() == count && widths.iter().all(|w| w.is_finite() && *w >= 0.0);
    let sum: f64 = widths.iter().sum();

    if !usable || sum <= 0.0 {
        return equal_split(count);
    }
    if (sum - TOTAL).abs() < WIDTH_EPSILON {
        return widths.to_vec();
    }
    renormalize(widths)
}

/// Rescale so the widths sum to 100
pub fn renormalize(widths: &[f64]) -> Vec<f64> {
    let sum: f64 = widths.iter().sum();
    if sum <= 0.0 {
        return equal_split(widths.len());
    }
    widths.iter().map(|w| w * TOTAL / sum).collect()
}

/// Insert a column at `at`, giving it a `100/(n+1)` share and shrinking the
/// existing columns proportionally to make room
pub fn insert_width(widths: &[f64], at: usize) -> Vec<f64> {
    let new_count = widths.len() + 1;
    let share = TOTAL / new_count as f64;
    let sum: f64 = widths.iter().sum();

    let mut result: Vec<f64> = if sum > 0.0 {
        let scale = (TOTAL - share) / sum;
        widths.iter().map(|w| w * scale).collect()
    } else {
        vec![(TOTAL - share) / widths.len().max(1) as f64; widths.len()]
    };

    result.insert(at.min(widths.len()), share);
    renormalize(&result)
}

/// Remove the columns in `first..=last` and renormalize the remainder
pub fn remove_widths(widths: &[f64], first: usize, last: usize) -> Vec<f64> {
    let kept: Vec<f64> = widths
        .iter()
        .enumerate()
        .filter(|(i, _)| *i < first || *i > last)
        .map(|(_, w)| *w)
        .collect();
    renormalize(&kept)
}

/// Resize column `col` by `delta` percent against a fixed snapshot
///
/// The column is clamped to `min_width` (or its own width, when it already
/// sits below the floor); the change is absorbed by the
/// columns to its right in proportion to their share of the right-hand
/// total, and is reduced when they would be pushed below `min_width`.
/// Columns to the left never change. The last column cannot be resized.
pub fn resize_column(snapshot: &[f64], col: usize, delta: f64, min_width: f64) -> Vec<f64> {
    let mut widths = snapshot.to_vec();
    if col + 1 >= snapshot.len() || !delta.is_finite() {
        return widths;
    }

    let current = snapshot[col];
    let right = &snapshot[col + 1..];
    let right_total: f64 = right.iter().sum();
    if right_total <= 0.0 {
        return widths;
    }

    // A column already under the floor may grow but not shrink
    let floor = min_width.min(current);
    let mut applied = (current + delta).max(floor) - current;

    if applied > 0.0 {
        // Shrinking every right column by the same ratio, the smallest one
        // reaches the floor first
        let min_right = right.iter().copied().fold(f64::INFINITY, f64::min);
        let max_growth = if min_right <= min_width {
            0.0
        } else {
            right_total * (1.0 - min_width / min_right)
        };
        applied = applied.min(max_growth);
    }

    widths[col] = current + applied;
    let scale = (right_total - applied) / right_total;
    for (slot, original) in widths[col + 1..].iter_mut().zip(right) {
        *slot = original * scale;
    }

    widths
}

/// Convert a pixel distance to a percentage of the container
pub fn px_to_percent(delta_px: f64, container_width: f64) -> f64 {
    if container_width <= 0.0 || !container_width.is_finite() {
        return 0.0;
    }
    delta_px / container_width * TOTAL
}

/// A column drag in progress
///
/// Created on pointer-down and consumed by [`ResizeSession::end`]. Every
/// update is computed from the snapshot taken at creation, so many small
/// moves do not accumulate rounding drift.
#[derive(Debug, Clone, PartialEq)]
pub struct ResizeSession {
    pub column: usize,
    snapshot: Vec<f64>,
    current: Vec<f64>,
    container_width: f64,
    origin_x: f64,
    min_width: f64,
}

impl ResizeSession {
    pub fn begin(
        column: usize,
        widths: Vec<f64>,
        origin_x: f64,
        container_width: f64,
        min_width: f64,
    ) -> Self {
        tracing::debug!(
            "Resize session started on column {} ({:.1}px wide)",
            column,
            container_width
        );
        Self {
            column,
            current: widths.clone(),
            snapshot: widths,
            container_width,
            origin_x,
            min_width,
        }
    }

    /// Apply a total pixel delta measured from the drag origin
    pub fn update(&mut self, delta_px: f64) -> &[f64] {
        let delta = px_to_percent(delta_px, self.container_width);
        self.current = resize_column(&self.snapshot, self.column, delta, self.min_width);
        &self.current
    }

    /// Apply an absolute pointer x coordinate
    pub fn pointer_moved(&mut self, x: f64) -> &[f64] {
        self.update(x - self.origin_x)
    }

    pub fn snapshot(&self) -> &[f64] {
        &self.snapshot
    }

    pub fn widths(&self) -> &[f64] {
        &self.current
    }

    /// Release the session, yielding the final widths
    pub fn end(self) -> Vec<f64> {
        tracing::debug!("Resize session ended on column {}", self.column);
        self.current
    }
}
