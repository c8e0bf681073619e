use serde::Serialize;

use crate::error::SimulationError;
use crate::stats::percentile;

/// Portfolio values for every simulated path and period.
///
/// Entry `[path, t]` is the value of `path` after `t + 1` compounding periods.
/// Storage is row-major, one contiguous row per path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionMatrix {
    path_count: usize,
    horizon: usize,
    values: Vec<f64>,
}

impl ProjectionMatrix {
    pub(crate) fn from_raw(path_count: usize, horizon: usize, values: Vec<f64>) -> Self {
        debug_assert_eq!(values.len(), path_count * horizon);
        Self {
            path_count,
            horizon,
            values,
        }
    }

    #[must_use]
    pub fn path_count(&self) -> usize {
        self.path_count
    }

    #[must_use]
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Value of `path` after `period + 1` compounding steps.
    #[must_use]
    pub fn get(&self, path: usize, period: usize) -> Option<f64> {
        if path >= self.path_count || period >= self.horizon {
            return None;
        }
        Some(self.values[path * self.horizon + period])
    }

    /// Full trajectory of one path.
    #[must_use]
    pub fn path(&self, path: usize) -> Option<&[f64]> {
        if path >= self.path_count {
            return None;
        }
        let start = path * self.horizon;
        Some(&self.values[start..start + self.horizon])
    }

    pub fn paths(&self) -> impl Iterator<Item = &[f64]> {
        self.values.chunks_exact(self.horizon)
    }

    /// Values of every path at one period (a column of the matrix).
    #[must_use]
    pub fn period_values(&self, period: usize) -> Option<Vec<f64>> {
        if period >= self.horizon {
            return None;
        }
        Some(self.paths().map(|row| row[period]).collect())
    }

    /// Terminal value of every path, in path order.
    #[must_use]
    pub fn terminal(&self) -> Vec<f64> {
        self.paths().map(|row| row[self.horizon - 1]).collect()
    }

    /// Interpolated percentile of each period across all paths.
    ///
    /// Tracing several bands (e.g. 5, 50, 95) gives the usual fan chart.
    pub fn percentile_band(&self, pct: f64) -> Result<Vec<f64>, SimulationError> {
        let mut column = Vec::with_capacity(self.path_count);
        (0..self.horizon)
            .map(|period| {
                column.clear();
                column.extend(self.paths().map(|row| row[period]));
                column.sort_by(f64::total_cmp);
                percentile(&column, pct)
            })
            .collect()
    }

    /// Consume the matrix and return the raw row-major values.
    #[must_use]
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }
}
